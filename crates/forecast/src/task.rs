//! One site's forecast input: the step grid and the ensemble matrix.

use flowcast_archive::MonthDate;

use crate::error::ForecastError;

/// The input for one site's forecast: the monthly step grid and, per step,
/// the ensemble of simulated flows (one value per member).
#[derive(Debug, Clone)]
pub struct SiteTask {
    site: String,
    steps: Vec<MonthDate>,
    ensemble: Vec<Vec<f64>>,
}

impl SiteTask {
    /// Creates a new task after structural validation.
    ///
    /// # Errors
    ///
    /// Returns [`ForecastError::EmptySteps`] for an empty step grid and
    /// [`ForecastError::ShapeMismatch`] when the ensemble row count differs
    /// from the step count. Individual rows may have any member count,
    /// including zero: an empty row becomes an unavailable step during
    /// assembly, not a site failure.
    pub fn new(
        site: impl Into<String>,
        steps: Vec<MonthDate>,
        ensemble: Vec<Vec<f64>>,
    ) -> Result<Self, ForecastError> {
        let site = site.into();
        if steps.is_empty() {
            return Err(ForecastError::EmptySteps { site });
        }
        if ensemble.len() != steps.len() {
            return Err(ForecastError::ShapeMismatch {
                site,
                steps: steps.len(),
                rows: ensemble.len(),
            });
        }
        Ok(Self {
            site,
            steps,
            ensemble,
        })
    }

    /// Returns the site identifier.
    pub fn site(&self) -> &str {
        &self.site
    }

    /// Returns the monthly step grid.
    pub fn steps(&self) -> &[MonthDate] {
        &self.steps
    }

    /// Returns the ensemble rows, one per step.
    pub fn ensemble(&self) -> &[Vec<f64>] {
        &self.ensemble
    }

    /// Returns the number of steps.
    pub fn n_steps(&self) -> usize {
        self.steps.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(year: i32, month: u8) -> MonthDate {
        MonthDate::new(year, month).unwrap()
    }

    #[test]
    fn new_valid() {
        let task = SiteTask::new(
            "SJF",
            vec![step(2023, 4), step(2023, 5)],
            vec![vec![1.0, 2.0], vec![3.0, 4.0]],
        )
        .unwrap();
        assert_eq!(task.site(), "SJF");
        assert_eq!(task.n_steps(), 2);
    }

    #[test]
    fn new_empty_steps_rejected() {
        assert!(matches!(
            SiteTask::new("SJF", vec![], vec![]),
            Err(ForecastError::EmptySteps { .. })
        ));
    }

    #[test]
    fn new_shape_mismatch_rejected() {
        let result = SiteTask::new(
            "SJF",
            vec![step(2023, 4), step(2023, 5)],
            vec![vec![1.0]],
        );
        assert!(matches!(
            result,
            Err(ForecastError::ShapeMismatch {
                steps: 2,
                rows: 1,
                ..
            })
        ));
    }

    #[test]
    fn empty_rows_allowed() {
        let task = SiteTask::new("SJF", vec![step(2023, 4)], vec![vec![]]).unwrap();
        assert!(task.ensemble()[0].is_empty());
    }
}
