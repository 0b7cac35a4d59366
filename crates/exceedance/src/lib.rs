//! Exceedance-probability statistics for flow ensembles.
//!
//! Converts an ensemble of values at one time step into formal exceedance
//! levels ("50% chance flow exceeds X") using a plotting-position
//! convention (Cunnane 1978 by default) with linear interpolation between
//! adjacent order statistics and no extrapolation beyond the sample range.
//!
//! # Quick Start
//!
//! ```
//! use flowcast_exceedance::{PlottingPosition, compute};
//!
//! let ensemble = [40.0, 10.0, 50.0, 30.0, 20.0];
//! let levels = compute(&ensemble, &[0.5], &PlottingPosition::cunnane()).unwrap();
//! assert_eq!(levels[0].value, 30.0);
//! ```

mod error;
mod level;
mod plotting;

pub use error::ExceedanceError;
pub use level::ExceedanceLevel;
pub use plotting::PlottingPosition;

use flowcast_stats::sorted_ascending;

/// One computed exceedance level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelEstimate {
    /// The requested exceedance probability.
    pub probability: f64,
    /// The flow exceeded with that probability.
    pub value: f64,
}

/// Computes the requested exceedance levels for one ensemble.
///
/// The ensemble is sorted ascending internally; no input ordering is
/// assumed. Results are returned in the order the probabilities were
/// requested.
///
/// # Errors
///
/// Returns [`ExceedanceError::EmptyEnsemble`] for an empty ensemble and
/// [`ExceedanceError::InvalidProbability`] for a probability outside
/// `(0, 1)`.
pub fn compute(
    ensemble: &[f64],
    probabilities: &[f64],
    pp: &PlottingPosition,
) -> Result<Vec<LevelEstimate>, ExceedanceError> {
    if ensemble.is_empty() {
        return Err(ExceedanceError::EmptyEnsemble);
    }

    let sorted = sorted_ascending(ensemble);

    probabilities
        .iter()
        .map(|&p| {
            let level = ExceedanceLevel::new(sorted.len(), p, pp)?;
            Ok(LevelEstimate {
                probability: p,
                value: level.interpolate(&sorted),
            })
        })
        .collect()
}

/// Expresses a value as a percentage of a climatological average.
///
/// Returns `None` when the average is zero, negative, or non-finite:
/// percent-of-average is meaningless there and must surface as an explicit
/// "not available" rather than an infinity or a silent NaN.
pub fn percent_of_average(value: f64, average: f64) -> Option<f64> {
    if !average.is_finite() || average <= 0.0 {
        return None;
    }
    Some(value / average * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn compute_empty_ensemble() {
        let result = compute(&[], &[0.5], &PlottingPosition::cunnane());
        assert!(matches!(result, Err(ExceedanceError::EmptyEnsemble)));
    }

    #[test]
    fn compute_invalid_probability() {
        let result = compute(&[1.0, 2.0], &[1.0], &PlottingPosition::cunnane());
        assert!(matches!(
            result,
            Err(ExceedanceError::InvalidProbability { .. })
        ));
    }

    #[test]
    fn compute_n5_median_is_middle_member() {
        let levels = compute(
            &[10.0, 20.0, 30.0, 40.0, 50.0],
            &[0.5],
            &PlottingPosition::cunnane(),
        )
        .unwrap();
        assert_relative_eq!(levels[0].value, 30.0, epsilon = 1e-12);
    }

    #[test]
    fn compute_n4_median_is_weighted_midpoint() {
        let levels = compute(
            &[10.0, 20.0, 30.0, 40.0],
            &[0.5],
            &PlottingPosition::cunnane(),
        )
        .unwrap();
        assert_relative_eq!(levels[0].value, 25.0, epsilon = 1e-12);
    }

    #[test]
    fn compute_sorts_internally() {
        let shuffled = [30.0, 10.0, 50.0, 20.0, 40.0];
        let levels = compute(&shuffled, &[0.5], &PlottingPosition::cunnane()).unwrap();
        assert_relative_eq!(levels[0].value, 30.0, epsilon = 1e-12);
    }

    #[test]
    fn compute_levels_ordered_as_requested() {
        let ensemble: Vec<f64> = (1..=42).map(|i| i as f64).collect();
        let probs = [0.1, 0.5, 0.9];
        let levels = compute(&ensemble, &probs, &PlottingPosition::cunnane()).unwrap();
        assert_eq!(levels.len(), 3);
        for (lvl, p) in levels.iter().zip(probs.iter()) {
            assert_relative_eq!(lvl.probability, *p);
        }
        // 10% exceedance is a high flow, 90% a low flow.
        assert!(levels[0].value > levels[1].value);
        assert!(levels[1].value > levels[2].value);
    }

    #[test]
    fn compute_odd_ensemble_median_exact() {
        // Cunnane median of odd N lands exactly on the middle member.
        for n in [3usize, 5, 7, 21] {
            let ensemble: Vec<f64> = (0..n).map(|i| (i * 10) as f64).collect();
            let levels = compute(&ensemble, &[0.5], &PlottingPosition::cunnane()).unwrap();
            assert_relative_eq!(
                levels[0].value,
                ensemble[n / 2],
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn percent_of_average_basic() {
        assert_relative_eq!(percent_of_average(50.0, 100.0).unwrap(), 50.0);
        assert_relative_eq!(percent_of_average(150.0, 100.0).unwrap(), 150.0);
    }

    #[test]
    fn percent_of_average_zero_average() {
        assert!(percent_of_average(50.0, 0.0).is_none());
    }

    #[test]
    fn percent_of_average_negative_average() {
        assert!(percent_of_average(50.0, -1.0).is_none());
    }

    #[test]
    fn percent_of_average_nan_average() {
        assert!(percent_of_average(50.0, f64::NAN).is_none());
    }
}
