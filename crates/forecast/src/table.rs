//! Assembled forecast output types.

use flowcast_archive::Period;

/// One exceedance level in a forecast step.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelValue {
    /// The requested exceedance probability.
    pub probability: f64,
    /// The corrected flow exceeded with that probability.
    pub value: f64,
    /// The flow as a percentage of the climatological average, or `None`
    /// when the average is zero or undefined.
    pub percent_of_average: Option<f64>,
}

/// The computed values of one forecast step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepValues {
    /// Bias-corrected per-member flows, in member order.
    pub members: Vec<f64>,
    /// Requested exceedance levels, in request order.
    pub levels: Vec<LevelValue>,
    /// Climatological average of the observed series for the period.
    pub average: f64,
}

/// Outcome of one forecast step.
///
/// An unavailable step is an explicit sentinel: it must never be confused
/// with a computed value of zero.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// The step computed successfully.
    Ready(StepValues),
    /// The step could not be computed; the reason is already logged.
    Unavailable {
        /// Human-readable description of why the step is missing.
        reason: String,
    },
}

impl StepOutcome {
    /// Returns the computed values, if the step is ready.
    pub fn values(&self) -> Option<&StepValues> {
        match self {
            StepOutcome::Ready(v) => Some(v),
            StepOutcome::Unavailable { .. } => None,
        }
    }

    /// Returns `true` if the step computed successfully.
    pub fn is_ready(&self) -> bool {
        matches!(self, StepOutcome::Ready(_))
    }
}

/// One row of a site's forecast table.
#[derive(Debug, Clone)]
pub struct ForecastStep {
    /// Date label for the row (first of month, or the window's last day
    /// for the season-total pseudo-step).
    pub label: String,
    /// The calendar period the step covers.
    pub period: Period,
    /// Computed values or the unavailable sentinel.
    pub outcome: StepOutcome,
}

/// A complete single-site forecast.
#[derive(Debug, Clone)]
pub struct SiteForecast {
    site: String,
    steps: Vec<ForecastStep>,
}

impl SiteForecast {
    pub(crate) fn new(site: String, steps: Vec<ForecastStep>) -> Self {
        Self { site, steps }
    }

    /// Returns the site identifier.
    pub fn site(&self) -> &str {
        &self.site
    }

    /// Returns the forecast steps in output order.
    pub fn steps(&self) -> &[ForecastStep] {
        &self.steps
    }

    /// Returns the number of steps that computed successfully.
    pub fn n_ready(&self) -> usize {
        self.steps.iter().filter(|s| s.outcome.is_ready()).count()
    }

    /// Returns the number of unavailable steps.
    pub fn n_unavailable(&self) -> usize {
        self.steps.len() - self.n_ready()
    }

    /// Returns the ensemble member count, taken from the first ready step.
    pub fn n_members(&self) -> usize {
        self.steps
            .iter()
            .find_map(|s| s.outcome.values().map(|v| v.members.len()))
            .unwrap_or(0)
    }
}
