//! Result type for CDF matching.

/// The output of a CDF-matching call: the corrected values together with
/// the climatological average of the historical observed series.
#[derive(Debug, Clone)]
pub struct MatchResult {
    matched: Vec<f64>,
    climatological_average: f64,
}

impl MatchResult {
    pub(crate) fn new(matched: Vec<f64>, climatological_average: f64) -> Self {
        Self {
            matched,
            climatological_average,
        }
    }

    /// Returns the corrected values as a slice.
    pub fn matched(&self) -> &[f64] {
        &self.matched
    }

    /// Consumes `self` and returns the owned corrected vector.
    pub fn into_matched(self) -> Vec<f64> {
        self.matched
    }

    /// Mean of the historical observed series for the period.
    pub fn climatological_average(&self) -> f64 {
        self.climatological_average
    }
}
