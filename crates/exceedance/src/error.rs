//! Error types for the flowcast-exceedance crate.

/// Error type for all fallible operations in the flowcast-exceedance crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ExceedanceError {
    /// Returned when an ensemble has no members.
    #[error("ensemble is empty")]
    EmptyEnsemble,

    /// Returned when a requested probability is outside (0, 1).
    #[error("invalid exceedance probability: {probability} (must be in (0, 1))")]
    InvalidProbability {
        /// The offending probability.
        probability: f64,
    },

    /// Returned when a plotting-position constant is out of range.
    #[error("invalid plotting position: b = {b} (must be finite and in [0, 1))")]
    InvalidPlottingPosition {
        /// The offending constant.
        b: f64,
    },
}
