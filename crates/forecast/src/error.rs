//! Error types for the flowcast-forecast crate.

/// Site-fatal errors raised while assembling one site's forecast.
///
/// Per-step conditions (an empty ensemble row, an empty historical pair
/// set) are not errors at this level: they are contained as unavailable
/// steps so the rest of the site's table still completes.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ForecastError {
    /// Returned when the step grid is empty.
    #[error("site '{site}' has no forecast steps")]
    EmptySteps {
        /// The affected site.
        site: String,
    },

    /// Returned when the ensemble row count does not match the step count.
    #[error("site '{site}': {rows} ensemble rows for {steps} steps")]
    ShapeMismatch {
        /// The affected site.
        site: String,
        /// Number of forecast steps.
        steps: usize,
        /// Number of ensemble rows supplied.
        rows: usize,
    },

    /// Returned when a configuration parameter is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_empty_steps() {
        let e = ForecastError::EmptySteps {
            site: "TRF".to_string(),
        };
        assert_eq!(e.to_string(), "site 'TRF' has no forecast steps");
    }

    #[test]
    fn error_shape_mismatch() {
        let e = ForecastError::ShapeMismatch {
            site: "SJF".to_string(),
            steps: 12,
            rows: 11,
        };
        assert_eq!(e.to_string(), "site 'SJF': 11 ensemble rows for 12 steps");
    }

    #[test]
    fn error_invalid_config() {
        let e = ForecastError::InvalidConfig {
            reason: "probabilities must not be empty".to_string(),
        };
        assert!(e.to_string().contains("probabilities must not be empty"));
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<ForecastError>();
    }
}
