//! Error types for the flowcast-quantile-map crate.

/// Error type for all fallible operations in the flowcast-quantile-map crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum QuantileMapError {
    /// Returned when a curve is fit from an empty pair set.
    #[error("cannot fit a correction curve from an empty pair set")]
    EmptyPairs,

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
    fn error_empty_pairs() {
        let e = QuantileMapError::EmptyPairs;
        assert_eq!(
            e.to_string(),
            "cannot fit a correction curve from an empty pair set"
        );
    }

    #[test]
    fn error_invalid_config() {
        let e = QuantileMapError::InvalidConfig {
            reason: "flow_floor must be positive".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "invalid configuration: flow_floor must be positive"
        );
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<QuantileMapError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<QuantileMapError>();
    }
}
