//! Empirical quantile-mapping bias correction for streamflow.
//!
//! Rescales simulated flows so their empirical distribution matches an
//! observed reference distribution for the same calendar period.
//!
//! # Pipeline
//!
//! 1. **Fit** — sort the observed and simulated historical columns
//!    independently, floor non-positive flows, take `ln(obs/sim)` per rank
//! 2. **Apply** — interpolate the log-ratio at the new simulated value
//!    (flat extension beyond the historical range) and scale by `exp`
//!
//! # Glossary
//!
//! - **CDF matching**: forcing a simulated distribution onto an observed
//!   one by mapping corresponding quantiles
//! - **Log-ratio**: `ln(observed_quantile / simulated_quantile)`, the
//!   multiplicative correction in log space
//! - **Climatological average**: long-term mean of the observed series,
//!   used for percent-of-normal reporting
//!
//! # Quick Start
//!
//! ```
//! use flowcast_archive::FlowPair;
//! use flowcast_quantile_map::{CdfMatchConfig, cdf_match};
//!
//! let pairs = vec![
//!     FlowPair::new(1.0, 10.0),
//!     FlowPair::new(2.0, 20.0),
//!     FlowPair::new(3.0, 30.0),
//! ];
//! let result = cdf_match(&pairs, &[2.0], &CdfMatchConfig::new()).unwrap();
//! assert!((result.matched()[0] - 20.0).abs() < 1e-9);
//! ```

mod config;
mod curve;
mod error;
mod result;

pub use config::{CdfMatchConfig, TieBreak};
pub use curve::CorrectionCurve;
pub use error::QuantileMapError;
pub use result::MatchResult;

use flowcast_archive::FlowPair;

/// Corrects a batch of simulated values against a historical pair set.
///
/// Convenience entry point that fits a [`CorrectionCurve`] and applies it
/// to every value.
///
/// # Errors
///
/// Returns [`QuantileMapError::EmptyPairs`] if `pairs` is empty and
/// [`QuantileMapError::InvalidConfig`] if the configuration is invalid.
pub fn cdf_match(
    pairs: &[FlowPair],
    values: &[f64],
    config: &CdfMatchConfig,
) -> Result<MatchResult, QuantileMapError> {
    let curve = CorrectionCurve::fit(pairs, config)?;
    let matched = curve.apply_all(values);
    Ok(MatchResult::new(matched, curve.observed_mean()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn cdf_match_empty_pairs() {
        let result = cdf_match(&[], &[1.0], &CdfMatchConfig::new());
        assert!(matches!(result, Err(QuantileMapError::EmptyPairs)));
    }

    #[test]
    fn cdf_match_constant_ratio() {
        let pairs = vec![
            FlowPair::new(1.0, 10.0),
            FlowPair::new(2.0, 20.0),
            FlowPair::new(3.0, 30.0),
        ];
        let result = cdf_match(&pairs, &[2.0, 0.5, 9.0], &CdfMatchConfig::new()).unwrap();
        assert_relative_eq!(result.matched()[0], 20.0, epsilon = 1e-9);
        assert_relative_eq!(result.matched()[1], 5.0, epsilon = 1e-9);
        assert_relative_eq!(result.matched()[2], 90.0, epsilon = 1e-9);
        assert_relative_eq!(result.climatological_average(), 20.0, epsilon = 1e-12);
    }

    #[test]
    fn cdf_match_empty_values_ok() {
        let pairs = vec![FlowPair::new(1.0, 2.0)];
        let result = cdf_match(&pairs, &[], &CdfMatchConfig::new()).unwrap();
        assert!(result.matched().is_empty());
    }
}
