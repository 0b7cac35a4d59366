//! Configuration for CDF matching.

use crate::error::QuantileMapError;

/// Policy for resolving a tied pair of bracketing quantiles.
///
/// Duplicate simulated quantiles make the interpolation denominator zero.
/// The legacy implementation left this case unguarded; both policies below
/// are defined and finite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreak {
    /// Average the two bracketing log-ratios.
    #[default]
    Midpoint,
    /// Use the lower index's log-ratio.
    LowerIndex,
}

/// Configuration for correction-curve fitting and application.
///
/// Use the builder methods to customise parameters.
///
/// # Example
///
/// ```
/// use flowcast_quantile_map::{CdfMatchConfig, TieBreak};
///
/// let config = CdfMatchConfig::new()
///     .with_flow_floor(1e-3)
///     .with_tie_break(TieBreak::LowerIndex);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct CdfMatchConfig {
    flow_floor: f64,
    tie_break: TieBreak,
}

impl CdfMatchConfig {
    /// Creates a new configuration with defaults.
    ///
    /// Defaults: `flow_floor = 1e-4`, `tie_break = Midpoint`.
    pub fn new() -> Self {
        Self {
            flow_floor: 1e-4,
            tie_break: TieBreak::default(),
        }
    }

    /// Sets the floor applied to non-positive flows before the log step.
    pub fn with_flow_floor(mut self, v: f64) -> Self {
        self.flow_floor = v;
        self
    }

    /// Sets the tie-break policy for duplicate quantile values.
    pub fn with_tie_break(mut self, t: TieBreak) -> Self {
        self.tie_break = t;
        self
    }

    /// Returns the flow floor.
    pub fn flow_floor(&self) -> f64 {
        self.flow_floor
    }

    /// Returns the tie-break policy.
    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    /// Validates this configuration.
    ///
    /// The floor must be finite and strictly positive: it exists to keep
    /// `ln(observed / simulated)` finite and sign-consistent for zero and
    /// negative flows.
    pub fn validate(&self) -> Result<(), QuantileMapError> {
        if !self.flow_floor.is_finite() || self.flow_floor <= 0.0 {
            return Err(QuantileMapError::InvalidConfig {
                reason: format!(
                    "flow_floor must be finite and > 0, got {}",
                    self.flow_floor
                ),
            });
        }
        Ok(())
    }
}

impl Default for CdfMatchConfig {
    fn default() -> Self {
        Self::new()
    }
}
