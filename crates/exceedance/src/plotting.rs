//! Plotting-position convention.

use crate::error::ExceedanceError;

/// A plotting-position convention `p = (i - b) / (n + 1 - 2b)` assigning a
/// non-parametric exceedance probability to each ranked sample.
///
/// The default `b = 0.4` is Cunnane (1978), the convention used across
/// water-supply forecasting. Inverting for a requested exceedance
/// probability `p` gives the real-valued 0-based rank
/// `(n + 1 - 2b)(1 - p) + b - 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlottingPosition {
    b: f64,
}

impl PlottingPosition {
    /// Creates a plotting position with constant `b`.
    ///
    /// # Errors
    ///
    /// Returns [`ExceedanceError::InvalidPlottingPosition`] unless `b` is
    /// finite and in `[0, 1)`.
    pub fn new(b: f64) -> Result<Self, ExceedanceError> {
        if !b.is_finite() || !(0.0..1.0).contains(&b) {
            return Err(ExceedanceError::InvalidPlottingPosition { b });
        }
        Ok(Self { b })
    }

    /// The Cunnane (1978) convention, `b = 0.4`.
    pub fn cunnane() -> Self {
        Self { b: 0.4 }
    }

    /// Returns the plotting-position constant.
    pub fn b(self) -> f64 {
        self.b
    }

    /// Real-valued 0-based rank for exceedance probability `p` in a sample
    /// of size `n`. Larger values rank higher, so the rank of a small `p`
    /// (rarely exceeded) sits near the top of the ascending sample.
    ///
    /// May fall outside `[0, n-1]`; callers clamp (no extrapolation).
    pub fn real_rank(self, n: usize, p: f64) -> f64 {
        (n as f64 + 1.0 - 2.0 * self.b) * (1.0 - p) + self.b - 1.0
    }
}

impl Default for PlottingPosition {
    fn default() -> Self {
        Self::cunnane()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn cunnane_constant() {
        assert_relative_eq!(PlottingPosition::cunnane().b(), 0.4);
    }

    #[test]
    fn default_is_cunnane() {
        assert_eq!(PlottingPosition::default(), PlottingPosition::cunnane());
    }

    #[test]
    fn new_validates_b() {
        assert!(PlottingPosition::new(0.0).is_ok());
        assert!(PlottingPosition::new(0.5).is_ok());
        assert!(PlottingPosition::new(1.0).is_err());
        assert!(PlottingPosition::new(-0.1).is_err());
        assert!(PlottingPosition::new(f64::NAN).is_err());
    }

    #[test]
    fn cunnane_rank_n42_median() {
        // (42 + 0.2) * 0.5 + 0.4 - 1 = 20.5, the documented midpoint
        // between 0-based ranks 20 and 21.
        let rank = PlottingPosition::cunnane().real_rank(42, 0.5);
        assert_relative_eq!(rank, 20.5, epsilon = 1e-12);
    }

    #[test]
    fn cunnane_rank_n5_median_is_exact_index() {
        let rank = PlottingPosition::cunnane().real_rank(5, 0.5);
        assert_relative_eq!(rank, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn cunnane_rank_n4_median_is_midpoint() {
        let rank = PlottingPosition::cunnane().real_rank(4, 0.5);
        assert_relative_eq!(rank, 1.5, epsilon = 1e-12);
    }

    #[test]
    fn high_exceedance_ranks_low() {
        // p = 0.9: exceeded 90% of the time, a low-flow estimate near the
        // bottom of the ascending sample.
        let pp = PlottingPosition::cunnane();
        assert!(pp.real_rank(10, 0.9) < pp.real_rank(10, 0.1));
    }

    #[test]
    fn weibull_convention() {
        // b = 0: rank = (n + 1)(1 - p) - 1. For n = 9, p = 0.5 -> 4.0.
        let pp = PlottingPosition::new(0.0).unwrap();
        assert_relative_eq!(pp.real_rank(9, 0.5), 4.0, epsilon = 1e-12);
    }
}
