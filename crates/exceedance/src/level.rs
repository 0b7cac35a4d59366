//! Exceedance level: requested probability plus derived rank geometry.

use crate::error::ExceedanceError;
use crate::plotting::PlottingPosition;

/// A requested exceedance probability together with its rank position in a
/// sample of known size: the real-valued rank, the two bracketing integer
/// ranks clamped into the sample, and their interpolation weights.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExceedanceLevel {
    probability: f64,
    rank: f64,
    lo: usize,
    hi: usize,
    weight_lo: f64,
    weight_hi: f64,
}

impl ExceedanceLevel {
    /// Derives the rank geometry for probability `p` in a sample of size `n`.
    ///
    /// Bracketing ranks are clamped into `[0, n-1]`: probabilities mapping
    /// below the smallest or above the largest member are capped to the
    /// boundary member, never extrapolated. When the clamped brackets
    /// coincide, the full weight sits on that single index; otherwise the
    /// weights are the fractional distances to the opposite bracket and sum
    /// to 1.
    ///
    /// # Errors
    ///
    /// Returns [`ExceedanceError::EmptyEnsemble`] if `n == 0` and
    /// [`ExceedanceError::InvalidProbability`] unless `0 < p < 1`.
    pub fn new(n: usize, p: f64, pp: &PlottingPosition) -> Result<Self, ExceedanceError> {
        if n == 0 {
            return Err(ExceedanceError::EmptyEnsemble);
        }
        if !p.is_finite() || p <= 0.0 || p >= 1.0 {
            return Err(ExceedanceError::InvalidProbability { probability: p });
        }

        let rank = pp.real_rank(n, p);
        let max = (n - 1) as f64;

        let lo = rank.floor().clamp(0.0, max);
        let hi = rank.ceil().clamp(0.0, max);

        let (weight_lo, weight_hi) = if lo == hi {
            (1.0, 0.0)
        } else {
            (hi - rank, rank - lo)
        };

        Ok(Self {
            probability: p,
            rank,
            lo: lo as usize,
            hi: hi as usize,
            weight_lo,
            weight_hi,
        })
    }

    /// Interpolates the level's value from an ascending-sorted sample.
    ///
    /// The caller guarantees `sorted.len()` equals the `n` this level was
    /// derived for; the bracketing indices are in range by construction.
    pub fn interpolate(&self, sorted: &[f64]) -> f64 {
        debug_assert!(self.hi < sorted.len());
        self.weight_lo * sorted[self.lo] + self.weight_hi * sorted[self.hi]
    }

    /// Returns the requested exceedance probability.
    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// Returns the real-valued 0-based rank (possibly outside the sample).
    pub fn rank(&self) -> f64 {
        self.rank
    }

    /// Returns the clamped lower bracketing index.
    pub fn lo(&self) -> usize {
        self.lo
    }

    /// Returns the clamped upper bracketing index.
    pub fn hi(&self) -> usize {
        self.hi
    }

    /// Returns the weight on the lower bracketing index.
    pub fn weight_lo(&self) -> f64 {
        self.weight_lo
    }

    /// Returns the weight on the upper bracketing index.
    pub fn weight_hi(&self) -> f64 {
        self.weight_hi
    }
}
