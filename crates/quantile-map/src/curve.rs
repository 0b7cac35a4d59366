//! Correction-curve construction and application.

use flowcast_archive::FlowPair;
use flowcast_stats::{mean, sort_ascending};

use crate::config::{CdfMatchConfig, TieBreak};
use crate::error::QuantileMapError;

/// A monotonic quantile-to-quantile correction curve.
///
/// Built by sorting the observed and simulated historical columns
/// independently (rank-for-rank pairing, not matched by year) and taking
/// the log of the observed/simulated ratio at each rank. The simulated
/// column is non-decreasing by construction.
#[derive(Debug, Clone)]
pub struct CorrectionCurve {
    sorted_simulated: Vec<f64>,
    log_ratio: Vec<f64>,
    observed_mean: f64,
    tie_break: TieBreak,
}

impl CorrectionCurve {
    /// Fits a curve from historical pairs.
    ///
    /// Both columns are floored at `config.flow_floor()` so zero and
    /// negative flows produce a finite ratio; flooring happens before the
    /// sort because a zero floored to epsilon may outrank a sub-epsilon
    /// positive flow. The climatological average is the mean of the
    /// observed column *before* flooring.
    ///
    /// # Errors
    ///
    /// Returns [`QuantileMapError::EmptyPairs`] for an empty pair set and
    /// [`QuantileMapError::InvalidConfig`] for a bad configuration. A
    /// single pair is valid: the curve degenerates to a constant ratio.
    pub fn fit(pairs: &[FlowPair], config: &CdfMatchConfig) -> Result<Self, QuantileMapError> {
        config.validate()?;
        if pairs.is_empty() {
            return Err(QuantileMapError::EmptyPairs);
        }

        let mut observed: Vec<f64> = pairs.iter().map(|p| p.observed).collect();
        let mut simulated: Vec<f64> = pairs.iter().map(|p| p.simulated).collect();

        let observed_mean = mean(&observed);

        let floor = config.flow_floor();
        for v in observed.iter_mut().chain(simulated.iter_mut()) {
            if *v <= 0.0 {
                *v = floor;
            }
        }

        sort_ascending(&mut observed);
        sort_ascending(&mut simulated);

        let log_ratio: Vec<f64> = observed
            .iter()
            .zip(simulated.iter())
            .map(|(&obs, &sim)| (obs / sim).ln())
            .collect();

        Ok(Self {
            sorted_simulated: simulated,
            log_ratio,
            observed_mean,
            tie_break: config.tie_break(),
        })
    }

    /// Applies the curve to one simulated value.
    ///
    /// Values at or below the smallest simulated quantile take the first
    /// log-ratio and values at or above the largest take the last (flat
    /// extension, no extrapolation). In between, the log-ratio is linearly
    /// interpolated on the value's position between its bracketing
    /// quantiles. The corrected value is `value * exp(log_ratio)`. A NaN
    /// input returns NaN.
    pub fn apply(&self, value: f64) -> f64 {
        value * self.log_ratio_at(value).exp()
    }

    /// Applies the curve to a slice of simulated values.
    pub fn apply_all(&self, values: &[f64]) -> Vec<f64> {
        values.iter().map(|&v| self.apply(v)).collect()
    }

    /// Interpolated log-ratio for one simulated value.
    fn log_ratio_at(&self, value: f64) -> f64 {
        let sim = &self.sorted_simulated;
        let n = sim.len();

        // NaN fails both boundary tests and would underflow the bracket
        // search below; it propagates as NaN instead.
        if value.is_nan() {
            return f64::NAN;
        }

        if value <= sim[0] {
            return self.log_ratio[0];
        }
        if value >= sim[n - 1] {
            return self.log_ratio[n - 1];
        }

        // Greatest j with sim[j] < value; value > sim[0] guarantees j >= 0
        // and value < sim[n-1] guarantees j + 1 <= n - 1.
        let j = sim.partition_point(|&x| x < value) - 1;
        let (qs1, qs2) = (sim[j], sim[j + 1]);
        let (lr1, lr2) = (self.log_ratio[j], self.log_ratio[j + 1]);

        if qs2 - qs1 <= 0.0 {
            // Tied quantiles: interpolation denominator would be zero.
            return match self.tie_break {
                TieBreak::Midpoint => 0.5 * (lr1 + lr2),
                TieBreak::LowerIndex => lr1,
            };
        }

        lr1 + (lr2 - lr1) * (value - qs1) / (qs2 - qs1)
    }

    /// Returns the sorted simulated quantile column.
    pub fn sorted_simulated(&self) -> &[f64] {
        &self.sorted_simulated
    }

    /// Returns the log-ratio column.
    pub fn log_ratio(&self) -> &[f64] {
        &self.log_ratio
    }

    /// Mean of the historical observed series (the climatological average
    /// used for percent-of-average reporting).
    pub fn observed_mean(&self) -> f64 {
        self.observed_mean
    }

    /// Returns the number of curve points.
    pub fn len(&self) -> usize {
        self.sorted_simulated.len()
    }

    /// Returns `false`: a fitted curve always has at least one point.
    pub fn is_empty(&self) -> bool {
        self.sorted_simulated.is_empty()
    }
}
