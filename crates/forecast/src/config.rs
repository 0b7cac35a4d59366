//! Configuration for forecast assembly.

use flowcast_archive::SeasonWindow;
use flowcast_exceedance::PlottingPosition;
use flowcast_quantile_map::CdfMatchConfig;

use crate::error::ForecastError;

/// Configuration for assembling one forecast batch.
///
/// Use the builder methods to customise parameters.
///
/// # Example
///
/// ```
/// use flowcast_forecast::ForecastConfig;
///
/// let config = ForecastConfig::new(2023)
///     .with_probabilities(vec![0.25, 0.5, 0.75])
///     .with_season_total(false);
/// ```
#[derive(Clone, Debug)]
pub struct ForecastConfig {
    probabilities: Vec<f64>,
    climatology_end_year: i32,
    season_window: SeasonWindow,
    include_season_total: bool,
    observed_substitution: bool,
    cdf: CdfMatchConfig,
    plotting: PlottingPosition,
}

impl ForecastConfig {
    /// Creates a new configuration with defaults.
    ///
    /// Defaults: `probabilities = [0.10, 0.50, 0.90]`, `season_window =
    /// April..=July`, `include_season_total = true`,
    /// `observed_substitution = true`, CDF matching and plotting-position
    /// defaults from their crates.
    pub fn new(climatology_end_year: i32) -> Self {
        Self {
            probabilities: vec![0.1, 0.5, 0.9],
            climatology_end_year,
            season_window: SeasonWindow::default(),
            include_season_total: true,
            observed_substitution: true,
            cdf: CdfMatchConfig::new(),
            plotting: PlottingPosition::cunnane(),
        }
    }

    // --- Builder methods ---

    /// Sets the requested exceedance probabilities.
    pub fn with_probabilities(mut self, probs: Vec<f64>) -> Self {
        self.probabilities = probs;
        self
    }

    /// Sets the multi-month window for the season-total pseudo-step.
    pub fn with_season_window(mut self, w: SeasonWindow) -> Self {
        self.season_window = w;
        self
    }

    /// Enables or disables the season-total pseudo-step.
    pub fn with_season_total(mut self, b: bool) -> Self {
        self.include_season_total = b;
        self
    }

    /// Enables or disables substituting observed flows for already-elapsed
    /// months that are on the archive's record.
    pub fn with_observed_substitution(mut self, b: bool) -> Self {
        self.observed_substitution = b;
        self
    }

    /// Sets the CDF-matching configuration.
    pub fn with_cdf(mut self, cdf: CdfMatchConfig) -> Self {
        self.cdf = cdf;
        self
    }

    /// Sets the plotting-position convention.
    pub fn with_plotting(mut self, pp: PlottingPosition) -> Self {
        self.plotting = pp;
        self
    }

    // --- Accessors ---

    /// Returns the requested exceedance probabilities.
    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    /// Returns the climatology cutoff year (inclusive).
    pub fn climatology_end_year(&self) -> i32 {
        self.climatology_end_year
    }

    /// Returns the season-total window.
    pub fn season_window(&self) -> SeasonWindow {
        self.season_window
    }

    /// Returns whether the season-total pseudo-step is produced.
    pub fn include_season_total(&self) -> bool {
        self.include_season_total
    }

    /// Returns whether elapsed months take their observed flow.
    pub fn observed_substitution(&self) -> bool {
        self.observed_substitution
    }

    /// Returns the CDF-matching configuration.
    pub fn cdf(&self) -> &CdfMatchConfig {
        &self.cdf
    }

    /// Returns the plotting-position convention.
    pub fn plotting(&self) -> &PlottingPosition {
        &self.plotting
    }

    /// Validates this configuration.
    ///
    /// Probabilities must be non-empty and each strictly inside (0, 1);
    /// the CDF-matching configuration must itself validate.
    pub fn validate(&self) -> Result<(), ForecastError> {
        if self.probabilities.is_empty() {
            return Err(ForecastError::InvalidConfig {
                reason: "probabilities must not be empty".to_string(),
            });
        }
        for &p in &self.probabilities {
            if !p.is_finite() || p <= 0.0 || p >= 1.0 {
                return Err(ForecastError::InvalidConfig {
                    reason: format!("probability {p} outside (0, 1)"),
                });
            }
        }
        self.cdf
            .validate()
            .map_err(|e| ForecastError::InvalidConfig {
                reason: e.to_string(),
            })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = ForecastConfig::new(2022);
        assert_eq!(cfg.probabilities(), &[0.1, 0.5, 0.9]);
        assert_eq!(cfg.climatology_end_year(), 2022);
        assert_eq!(cfg.season_window(), SeasonWindow::april_to_july());
        assert!(cfg.include_season_total());
        assert!(cfg.observed_substitution());
    }

    #[test]
    fn builder_chaining() {
        let cfg = ForecastConfig::new(2020)
            .with_probabilities(vec![0.5])
            .with_season_window(SeasonWindow::new(3, 9).unwrap())
            .with_season_total(false);
        assert_eq!(cfg.probabilities(), &[0.5]);
        assert_eq!(cfg.season_window().start_month(), 3);
        assert!(!cfg.include_season_total());
    }

    #[test]
    fn validate_ok() {
        assert!(ForecastConfig::new(2022).validate().is_ok());
    }

    #[test]
    fn validate_empty_probabilities() {
        let cfg = ForecastConfig::new(2022).with_probabilities(vec![]);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_probability_bounds() {
        for p in [0.0, 1.0, -0.5, 2.0, f64::NAN] {
            let cfg = ForecastConfig::new(2022).with_probabilities(vec![p]);
            assert!(cfg.validate().is_err(), "p = {p} should be rejected");
        }
    }

    #[test]
    fn validate_delegates_to_cdf() {
        let cfg = ForecastConfig::new(2022)
            .with_cdf(CdfMatchConfig::new().with_flow_floor(-1.0));
        assert!(cfg.validate().is_err());
    }
}
