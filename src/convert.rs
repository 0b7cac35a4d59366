//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Result, bail};

use flowcast_archive::SeasonWindow;
use flowcast_exceedance::PlottingPosition;
use flowcast_forecast::ForecastConfig;
use flowcast_io::ReaderConfig;
use flowcast_quantile_map::{CdfMatchConfig, TieBreak};

use crate::config::{ColumnsToml, CorrectionToml, FlowcastConfig, PlottingToml};

/// Parses a tie-break policy name into the corresponding enum variant.
pub fn parse_tie_break(s: &str) -> Result<TieBreak> {
    match s.to_lowercase().as_str() {
        "midpoint" => Ok(TieBreak::Midpoint),
        "lower" | "lower-index" => Ok(TieBreak::LowerIndex),
        other => bail!("unknown tie-break policy: {other:?}"),
    }
}

/// Builds a [`CdfMatchConfig`] from the TOML correction configuration.
pub fn build_cdf_config(correction: &CorrectionToml) -> Result<CdfMatchConfig> {
    let tie_break = parse_tie_break(&correction.tie_break)?;
    let cfg = CdfMatchConfig::new()
        .with_flow_floor(correction.flow_floor)
        .with_tie_break(tie_break);
    cfg.validate()?;
    Ok(cfg)
}

/// Builds a [`PlottingPosition`] from the TOML plotting configuration.
pub fn build_plotting(plotting: &PlottingToml) -> Result<PlottingPosition> {
    Ok(PlottingPosition::new(plotting.b)?)
}

/// Builds a [`ReaderConfig`] from the TOML column configuration.
pub fn build_reader_config(columns: &ColumnsToml) -> ReaderConfig {
    ReaderConfig::default()
        .with_date_column(&columns.date)
        .with_simulated_column(&columns.simulated)
        .with_observed_column(&columns.observed)
}

/// Builds a [`ForecastConfig`] from the full TOML configuration.
pub fn build_forecast_config(config: &FlowcastConfig) -> Result<ForecastConfig> {
    let window = SeasonWindow::new(
        config.forecast.season_start_month,
        config.forecast.season_end_month,
    )?;
    let cfg = ForecastConfig::new(config.climatology_end_year)
        .with_probabilities(config.forecast.probabilities.clone())
        .with_season_window(window)
        .with_season_total(config.forecast.include_season_total)
        .with_observed_substitution(config.forecast.observed_substitution)
        .with_cdf(build_cdf_config(&config.correction)?)
        .with_plotting(build_plotting(&config.plotting)?);
    cfg.validate()?;
    Ok(cfg)
}

/// Parses a `START:END` window argument, e.g. `4:7` for April-July.
pub fn parse_window(s: &str) -> Result<SeasonWindow> {
    let Some((start, end)) = s.split_once(':') else {
        bail!("window must be START:END months, e.g. 4:7");
    };
    let start: u8 = start
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("window start {start:?} is not a month number"))?;
    let end: u8 = end
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("window end {end:?} is not a month number"))?;
    Ok(SeasonWindow::new(start, end)?)
}
