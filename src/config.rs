use std::path::PathBuf;

use serde::Deserialize;

/// Top-level flowcast configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FlowcastConfig {
    /// Last year of the observed climatology (inclusive).
    pub climatology_end_year: i32,

    /// Sites to forecast; archive and ensemble files are named after them.
    pub sites: Vec<String>,

    /// File-system layout.
    pub paths: PathsToml,

    /// Forecast settings.
    #[serde(default)]
    pub forecast: ForecastToml,

    /// Bias-correction settings.
    #[serde(default)]
    pub correction: CorrectionToml,

    /// Plotting-position settings.
    #[serde(default)]
    pub plotting: PlottingToml,

    /// Archive CSV column names.
    #[serde(default)]
    pub columns: ColumnsToml,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathsToml {
    /// Directory holding `<site>.csv` historical archives.
    pub archive_dir: PathBuf,
    /// Directory holding `<site>.csv` ensemble matrices.
    pub ensemble_dir: PathBuf,
    /// Directory forecast tables are written to.
    pub output_dir: PathBuf,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ForecastToml {
    #[serde(default = "default_probabilities")]
    pub probabilities: Vec<f64>,
    #[serde(default = "default_season_start")]
    pub season_start_month: u8,
    #[serde(default = "default_season_end")]
    pub season_end_month: u8,
    #[serde(default = "default_true")]
    pub include_season_total: bool,
    #[serde(default = "default_true")]
    pub observed_substitution: bool,
}

impl Default for ForecastToml {
    fn default() -> Self {
        Self {
            probabilities: default_probabilities(),
            season_start_month: default_season_start(),
            season_end_month: default_season_end(),
            include_season_total: true,
            observed_substitution: true,
        }
    }
}

fn default_probabilities() -> Vec<f64> {
    vec![0.1, 0.5, 0.9]
}
fn default_season_start() -> u8 {
    4
}
fn default_season_end() -> u8 {
    7
}
fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CorrectionToml {
    #[serde(default = "default_flow_floor")]
    pub flow_floor: f64,
    #[serde(default = "default_tie_break")]
    pub tie_break: String,
}

impl Default for CorrectionToml {
    fn default() -> Self {
        Self {
            flow_floor: default_flow_floor(),
            tie_break: default_tie_break(),
        }
    }
}

fn default_flow_floor() -> f64 {
    1e-4
}
fn default_tie_break() -> String {
    "midpoint".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlottingToml {
    #[serde(default = "default_b")]
    pub b: f64,
}

impl Default for PlottingToml {
    fn default() -> Self {
        Self { b: default_b() }
    }
}

fn default_b() -> f64 {
    0.4
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnsToml {
    #[serde(default = "default_date_column")]
    pub date: String,
    #[serde(default = "default_simulated_column")]
    pub simulated: String,
    #[serde(default = "default_observed_column")]
    pub observed: String,
}

impl Default for ColumnsToml {
    fn default() -> Self {
        Self {
            date: default_date_column(),
            simulated: default_simulated_column(),
            observed: default_observed_column(),
        }
    }
}

fn default_date_column() -> String {
    "Date".to_string()
}
fn default_simulated_column() -> String {
    "simulated".to_string()
}
fn default_observed_column() -> String {
    "observed".to_string()
}
