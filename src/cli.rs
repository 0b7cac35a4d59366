use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Flowcast ensemble streamflow forecaster.
#[derive(Parser)]
#[command(
    name = "flowcast",
    version,
    about = "Ensemble streamflow bias correction and exceedance forecasting"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Run the forecast batch over all configured sites.
    Forecast(ForecastArgs),
    /// Bias-correct a single simulated value against an archive.
    Correct(CorrectArgs),
}

/// Arguments for the `forecast` subcommand.
#[derive(clap::Args)]
pub struct ForecastArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "flowcast.toml")]
    pub config: PathBuf,

    /// Override output directory from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `correct` subcommand.
#[derive(clap::Args)]
pub struct CorrectArgs {
    /// Path to the site's historical archive CSV.
    #[arg(short, long)]
    pub archive: PathBuf,

    /// Simulated value to correct.
    #[arg(long)]
    pub value: f64,

    /// Year the value belongs to (excluded from the curve).
    #[arg(short, long)]
    pub year: i32,

    /// Calendar month of the value (1-12).
    #[arg(short, long, conflicts_with = "window")]
    pub month: Option<u8>,

    /// Season window as START:END months, e.g. 4:7 for April-July.
    #[arg(short, long)]
    pub window: Option<String>,

    /// Last year of the climatology (defaults to the year before --year).
    #[arg(short, long)]
    pub end_year: Option<i32>,
}
