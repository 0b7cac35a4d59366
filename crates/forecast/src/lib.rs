//! Per-site forecast assembly for the flowcast engine.
//!
//! Orchestrates the lower crates: for each forecast time step the ensemble
//! is bias-corrected against the site's historical archive
//! ([`flowcast_quantile_map`]), then reduced to the requested exceedance
//! levels ([`flowcast_exceedance`]). A season-total pseudo-step sums the
//! raw members over a configured multi-month window before correcting
//! against the window curve.
//!
//! Failure containment follows the batch's granularity: a bad step is an
//! unavailable row, a structurally bad site is a failed site, and neither
//! stops the rest of the batch.
//!
//! # Quick Start
//!
//! ```
//! use flowcast_archive::{MonthDate, MonthlyRecord, SiteArchive};
//! use flowcast_forecast::{ForecastConfig, SiteTask, assemble_site};
//!
//! let records: Vec<MonthlyRecord> = (2000..=2009)
//!     .flat_map(|y| {
//!         (1u8..=12).map(move |m| {
//!             let sim = m as f64;
//!             MonthlyRecord::new(MonthDate::new(y, m).unwrap(), sim, sim * 2.0)
//!         })
//!     })
//!     .collect();
//! let archive = SiteArchive::new("DEMO", records).unwrap();
//!
//! let task = SiteTask::new(
//!     "DEMO",
//!     vec![MonthDate::new(2023, 4).unwrap()],
//!     vec![vec![3.0, 4.0, 5.0]],
//! )
//! .unwrap();
//!
//! let config = ForecastConfig::new(2009).with_season_total(false);
//! let forecast = assemble_site(&archive, &task, &config).unwrap();
//! assert_eq!(forecast.n_ready(), 1);
//! ```

mod assemble;
mod batch;
mod config;
mod error;
mod table;
mod task;

pub use assemble::assemble_site;
pub use batch::{SiteOutcome, run_batch};
pub use config::ForecastConfig;
pub use error::ForecastError;
pub use table::{ForecastStep, LevelValue, SiteForecast, StepOutcome, StepValues};
pub use task::SiteTask;
