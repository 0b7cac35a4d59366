//! Parallel batch assembly across sites.

use rayon::prelude::*;
use tracing::{error, info};

use flowcast_archive::SiteArchive;

use crate::assemble::assemble_site;
use crate::config::ForecastConfig;
use crate::table::SiteForecast;
use crate::task::SiteTask;

/// Outcome of one site in a batch.
///
/// A failed site carries its reason instead of aborting the batch; sites
/// are independent and the rest of the run continues.
#[derive(Debug, Clone)]
pub enum SiteOutcome {
    /// The site's forecast assembled (individual steps may still be
    /// unavailable).
    Completed(SiteForecast),
    /// The site failed structurally and produced no table.
    Failed {
        /// The affected site.
        site: String,
        /// Human-readable description of the failure.
        reason: String,
    },
}

impl SiteOutcome {
    /// Returns the site identifier.
    pub fn site(&self) -> &str {
        match self {
            SiteOutcome::Completed(f) => f.site(),
            SiteOutcome::Failed { site, .. } => site,
        }
    }

    /// Returns the assembled forecast, if the site completed.
    pub fn forecast(&self) -> Option<&SiteForecast> {
        match self {
            SiteOutcome::Completed(f) => Some(f),
            SiteOutcome::Failed { .. } => None,
        }
    }
}

/// Assembles a whole batch of sites in parallel.
///
/// Sites share no mutable state and each `(archive, task)` pair is owned
/// by one worker, so the batch is a plain parallel map; collection is the
/// join barrier downstream writers rely on. Results come back in input
/// order. A structurally failed site is logged and reported as
/// [`SiteOutcome::Failed`] without disturbing the others.
pub fn run_batch(tasks: &[(SiteArchive, SiteTask)], config: &ForecastConfig) -> Vec<SiteOutcome> {
    info!(n_sites = tasks.len(), "assembling forecast batch");

    tasks
        .par_iter()
        .map(|(archive, task)| match assemble_site(archive, task, config) {
            Ok(forecast) => {
                info!(
                    site = forecast.site(),
                    ready = forecast.n_ready(),
                    unavailable = forecast.n_unavailable(),
                    "site forecast assembled"
                );
                SiteOutcome::Completed(forecast)
            }
            Err(e) => {
                error!(site = task.site(), error = %e, "site failed");
                SiteOutcome::Failed {
                    site: task.site().to_string(),
                    reason: e.to_string(),
                }
            }
        })
        .collect()
}
