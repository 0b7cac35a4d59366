use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{error, info, warn};

use flowcast_archive::SiteArchive;
use flowcast_forecast::{SiteOutcome, SiteTask, run_batch};
use flowcast_io::{read_archive, read_ensemble, write_forecast};

use crate::cli::ForecastArgs;
use crate::config::FlowcastConfig;
use crate::convert;

/// Run the forecast batch over all configured sites.
pub fn run(args: ForecastArgs) -> Result<()> {
    let toml_text = fs::read_to_string(&args.config)
        .with_context(|| format!("failed to read config: {}", args.config.display()))?;
    let config: FlowcastConfig = toml::from_str(&toml_text)
        .with_context(|| format!("failed to parse config: {}", args.config.display()))?;

    let forecast_cfg = convert::build_forecast_config(&config)?;
    let reader_cfg = convert::build_reader_config(&config.columns);
    let output_dir = args.output.as_deref().unwrap_or(&config.paths.output_dir);

    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output dir: {}", output_dir.display()))?;

    // Load each site's inputs. A missing or unreadable archive is fatal
    // for that site only; the rest of the batch proceeds.
    let mut tasks: Vec<(SiteArchive, SiteTask)> = Vec::with_capacity(config.sites.len());
    let mut skipped = 0usize;
    for site in &config.sites {
        match load_site(site, &config, &reader_cfg) {
            Ok(pair) => tasks.push(pair),
            Err(e) => {
                error!(site = %site, error = %format!("{e:#}"), "skipping site");
                skipped += 1;
            }
        }
    }

    let outcomes = run_batch(&tasks, &forecast_cfg);

    let mut written = 0usize;
    let mut failed = 0usize;
    let mut unavailable_steps = 0usize;
    for outcome in &outcomes {
        match outcome {
            SiteOutcome::Completed(forecast) => {
                unavailable_steps += forecast.n_unavailable();
                let path = output_dir.join(format!("{}_forecast.csv", forecast.site()));
                write_forecast(&path, forecast)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                written += 1;
            }
            SiteOutcome::Failed { site, reason } => {
                warn!(site = %site, reason = %reason, "site produced no table");
                failed += 1;
            }
        }
    }

    info!(
        written,
        failed,
        skipped,
        unavailable_steps,
        output = %output_dir.display(),
        "forecast batch complete"
    );
    println!(
        "{written} site table(s) written to {} ({failed} failed, {skipped} skipped, {unavailable_steps} unavailable step(s))",
        output_dir.display()
    );
    Ok(())
}

/// Reads one site's archive and ensemble into a batch task.
fn load_site(
    site: &str,
    config: &FlowcastConfig,
    reader_cfg: &flowcast_io::ReaderConfig,
) -> Result<(SiteArchive, SiteTask)> {
    let archive_path = site_file(&config.paths.archive_dir, site);
    let ensemble_path = site_file(&config.paths.ensemble_dir, site);

    let archive = read_archive(&archive_path, site, reader_cfg)
        .with_context(|| format!("failed to read archive for site {site}"))?;
    info!(site, rows = archive.len(), "archive loaded");

    let table = read_ensemble(&ensemble_path)
        .with_context(|| format!("failed to read ensemble for site {site}"))?;
    info!(
        site,
        steps = table.steps().len(),
        members = table.n_members(),
        "ensemble loaded"
    );

    let (steps, members) = table.into_parts();
    let task = SiteTask::new(site, steps, members)?;
    Ok((archive, task))
}

fn site_file(dir: &Path, site: &str) -> std::path::PathBuf {
    dir.join(format!("{site}.csv"))
}
