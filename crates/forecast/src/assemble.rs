//! Single-site forecast assembly.

use tracing::{debug, warn};

use flowcast_archive::{MonthDate, Period, SeasonWindow, SiteArchive};
use flowcast_exceedance::{compute, percent_of_average};
use flowcast_quantile_map::cdf_match;

use crate::config::ForecastConfig;
use crate::error::ForecastError;
use crate::table::{ForecastStep, LevelValue, SiteForecast, StepOutcome, StepValues};
use crate::task::SiteTask;

/// Assembles one site's forecast table.
///
/// Each monthly step is bias-corrected against the archive (excluding the
/// step's own year), then reduced to the requested exceedance levels. A
/// monthly step that has already elapsed -- its observed flow is on the
/// archive's record -- takes the observed value for every member instead
/// of the correction, unless substitution is disabled.
///
/// When configured and the step grid contains the full season window for
/// one year, a season-total pseudo-step is appended: the raw member values
/// of the window months still being forecast are summed first and
/// corrected against the window curve, then the observed flows of elapsed
/// window months are added on top, matching the operational convention.
///
/// Per-step failures (empty ensemble row, empty pair set) are logged and
/// contained as [`StepOutcome::Unavailable`]; only structural problems
/// fail the site.
///
/// # Errors
///
/// Returns [`ForecastError`] for an invalid configuration or a malformed
/// task (empty step grid, ensemble shape mismatch — already rejected by
/// [`SiteTask::new`] but revalidated here).
pub fn assemble_site(
    archive: &SiteArchive,
    task: &SiteTask,
    config: &ForecastConfig,
) -> Result<SiteForecast, ForecastError> {
    config.validate()?;
    if task.steps().is_empty() {
        return Err(ForecastError::EmptySteps {
            site: task.site().to_string(),
        });
    }
    if task.ensemble().len() != task.steps().len() {
        return Err(ForecastError::ShapeMismatch {
            site: task.site().to_string(),
            steps: task.steps().len(),
            rows: task.ensemble().len(),
        });
    }

    let mut steps = Vec::with_capacity(task.n_steps() + 1);

    for (date, members) in task.steps().iter().zip(task.ensemble()) {
        let period = Period::Month(date.month());
        let adjust = observed_adjust(archive, *date, config);
        let outcome = correct_and_rank(
            archive,
            task.site(),
            period,
            date.year(),
            members,
            adjust,
            config,
        );
        steps.push(ForecastStep {
            label: date.label(),
            period,
            outcome,
        });
    }

    if config.include_season_total() {
        let window = config.season_window();
        match season_total_members(archive, task, window, config) {
            Some((year, sums, observed_base)) => {
                let period = Period::Window(window);
                let outcome = correct_and_rank(
                    archive,
                    task.site(),
                    period,
                    year,
                    &sums,
                    Adjust::Offset(observed_base),
                    config,
                );
                // Window end month is validated at SeasonWindow construction.
                let end = MonthDate::new(year, window.end_month())
                    .expect("season window holds a valid month");
                steps.push(ForecastStep {
                    label: end.end_label(),
                    period,
                    outcome,
                });
            }
            None => {
                debug!(
                    site = task.site(),
                    "step grid does not cover the season window; skipping season total"
                );
            }
        }
    }

    Ok(SiteForecast::new(task.site().to_string(), steps))
}

/// Post-correction adjustment from observed flows already on record.
#[derive(Debug, Clone, Copy)]
enum Adjust {
    /// Use the corrected members as-is.
    None,
    /// Replace every member with the month's observed flow.
    Substitute(f64),
    /// Add the observed flows of elapsed window months to every member.
    Offset(f64),
}

/// Substitution for an elapsed month whose observed flow is on record.
fn observed_adjust(archive: &SiteArchive, date: MonthDate, config: &ForecastConfig) -> Adjust {
    if !config.observed_substitution() {
        return Adjust::None;
    }
    match archive.observed_for(date).filter(|v| v.is_finite()) {
        Some(obs) => Adjust::Substitute(obs),
        None => Adjust::None,
    }
}

/// Corrects one ensemble and reduces it to exceedance levels.
///
/// Failures here are step-local by design: they return the unavailable
/// sentinel rather than an error.
fn correct_and_rank(
    archive: &SiteArchive,
    site: &str,
    period: Period,
    excluded_year: i32,
    members: &[f64],
    adjust: Adjust,
    config: &ForecastConfig,
) -> StepOutcome {
    if members.is_empty() {
        warn!(site, %period, year = excluded_year, "empty ensemble; step unavailable");
        return StepOutcome::Unavailable {
            reason: "ensemble is empty".to_string(),
        };
    }

    let pairs = archive.pairs_for(period, excluded_year, config.climatology_end_year());
    let matched = match cdf_match(&pairs, members, config.cdf()) {
        Ok(m) => m,
        Err(e) => {
            warn!(site, %period, year = excluded_year, error = %e, "correction failed; step unavailable");
            return StepOutcome::Unavailable {
                reason: e.to_string(),
            };
        }
    };

    let average = matched.climatological_average();
    let mut members = matched.into_matched();
    match adjust {
        Adjust::None => {}
        Adjust::Substitute(obs) => {
            debug!(site, %period, observed = obs, "elapsed month: substituting observed flow");
            members.fill(obs);
        }
        Adjust::Offset(base) if base != 0.0 => {
            debug!(site, %period, observed_base = base, "adding elapsed window months to total");
            for m in members.iter_mut() {
                *m += base;
            }
        }
        Adjust::Offset(_) => {}
    }

    let estimates = match compute(&members, config.probabilities(), config.plotting()) {
        Ok(est) => est,
        Err(e) => {
            warn!(site, %period, year = excluded_year, error = %e, "exceedance failed; step unavailable");
            return StepOutcome::Unavailable {
                reason: e.to_string(),
            };
        }
    };

    if average <= 0.0 {
        warn!(site, %period, year = excluded_year, average, "non-positive climatological average; percent-of-average unavailable");
    }

    let levels = estimates
        .iter()
        .map(|est| LevelValue {
            probability: est.probability,
            value: est.value,
            percent_of_average: percent_of_average(est.value, average),
        })
        .collect();

    StepOutcome::Ready(StepValues {
        members,
        levels,
        average,
    })
}

/// Raw per-member sums over the season window, if the step grid covers it.
///
/// Requires exactly one step per window month, all in the same year, with
/// equal member counts. Elapsed window months with an observed flow on
/// record are left out of the sums and returned as a separate base
/// amount, to be added after the forecast months are matched against the
/// window curve. Returns the window's year, the summed members, and that
/// observed base.
fn season_total_members(
    archive: &SiteArchive,
    task: &SiteTask,
    window: SeasonWindow,
    config: &ForecastConfig,
) -> Option<(i32, Vec<f64>, f64)> {
    let mut indices = Vec::new();
    for m in window.months() {
        let mut found = None;
        for (i, d) in task.steps().iter().enumerate() {
            if d.month() == m {
                if found.is_some() {
                    return None;
                }
                found = Some(i);
            }
        }
        indices.push(found?);
    }

    let year = task.steps()[indices[0]].year();
    if indices.iter().any(|&i| task.steps()[i].year() != year) {
        return None;
    }

    let n = task.ensemble()[indices[0]].len();
    if n == 0 || indices.iter().any(|&i| task.ensemble()[i].len() != n) {
        return None;
    }

    let mut observed_base = 0.0;
    let mut sums = vec![0.0; n];
    for &i in &indices {
        match observed_adjust(archive, task.steps()[i], config) {
            Adjust::Substitute(obs) => observed_base += obs,
            _ => {
                for (sum, v) in sums.iter_mut().zip(&task.ensemble()[i]) {
                    *sum += v;
                }
            }
        }
    }
    Some((year, sums, observed_base))
}
