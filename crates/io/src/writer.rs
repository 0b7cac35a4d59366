//! CSV writer for assembled forecast tables.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::debug;

use flowcast_forecast::SiteForecast;

use crate::error::IoError;

/// Cell value written for an unavailable step or an undefined
/// percent-of-average. A missing result must never read as a zero.
const NA: &str = "NA";

/// Writes one site's forecast table as CSV.
///
/// Layout: `Date`, one `EnsNN` column per corrected member, one `ExcPP`
/// column per requested exceedance probability (PP = percent, e.g.
/// `Exc10` for p = 0.10), the matching `PavPP` percent-of-average
/// columns, and the climatological `Avg`. Flows are written with three
/// decimals. Unavailable steps fill their value cells with `NA`, as does
/// an undefined percent-of-average.
///
/// # Errors
///
/// Returns [`IoError::Io`] when the file cannot be created or written.
pub fn write_forecast(path: &Path, forecast: &SiteForecast) -> Result<(), IoError> {
    let io_err = |e: std::io::Error| IoError::Io {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };

    let file = File::create(path).map_err(io_err)?;
    let mut out = BufWriter::new(file);

    let n_members = forecast.n_members();
    let probabilities: Vec<f64> = forecast
        .steps()
        .iter()
        .find_map(|s| s.outcome.values())
        .map(|v| v.levels.iter().map(|l| l.probability).collect())
        .unwrap_or_default();

    write!(out, "Date").map_err(io_err)?;
    for i in 1..=n_members {
        write!(out, ",Ens{i:02}").map_err(io_err)?;
    }
    for &p in &probabilities {
        write!(out, ",Exc{:02}", percent_label(p)).map_err(io_err)?;
    }
    for &p in &probabilities {
        write!(out, ",Pav{:02}", percent_label(p)).map_err(io_err)?;
    }
    writeln!(out, ",Avg").map_err(io_err)?;

    for step in forecast.steps() {
        write!(out, "{}", step.label).map_err(io_err)?;
        match step.outcome.values() {
            Some(values) => {
                for m in &values.members {
                    write!(out, ",{m:.3}").map_err(io_err)?;
                }
                for level in &values.levels {
                    write!(out, ",{:.3}", level.value).map_err(io_err)?;
                }
                for level in &values.levels {
                    match level.percent_of_average {
                        Some(pct) => write!(out, ",{pct:.3}").map_err(io_err)?,
                        None => write!(out, ",{NA}").map_err(io_err)?,
                    }
                }
                writeln!(out, ",{:.3}", values.average).map_err(io_err)?;
            }
            None => {
                let n_cells = n_members + 2 * probabilities.len() + 1;
                for _ in 0..n_cells {
                    write!(out, ",{NA}").map_err(io_err)?;
                }
                writeln!(out).map_err(io_err)?;
            }
        }
    }

    out.flush().map_err(io_err)?;
    debug!(site = forecast.site(), rows = forecast.steps().len(), path = %path.display(), "forecast written");
    Ok(())
}

/// Rounds a probability to its whole-percent column label.
fn percent_label(p: f64) -> u32 {
    (p * 100.0).round() as u32
}
