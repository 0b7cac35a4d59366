use anyhow::{Result, bail};
use tracing::info;

use flowcast_archive::Period;
use flowcast_exceedance::percent_of_average;
use flowcast_io::{ReaderConfig, read_archive};
use flowcast_quantile_map::{CdfMatchConfig, cdf_match};

use crate::cli::CorrectArgs;
use crate::convert;

/// Bias-correct a single simulated value against an archive.
pub fn run(args: CorrectArgs) -> Result<()> {
    let period = match (args.month, args.window.as_deref()) {
        (Some(m), None) => Period::Month(m),
        (None, Some(w)) => Period::Window(convert::parse_window(w)?),
        (None, None) => bail!("one of --month or --window is required"),
        (Some(_), Some(_)) => unreachable!("clap rejects --month with --window"),
    };
    period.validate()?;

    let site = args
        .archive
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "archive".to_string());
    let archive = read_archive(&args.archive, &site, &ReaderConfig::default())?;

    let end_year = args.end_year.unwrap_or(args.year - 1);
    let pairs = archive.pairs_for(period, args.year, end_year);
    info!(
        site = %site,
        %period,
        year = args.year,
        end_year,
        n_pairs = pairs.len(),
        "correcting value"
    );

    let result = cdf_match(&pairs, &[args.value], &CdfMatchConfig::new())?;
    let matched = result.matched()[0];
    let average = result.climatological_average();

    println!("matched value:          {matched:.3}");
    println!("climatological average: {average:.3}");
    match percent_of_average(matched, average) {
        Some(pct) => println!("percent of average:     {pct:.1}%"),
        None => println!("percent of average:     NA (average is zero or undefined)"),
    }
    Ok(())
}
