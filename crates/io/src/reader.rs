//! CSV readers for historical archives and ensemble matrices.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use flowcast_archive::{MonthDate, MonthlyRecord, SiteArchive};

use crate::error::IoError;

/// Configuration for reading a historical archive CSV.
///
/// Columns are addressed by header name, not position, so archives with
/// extra columns or reordered columns read cleanly.
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    date_column: String,
    simulated_column: String,
    observed_column: String,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            date_column: "Date".to_string(),
            simulated_column: "simulated".to_string(),
            observed_column: "observed".to_string(),
        }
    }
}

impl ReaderConfig {
    /// Sets the header name of the date column.
    pub fn with_date_column(mut self, name: &str) -> Self {
        self.date_column = name.to_string();
        self
    }

    /// Sets the header name of the simulated-flow column.
    pub fn with_simulated_column(mut self, name: &str) -> Self {
        self.simulated_column = name.to_string();
        self
    }

    /// Sets the header name of the observed-flow column.
    pub fn with_observed_column(mut self, name: &str) -> Self {
        self.observed_column = name.to_string();
        self
    }

    /// Returns the date column name.
    pub fn date_column(&self) -> &str {
        &self.date_column
    }

    /// Returns the simulated-flow column name.
    pub fn simulated_column(&self) -> &str {
        &self.simulated_column
    }

    /// Returns the observed-flow column name.
    pub fn observed_column(&self) -> &str {
        &self.observed_column
    }
}

/// An ensemble matrix read from CSV: one row per forecast step, one
/// member column per ensemble member.
#[derive(Debug, Clone)]
pub struct EnsembleTable {
    steps: Vec<MonthDate>,
    members: Vec<Vec<f64>>,
}

impl EnsembleTable {
    /// Returns the forecast step dates, in file order.
    pub fn steps(&self) -> &[MonthDate] {
        &self.steps
    }

    /// Returns the member rows, one per step.
    pub fn members(&self) -> &[Vec<f64>] {
        &self.members
    }

    /// Returns the member count.
    pub fn n_members(&self) -> usize {
        self.members.first().map_or(0, Vec::len)
    }

    /// Consumes the table into its step and member vectors.
    pub fn into_parts(self) -> (Vec<MonthDate>, Vec<Vec<f64>>) {
        (self.steps, self.members)
    }
}

/// Reads a per-site historical archive CSV.
///
/// Expected shape: a header row naming at least the three configured
/// columns, then one row per month with a `YYYY-MM` or `YYYY-MM-DD` date
/// and the simulated and observed flows. Blank lines are skipped.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] for a missing file,
/// [`IoError::MissingColumn`] when the header lacks a configured column,
/// [`IoError::Parse`] (with a line number) for an unparseable cell,
/// [`IoError::EmptyFile`] when no data rows remain, and
/// [`IoError::Archive`] when the rows fail archive validation (for
/// example a duplicated month).
pub fn read_archive(
    path: &Path,
    site: &str,
    config: &ReaderConfig,
) -> Result<SiteArchive, IoError> {
    let rows = read_rows(path)?;
    let (header, data) = split_header(&rows, path)?;

    let date_idx = column_index(&header, config.date_column(), path)?;
    let sim_idx = column_index(&header, config.simulated_column(), path)?;
    let obs_idx = column_index(&header, config.observed_column(), path)?;

    let mut records = Vec::with_capacity(data.len());
    for &(line, ref cells) in data {
        if cells.len() != header.len() {
            return Err(IoError::RaggedRow {
                path: path.to_path_buf(),
                line,
                expected: header.len(),
                got: cells.len(),
            });
        }

        let date = MonthDate::parse(&cells[date_idx]).map_err(|e| IoError::Parse {
            path: path.to_path_buf(),
            line,
            reason: e.to_string(),
        })?;
        let simulated = parse_flow(&cells[sim_idx], path, line)?;
        let observed = parse_flow(&cells[obs_idx], path, line)?;

        records.push(MonthlyRecord::new(date, simulated, observed));
    }

    if records.is_empty() {
        return Err(IoError::EmptyFile {
            path: path.to_path_buf(),
        });
    }

    debug!(site, rows = records.len(), path = %path.display(), "archive read");

    SiteArchive::new(site, records).map_err(|e| IoError::Archive {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Reads an ensemble matrix CSV.
///
/// Expected shape: a header row (`Date` followed by one column per
/// member), then one row per forecast step. Every row must carry the full
/// member count; ragged rows are rejected rather than padded.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`], [`IoError::Parse`],
/// [`IoError::RaggedRow`], or [`IoError::EmptyFile`] as for
/// [`read_archive`].
pub fn read_ensemble(path: &Path) -> Result<EnsembleTable, IoError> {
    let rows = read_rows(path)?;
    let (header, data) = split_header(&rows, path)?;

    if header.len() < 2 {
        return Err(IoError::Parse {
            path: path.to_path_buf(),
            line: 1,
            reason: "ensemble header needs a date column and at least one member".to_string(),
        });
    }
    let n_members = header.len() - 1;

    let mut steps = Vec::with_capacity(data.len());
    let mut members = Vec::with_capacity(data.len());
    for &(line, ref cells) in data {
        if cells.len() != header.len() {
            return Err(IoError::RaggedRow {
                path: path.to_path_buf(),
                line,
                expected: header.len(),
                got: cells.len(),
            });
        }

        let date = MonthDate::parse(&cells[0]).map_err(|e| IoError::Parse {
            path: path.to_path_buf(),
            line,
            reason: e.to_string(),
        })?;

        let mut row = Vec::with_capacity(n_members);
        for cell in &cells[1..] {
            row.push(parse_flow(cell, path, line)?);
        }

        steps.push(date);
        members.push(row);
    }

    if steps.is_empty() {
        return Err(IoError::EmptyFile {
            path: path.to_path_buf(),
        });
    }

    debug!(steps = steps.len(), n_members, path = %path.display(), "ensemble read");

    Ok(EnsembleTable { steps, members })
}

/// Reads all non-blank lines as trimmed comma-split cell vectors, tagged
/// with their 1-based line numbers.
fn read_rows(path: &Path) -> Result<Vec<(usize, Vec<String>)>, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let file = File::open(path).map_err(|e| IoError::Io {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut rows = Vec::new();
    for (i, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| IoError::Io {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        if line.trim().is_empty() {
            continue;
        }
        let cells = line.split(',').map(|c| c.trim().to_string()).collect();
        rows.push((i + 1, cells));
    }
    Ok(rows)
}

/// Splits the first row off as the header.
#[allow(clippy::type_complexity)]
fn split_header<'a>(
    rows: &'a [(usize, Vec<String>)],
    path: &Path,
) -> Result<(&'a [String], &'a [(usize, Vec<String>)]), IoError> {
    match rows.split_first() {
        Some(((_, header), data)) => Ok((header, data)),
        None => Err(IoError::EmptyFile {
            path: path.to_path_buf(),
        }),
    }
}

fn column_index(header: &[String], name: &str, path: &Path) -> Result<usize, IoError> {
    header
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| IoError::MissingColumn {
            name: name.to_string(),
            path: path.to_path_buf(),
        })
}

fn parse_flow(cell: &str, path: &Path, line: usize) -> Result<f64, IoError> {
    let value: f64 = cell.parse().map_err(|_| IoError::Parse {
        path: path.to_path_buf(),
        line,
        reason: format!("bad flow value '{cell}'"),
    })?;
    // "NaN" and "inf" parse successfully but poison every computation
    // downstream; reject them at the boundary.
    if !value.is_finite() {
        return Err(IoError::Parse {
            path: path.to_path_buf(),
            line,
            reason: format!("non-finite flow value '{cell}'"),
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().expect("temp file");
        f.write_all(content.as_bytes()).expect("write temp file");
        f
    }

    #[test]
    fn read_archive_basic() {
        let f = write_temp(
            "Date,simulated,observed\n\
             2000-04-01,1.5,2.5\n\
             2000-05-01,2.0,3.0\n",
        );
        let archive = read_archive(f.path(), "TRF", &ReaderConfig::default()).unwrap();
        assert_eq!(archive.site(), "TRF");
        assert_eq!(archive.len(), 2);
        assert_eq!(archive.records()[0].simulated, 1.5);
        assert_eq!(archive.records()[1].observed, 3.0);
    }

    #[test]
    fn read_archive_reordered_and_extra_columns() {
        let f = write_temp(
            "observed,flag,Date,simulated\n\
             2.5,x,2000-04,1.5\n",
        );
        let archive = read_archive(f.path(), "TRF", &ReaderConfig::default()).unwrap();
        assert_eq!(archive.records()[0].observed, 2.5);
        assert_eq!(archive.records()[0].simulated, 1.5);
    }

    #[test]
    fn read_archive_custom_column_names() {
        let f = write_temp(
            "Date,qsim,qobs\n\
             2000-04,1.0,2.0\n",
        );
        let config = ReaderConfig::default()
            .with_simulated_column("qsim")
            .with_observed_column("qobs");
        let archive = read_archive(f.path(), "TRF", &config).unwrap();
        assert_eq!(archive.len(), 1);
    }

    #[test]
    fn read_archive_skips_blank_lines() {
        let f = write_temp(
            "Date,simulated,observed\n\
             \n\
             2000-04,1.0,2.0\n\
             \n",
        );
        let archive = read_archive(f.path(), "TRF", &ReaderConfig::default()).unwrap();
        assert_eq!(archive.len(), 1);
    }

    #[test]
    fn read_archive_missing_file() {
        let result = read_archive(
            Path::new("/nonexistent/TRF.csv"),
            "TRF",
            &ReaderConfig::default(),
        );
        assert!(matches!(result, Err(IoError::FileNotFound { .. })));
    }

    #[test]
    fn read_archive_missing_column() {
        let f = write_temp("Date,simulated\n2000-04,1.0\n");
        let result = read_archive(f.path(), "TRF", &ReaderConfig::default());
        assert!(matches!(
            result,
            Err(IoError::MissingColumn { name, .. }) if name == "observed"
        ));
    }

    #[test]
    fn read_archive_bad_value_carries_line() {
        let f = write_temp(
            "Date,simulated,observed\n\
             2000-04,1.0,2.0\n\
             2000-05,oops,3.0\n",
        );
        let result = read_archive(f.path(), "TRF", &ReaderConfig::default());
        assert!(matches!(result, Err(IoError::Parse { line: 3, .. })));
    }

    #[test]
    fn read_archive_non_finite_value_rejected() {
        for bad in ["NaN", "inf", "-inf"] {
            let f = write_temp(&format!(
                "Date,simulated,observed\n2000-04,{bad},2.0\n"
            ));
            let result = read_archive(f.path(), "TRF", &ReaderConfig::default());
            assert!(
                matches!(result, Err(IoError::Parse { line: 2, .. })),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn read_archive_duplicate_month() {
        let f = write_temp(
            "Date,simulated,observed\n\
             2000-04,1.0,2.0\n\
             2000-04,1.5,2.5\n",
        );
        let result = read_archive(f.path(), "TRF", &ReaderConfig::default());
        assert!(matches!(result, Err(IoError::Archive { .. })));
    }

    #[test]
    fn read_archive_header_only() {
        let f = write_temp("Date,simulated,observed\n");
        let result = read_archive(f.path(), "TRF", &ReaderConfig::default());
        assert!(matches!(result, Err(IoError::EmptyFile { .. })));
    }

    #[test]
    fn read_ensemble_basic() {
        let f = write_temp(
            "Date,Ens01,Ens02,Ens03\n\
             2023-04-01,1.0,2.0,3.0\n\
             2023-05-01,4.0,5.0,6.0\n",
        );
        let table = read_ensemble(f.path()).unwrap();
        assert_eq!(table.steps().len(), 2);
        assert_eq!(table.n_members(), 3);
        assert_eq!(table.members()[1], vec![4.0, 5.0, 6.0]);
        assert_eq!(table.steps()[0].month(), 4);
    }

    #[test]
    fn read_ensemble_ragged_row_rejected() {
        let f = write_temp(
            "Date,Ens01,Ens02\n\
             2023-04,1.0,2.0\n\
             2023-05,4.0\n",
        );
        let result = read_ensemble(f.path());
        assert!(matches!(
            result,
            Err(IoError::RaggedRow {
                line: 3,
                expected: 3,
                got: 2,
                ..
            })
        ));
    }

    #[test]
    fn read_ensemble_nan_member_rejected() {
        let f = write_temp(
            "Date,Ens01,Ens02\n\
             2023-04,1.0,NaN\n",
        );
        assert!(matches!(
            read_ensemble(f.path()),
            Err(IoError::Parse { line: 2, .. })
        ));
    }

    #[test]
    fn read_ensemble_no_member_columns() {
        let f = write_temp("Date\n2023-04\n");
        assert!(matches!(
            read_ensemble(f.path()),
            Err(IoError::Parse { line: 1, .. })
        ));
    }

    #[test]
    fn read_ensemble_empty() {
        let f = write_temp("");
        assert!(matches!(
            read_ensemble(f.path()),
            Err(IoError::EmptyFile { .. })
        ));
    }
}
