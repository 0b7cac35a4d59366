//! Error types for the flowcast-io crate.

use std::path::PathBuf;

/// Error type for all fallible operations in the flowcast-io crate.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps an operating-system I/O failure.
    #[error("i/o error on {}: {reason}", path.display())]
    Io {
        /// Path being read or written.
        path: PathBuf,
        /// Description of the underlying failure.
        reason: String,
    },

    /// Returned when a CSV cell or row cannot be parsed.
    #[error("{}:{line}: {reason}", path.display())]
    Parse {
        /// Path to the offending file.
        path: PathBuf,
        /// 1-based line number of the offending row.
        line: usize,
        /// Description of the problem.
        reason: String,
    },

    /// Returned when a required header column is not present.
    #[error("column '{name}' not found in {}", path.display())]
    MissingColumn {
        /// Name of the missing column.
        name: String,
        /// Path to the file that was inspected.
        path: PathBuf,
    },

    /// Returned when a row has a different cell count than the header.
    #[error("{}:{line}: expected {expected} cells, got {got}", path.display())]
    RaggedRow {
        /// Path to the offending file.
        path: PathBuf,
        /// 1-based line number of the offending row.
        line: usize,
        /// Cell count implied by the header.
        expected: usize,
        /// Cell count actually found.
        got: usize,
    },

    /// Returned when a file holds no data rows.
    #[error("no data rows in {}", path.display())]
    EmptyFile {
        /// Path to the empty file.
        path: PathBuf,
    },

    /// Wraps a validation failure from the archive layer.
    #[error("invalid archive {}: {reason}", path.display())]
    Archive {
        /// Path to the archive being loaded.
        path: PathBuf,
        /// Description of the underlying archive error.
        reason: String,
    },
}
