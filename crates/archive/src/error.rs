//! Error types for the flowcast-archive crate.

/// Error type for all fallible operations in the flowcast-archive crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ArchiveError {
    /// Returned when a month value is outside 1..=12.
    #[error("invalid month: {month} (must be 1..=12)")]
    InvalidMonth {
        /// The invalid month value.
        month: u8,
    },

    /// Returned when a season window is not a valid month range.
    #[error("invalid season window: {start}..={end} (need 1 <= start <= end <= 12)")]
    InvalidWindow {
        /// Window start month.
        start: u8,
        /// Window end month.
        end: u8,
    },

    /// Returned when a date string cannot be parsed.
    #[error("cannot parse date {input:?}: {reason}")]
    DateParse {
        /// The offending input.
        input: String,
        /// Description of the problem.
        reason: String,
    },

    /// Returned when an archive contains two rows for the same month.
    #[error("duplicate archive row for {year}-{month:02}")]
    DuplicateDate {
        /// Year of the duplicated row.
        year: i32,
        /// Month of the duplicated row.
        month: u8,
    },
}
