//! Calendar period definitions for pair selection.

use crate::error::ArchiveError;

/// An inclusive multi-month window within a calendar year.
///
/// The forecast domain's conventional window is April through July (the
/// snowmelt season total), but the range is configuration, not a constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeasonWindow {
    start_month: u8,
    end_month: u8,
}

impl SeasonWindow {
    /// Creates a window spanning `start_month..=end_month`.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::InvalidWindow`] unless
    /// `1 <= start_month <= end_month <= 12`.
    pub fn new(start_month: u8, end_month: u8) -> Result<Self, ArchiveError> {
        if start_month < 1 || end_month > 12 || start_month > end_month {
            return Err(ArchiveError::InvalidWindow {
                start: start_month,
                end: end_month,
            });
        }
        Ok(Self {
            start_month,
            end_month,
        })
    }

    /// The April–July window used for seasonal water-supply totals.
    pub fn april_to_july() -> Self {
        Self {
            start_month: 4,
            end_month: 7,
        }
    }

    /// Returns the first month of the window.
    pub fn start_month(self) -> u8 {
        self.start_month
    }

    /// Returns the last month of the window.
    pub fn end_month(self) -> u8 {
        self.end_month
    }

    /// Returns `true` if `month` falls inside the window.
    pub fn contains(self, month: u8) -> bool {
        (self.start_month..=self.end_month).contains(&month)
    }

    /// Iterates the months of the window in order.
    pub fn months(self) -> impl Iterator<Item = u8> {
        self.start_month..=self.end_month
    }
}

impl Default for SeasonWindow {
    fn default() -> Self {
        Self::april_to_july()
    }
}

/// The calendar period a correction curve is built for.
///
/// Replaces the legacy convention of overloading month number 0 to mean
/// "seasonal total" with an explicit variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    /// A single calendar month, 1..=12.
    Month(u8),
    /// A per-year sum over a multi-month window.
    Window(SeasonWindow),
}

impl Period {
    /// Validates the period.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::InvalidMonth`] for an out-of-range
    /// `Period::Month`. Windows are validated at construction.
    pub fn validate(self) -> Result<(), ArchiveError> {
        match self {
            Period::Month(m) if !(1..=12).contains(&m) => {
                Err(ArchiveError::InvalidMonth { month: m })
            }
            _ => Ok(()),
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Period::Month(m) => write!(f, "month {m}"),
            Period::Window(w) => write!(f, "months {}-{}", w.start_month(), w.end_month()),
        }
    }
}
