//! Monthly date with year context.

use crate::error::ArchiveError;

/// A calendar month within a specific year.
///
/// The archive is monthly data, so a day-of-month is never stored; parsing
/// accepts and discards a day component for compatibility with daily-stamped
/// input files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonthDate {
    year: i32,
    month: u8,
}

impl PartialOrd for MonthDate {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MonthDate {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.year, self.month).cmp(&(other.year, other.month))
    }
}

impl MonthDate {
    /// Creates a new `MonthDate` from a year and a month.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::InvalidMonth`] if `month` is outside 1..=12.
    pub fn new(year: i32, month: u8) -> Result<Self, ArchiveError> {
        if !(1..=12).contains(&month) {
            return Err(ArchiveError::InvalidMonth { month });
        }
        Ok(Self { year, month })
    }

    /// Parses `"YYYY-MM"` or `"YYYY-MM-DD"`; a day component is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::DateParse`] on malformed input and
    /// [`ArchiveError::InvalidMonth`] on an out-of-range month.
    pub fn parse(input: &str) -> Result<Self, ArchiveError> {
        let parse_err = |reason: &str| ArchiveError::DateParse {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        let mut parts = input.trim().splitn(3, '-');
        let year_str = parts.next().ok_or_else(|| parse_err("empty string"))?;
        let month_str = parts
            .next()
            .ok_or_else(|| parse_err("missing month component"))?;

        let year: i32 = year_str
            .parse()
            .map_err(|_| parse_err("year is not an integer"))?;
        let month: u8 = month_str
            .parse()
            .map_err(|_| parse_err("month is not an integer"))?;

        Self::new(year, month)
    }

    /// Returns the year.
    pub fn year(self) -> i32 {
        self.year
    }

    /// Returns the month (1..=12).
    pub fn month(self) -> u8 {
        self.month
    }

    /// First-of-month date label, e.g. `"2023-04-01"`.
    pub fn label(self) -> String {
        format!("{}-{:02}-01", self.year, self.month)
    }

    /// Last-of-month date label, e.g. `"2023-07-31"`.
    ///
    /// Used to stamp a season-total pseudo-step with the final day of the
    /// window's closing month.
    pub fn end_label(self) -> String {
        format!(
            "{}-{:02}-{:02}",
            self.year,
            self.month,
            days_in_month(self.year, self.month)
        )
    }
}

/// Number of days in a Gregorian calendar month.
pub fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}
