//! Archive row and pair types.

use crate::date::MonthDate;

/// One monthly archive row: a simulated flow and the observed reference
/// flow for the same site and calendar month.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyRecord {
    /// The calendar month this row covers.
    pub date: MonthDate,
    /// Simulated (model) flow for the month.
    pub simulated: f64,
    /// Observed reference flow for the month.
    pub observed: f64,
}

impl MonthlyRecord {
    /// Creates a new record.
    pub fn new(date: MonthDate, simulated: f64, observed: f64) -> Self {
        Self {
            date,
            simulated,
            observed,
        }
    }
}

/// A `(simulated, observed)` pair for one qualifying year of a period.
///
/// The year itself is deliberately not carried: downstream quantile
/// mapping sorts the two columns independently, so pairs lose their year
/// identity the moment they are consumed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowPair {
    /// Simulated flow (monthly value or window sum).
    pub simulated: f64,
    /// Observed flow (monthly value or window sum).
    pub observed: f64,
}

impl FlowPair {
    /// Creates a new pair.
    pub fn new(simulated: f64, observed: f64) -> Self {
        Self {
            simulated,
            observed,
        }
    }
}

impl From<MonthlyRecord> for FlowPair {
    fn from(r: MonthlyRecord) -> Self {
        Self {
            simulated: r.simulated,
            observed: r.observed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_from_record() {
        let date = MonthDate::new(2010, 5).unwrap();
        let rec = MonthlyRecord::new(date, 12.5, 14.0);
        let pair = FlowPair::from(rec);
        assert_eq!(pair.simulated, 12.5);
        assert_eq!(pair.observed, 14.0);
    }
}
