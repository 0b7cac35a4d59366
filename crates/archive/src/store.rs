//! Per-site historical archive and pair filtering.

use std::collections::{BTreeMap, BTreeSet};

use crate::date::MonthDate;
use crate::error::ArchiveError;
use crate::period::Period;
use crate::record::{FlowPair, MonthlyRecord};

/// The historical `(simulated, observed)` archive for a single site.
///
/// A passive data provider: construction validates the rows, and
/// [`SiteArchive::pairs_for`] produces the filtered pairs a correction
/// curve is fit from. Rows are never mutated after construction.
#[derive(Debug, Clone)]
pub struct SiteArchive {
    site: String,
    records: Vec<MonthlyRecord>,
}

impl SiteArchive {
    /// Creates a new archive after validating the rows.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::DuplicateDate`] if two rows cover the same
    /// `(year, month)`.
    pub fn new(site: impl Into<String>, records: Vec<MonthlyRecord>) -> Result<Self, ArchiveError> {
        let mut seen: BTreeSet<(i32, u8)> = BTreeSet::new();
        for r in &records {
            if !seen.insert((r.date.year(), r.date.month())) {
                return Err(ArchiveError::DuplicateDate {
                    year: r.date.year(),
                    month: r.date.month(),
                });
            }
        }
        Ok(Self {
            site: site.into(),
            records,
        })
    }

    /// Returns the site identifier.
    pub fn site(&self) -> &str {
        &self.site
    }

    /// Returns all archive rows.
    pub fn records(&self) -> &[MonthlyRecord] {
        &self.records
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the archive holds no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Produces the `(simulated, observed)` pairs for one period.
    ///
    /// Filtering rules:
    /// - years strictly after `climatology_end_year` are dropped;
    /// - `excluded_year` is dropped entirely, so the year under correction
    ///   never contributes to its own curve;
    /// - [`Period::Month`] yields one pair per qualifying year that has the
    ///   month on record;
    /// - [`Period::Window`] sums observed and simulated independently over
    ///   the window months of each qualifying year. Years with only part of
    ///   the window on record contribute partial sums.
    ///
    /// The result ordering carries no meaning; consumers sort the two
    /// columns independently. Fewer than 2 pairs is allowed (the curve
    /// degenerates to a constant log-ratio downstream); an empty result is
    /// the consumer's error to raise.
    pub fn pairs_for(
        &self,
        period: Period,
        excluded_year: i32,
        climatology_end_year: i32,
    ) -> Vec<FlowPair> {
        let qualifying = self.records.iter().filter(|r| {
            r.date.year() <= climatology_end_year && r.date.year() != excluded_year
        });

        match period {
            Period::Month(m) => qualifying
                .filter(|r| r.date.month() == m)
                .map(|r| FlowPair::from(*r))
                .collect(),
            Period::Window(w) => {
                let mut sums: BTreeMap<i32, (f64, f64)> = BTreeMap::new();
                for r in qualifying.filter(|r| w.contains(r.date.month())) {
                    let entry = sums.entry(r.date.year()).or_insert((0.0, 0.0));
                    entry.0 += r.simulated;
                    entry.1 += r.observed;
                }
                sums.into_values()
                    .map(|(sim, obs)| FlowPair::new(sim, obs))
                    .collect()
            }
        }
    }

    /// Looks up the observed value for one month, if on record.
    pub fn observed_for(&self, date: MonthDate) -> Option<f64> {
        self.records
            .iter()
            .find(|r| r.date == date)
            .map(|r| r.observed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::period::SeasonWindow;
    use approx::assert_relative_eq;

    /// Helper: one record per month for each year in `years`, with
    /// simulated = year + month/100 and observed = simulated * 2.
    fn make_archive(years: &[i32]) -> SiteArchive {
        let mut records = Vec::new();
        for &y in years {
            for m in 1u8..=12 {
                let sim = y as f64 + m as f64 / 100.0;
                records.push(MonthlyRecord::new(
                    MonthDate::new(y, m).unwrap(),
                    sim,
                    sim * 2.0,
                ));
            }
        }
        SiteArchive::new("TST", records).unwrap()
    }

    #[test]
    fn new_rejects_duplicate_rows() {
        let date = MonthDate::new(2001, 3).unwrap();
        let records = vec![
            MonthlyRecord::new(date, 1.0, 2.0),
            MonthlyRecord::new(date, 3.0, 4.0),
        ];
        assert!(matches!(
            SiteArchive::new("TST", records),
            Err(ArchiveError::DuplicateDate {
                year: 2001,
                month: 3
            })
        ));
    }

    #[test]
    fn monthly_pairs_one_per_year() {
        let archive = make_archive(&[2000, 2001, 2002, 2003]);
        let pairs = archive.pairs_for(Period::Month(5), 2003, 2002);
        // 2003 excluded twice over (excluded year AND beyond climatology);
        // 2000..=2002 qualify.
        assert_eq!(pairs.len(), 3);
        for p in &pairs {
            assert_relative_eq!(p.observed, p.simulated * 2.0);
        }
    }

    #[test]
    fn excluded_year_is_dropped() {
        let archive = make_archive(&[2000, 2001, 2002]);
        let pairs = archive.pairs_for(Period::Month(5), 2001, 2002);
        assert_eq!(pairs.len(), 2);
        for p in &pairs {
            assert!((p.simulated - (2001.0 + 0.05)).abs() > 0.5);
        }
    }

    #[test]
    fn climatology_cutoff_is_strict() {
        let archive = make_archive(&[2000, 2001, 2002]);
        // End year 2001 keeps 2001 itself.
        let pairs = archive.pairs_for(Period::Month(5), 1999, 2001);
        assert_eq!(pairs.len(), 2);
    }

    #[test]
    fn window_pairs_sum_columns_independently() {
        let archive = make_archive(&[2000, 2001]);
        let window = SeasonWindow::april_to_july();
        let pairs = archive.pairs_for(Period::Window(window), 2002, 2001);
        assert_eq!(pairs.len(), 2);
        // Year 2000: sim sum = 4*2000 + (4+5+6+7)/100
        let expected_sim = 4.0 * 2000.0 + 0.22;
        assert_relative_eq!(pairs[0].simulated, expected_sim, epsilon = 1e-9);
        assert_relative_eq!(pairs[0].observed, expected_sim * 2.0, epsilon = 1e-9);
    }

    #[test]
    fn window_partial_year_contributes_partial_sum() {
        // Year with only April and May on record.
        let records = vec![
            MonthlyRecord::new(MonthDate::new(2000, 4).unwrap(), 1.0, 10.0),
            MonthlyRecord::new(MonthDate::new(2000, 5).unwrap(), 2.0, 20.0),
        ];
        let archive = SiteArchive::new("TST", records).unwrap();
        let pairs = archive.pairs_for(
            Period::Window(SeasonWindow::april_to_july()),
            1999,
            2005,
        );
        assert_eq!(pairs.len(), 1);
        assert_relative_eq!(pairs[0].simulated, 3.0);
        assert_relative_eq!(pairs[0].observed, 30.0);
    }

    #[test]
    fn window_excludes_the_corrected_year_sum() {
        let archive = make_archive(&[2000, 2001, 2002]);
        let pairs = archive.pairs_for(
            Period::Window(SeasonWindow::april_to_july()),
            2001,
            2002,
        );
        assert_eq!(pairs.len(), 2);
    }

    #[test]
    fn empty_result_is_not_an_error() {
        let archive = make_archive(&[2000]);
        let pairs = archive.pairs_for(Period::Month(5), 2000, 2005);
        assert!(pairs.is_empty());
    }

    #[test]
    fn observed_lookup() {
        let archive = make_archive(&[2000]);
        let hit = archive.observed_for(MonthDate::new(2000, 3).unwrap());
        assert_relative_eq!(hit.unwrap(), (2000.03) * 2.0);
        assert!(archive
            .observed_for(MonthDate::new(1999, 3).unwrap())
            .is_none());
    }
}
