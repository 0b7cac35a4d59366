//! # flowcast-archive
//!
//! Monthly per-site historical flow records and the filtering rules that
//! turn them into `(simulated, observed)` pairs for bias correction.
//!
//! A [`SiteArchive`] holds one row per `(year, month)` with the simulated
//! flow and the observed reference flow for that calendar month. Correction
//! consumers ask for pairs for a [`Period`] — either a single calendar month
//! or a multi-month [`SeasonWindow`] summed per year — with the year under
//! correction excluded so a value is never corrected against itself.

mod date;
mod error;
mod period;
mod record;
mod store;

pub use date::MonthDate;
pub use error::ArchiveError;
pub use period::{Period, SeasonWindow};
pub use record::{FlowPair, MonthlyRecord};
pub use store::SiteArchive;
