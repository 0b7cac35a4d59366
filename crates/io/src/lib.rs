//! CSV bridge between on-disk forecast files and the flowcast crates.
//!
//! Readers turn per-site historical archives and ensemble matrices into
//! the slice-based types the engine consumes; the writer emits one
//! forecast table per site for downstream plotting and reporting. The
//! computation crates never touch files themselves.

mod error;
mod reader;
mod writer;

pub use error::IoError;
pub use reader::{EnsembleTable, ReaderConfig, read_archive, read_ensemble};
pub use writer::write_forecast;
