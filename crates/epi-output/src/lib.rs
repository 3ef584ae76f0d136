//! `epi-output` — experiment output writers.
//!
//! | Backend | Files created                                    |
//! |---------|--------------------------------------------------|
//! | CSV     | `trial_summaries.csv`, `daily_infectious.csv`    |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`TrialOutputObserver`], which implements
//! `epi_harness::HarnessObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use epi_output::{CsvWriter, TrialOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = TrialOutputObserver::new(writer);
//! let report = MonteCarlo::new(exp).run_with(&h1, &daily, &mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::TrialOutputObserver;
pub use row::{DailyInfectiousRow, TrialSummaryRow};
pub use writer::OutputWriter;
