//! Simulation observer trait for progress reporting and data collection.

use epi_core::{CompartmentCounts, Day};

use crate::DayReport;

/// Callbacks invoked by [`Simulation::run_with`][crate::Simulation::run_with]
/// at key points in the day loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter;
///
/// impl SimObserver for ProgressPrinter {
///     fn on_day_end(&mut self, report: &DayReport) {
///         println!("{}: {} new infections", report.day, report.new_infections());
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called before each day's step, with the counts recorded for that day.
    fn on_day_start(&mut self, _day: Day, _counts: CompartmentCounts) {}

    /// Called after each day's step.
    fn on_day_end(&mut self, _report: &DayReport) {}

    /// Called once after the final day completes.
    fn on_sim_end(&mut self, _final_day: Day, _counts: CompartmentCounts) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
