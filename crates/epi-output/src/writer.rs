//! The `OutputWriter` trait implemented by backend writers.

use crate::{DailyInfectiousRow, OutputResult, TrialSummaryRow};

/// Trait implemented by output backends.
///
/// Errors are surfaced to the harness loop through
/// [`TrialOutputObserver::take_error`][crate::TrialOutputObserver::take_error].
pub trait OutputWriter {
    /// Write one trial-summary row.
    fn write_trial_summary(&mut self, row: &TrialSummaryRow<'_>) -> OutputResult<()>;

    /// Write a batch of daily infectious rows.
    fn write_daily_infectious(&mut self, rows: &[DailyInfectiousRow<'_>]) -> OutputResult<()>;

    /// Flush all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
