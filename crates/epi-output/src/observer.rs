//! `TrialOutputObserver<W>` — bridges `HarnessObserver` to an `OutputWriter`.

use epi_harness::{ExperimentConfig, HarnessObserver, Trial};

use crate::row::{DailyInfectiousRow, TrialSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`HarnessObserver`] that writes one summary row per scenario run and,
/// optionally, the full daily Infectious curve of every run.
///
/// Errors from the writer are stored internally because `HarnessObserver`
/// methods have no return value.  After `run_with` returns, check for
/// errors with [`take_error`][Self::take_error].
pub struct TrialOutputObserver<W: OutputWriter> {
    writer:       W,
    hypothesis:   String,
    write_series: bool,
    last_error:   Option<OutputError>,
}

impl<W: OutputWriter> TrialOutputObserver<W> {
    /// Create an observer backed by `writer` that records summaries and
    /// daily curves.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            hypothesis:   String::new(),
            write_series: true,
            last_error:   None,
        }
    }

    /// Skip the per-day Infectious rows.
    pub fn summaries_only(mut self) -> Self {
        self.write_series = false;
        self
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> HarnessObserver for TrialOutputObserver<W> {
    fn on_experiment_start(&mut self, hypothesis: &str, _experiment: &ExperimentConfig, _population: usize) {
        self.hypothesis = hypothesis.to_owned();
    }

    fn on_trial_end(&mut self, trial_index: usize, trial: &Trial) {
        for run in &trial.runs {
            let row = TrialSummaryRow {
                hypothesis:      &self.hypothesis,
                trial:           trial_index,
                scenario:        &run.scenario,
                final_recovered: run.final_recovered,
                peak_infectious: run.peak_infectious,
                peak_day:        run.peak_day,
                attack_rate:     run.attack_rate,
                vaccinated:      run.vaccinated,
            };
            let result = self.writer.write_trial_summary(&row);
            self.store_err(result);

            if self.write_series && !run.infectious_series.is_empty() {
                let rows: Vec<DailyInfectiousRow<'_>> = run
                    .infectious_series
                    .iter()
                    .enumerate()
                    .map(|(day, &infectious)| DailyInfectiousRow {
                        hypothesis: &self.hypothesis,
                        trial:      trial_index,
                        scenario:   &run.scenario,
                        day:        day as u32,
                        infectious,
                    })
                    .collect();
                let result = self.writer.write_daily_infectious(&rows);
                self.store_err(result);
            }
        }
    }

    fn on_experiment_end(&mut self, _trials_run: usize) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
