//! Experiment observer trait for progress reporting and data collection.

use crate::{ExperimentConfig, Trial};

/// Callbacks invoked by [`MonteCarlo::run_with`][crate::MonteCarlo::run_with].
///
/// All methods have default no-op implementations.  Trials are delivered in
/// index order in both serial and parallel mode.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct Progress { every: usize }
///
/// impl HarnessObserver for Progress {
///     fn on_trial_end(&mut self, index: usize, _trial: &Trial) {
///         if (index + 1) % self.every == 0 {
///             println!("{} trials done", index + 1);
///         }
///     }
/// }
/// ```
pub trait HarnessObserver {
    /// Called once the household partition is built, before the first trial.
    fn on_experiment_start(
        &mut self,
        _hypothesis: &str,
        _experiment: &ExperimentConfig,
        _population: usize,
    ) {}

    /// Called after every scenario of trial `trial_index` has run.
    fn on_trial_end(&mut self, _trial_index: usize, _trial: &Trial) {}

    /// Called once after the final trial.
    fn on_experiment_end(&mut self, _trials_run: usize) {}
}

/// A [`HarnessObserver`] that does nothing.
pub struct NoopHarnessObserver;

impl HarnessObserver for NoopHarnessObserver {}
