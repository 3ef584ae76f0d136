//! Experiment-level configuration shared by every hypothesis.

use crate::{HarnessError, HarnessResult};

/// Parameters of one Monte Carlo experiment.
///
/// Defaults are the common settings of the three intervention studies;
/// each [`Hypothesis`][crate::Hypothesis] overrides `seed` and `num_runs`
/// through [`Hypothesis::default_experiment`][crate::Hypothesis::default_experiment].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ExperimentConfig {
    /// Seed of the root RNG stream.
    pub seed:             u64,
    /// Length of every synthetic contact timeline.
    pub num_days:         usize,
    /// Number of paired trials.
    pub num_runs:         usize,
    pub household_size:   usize,
    /// Infections seeded into each scenario after vaccination.
    pub initial_infected: usize,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            seed:             42,
            num_days:         120,
            num_runs:         100,
            household_size:   4,
            initial_infected: 3,
        }
    }
}

impl ExperimentConfig {
    pub fn validate(&self) -> HarnessResult<()> {
        if self.num_runs == 0 {
            return Err(HarnessError::NoRuns);
        }
        if self.household_size == 0 {
            return Err(HarnessError::Config("household_size must be positive".into()));
        }
        Ok(())
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_runs(mut self, num_runs: usize) -> Self {
        self.num_runs = num_runs;
        self
    }

    pub fn with_days(mut self, num_days: usize) -> Self {
        self.num_days = num_days;
        self
    }
}
