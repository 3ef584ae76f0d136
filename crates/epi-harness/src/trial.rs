//! Scenarios and the per-trial results they produce.

use epi_core::InterventionConfig;
use epi_sim::RunOutcome;

/// One arm of a paired experiment: a named intervention configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct Scenario {
    pub name:         &'static str,
    pub intervention: InterventionConfig,
}

impl Scenario {
    pub fn new(name: &'static str, intervention: InterventionConfig) -> Self {
        Self { name, intervention }
    }
}

/// Summary of one scenario's run within a trial.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunSummary {
    pub scenario:          String,
    /// Final Recovered count, vaccinated agents included.
    pub final_recovered:   u32,
    pub peak_infectious:   u32,
    /// First day on which `peak_infectious` was reached.
    pub peak_day:          u32,
    /// `final_recovered / population`; 0 for an empty population.
    pub attack_rate:       f64,
    pub vaccinated:        u32,
    pub infectious_series: Vec<u32>,
}

impl RunSummary {
    pub fn from_outcome(scenario: &str, outcome: &RunOutcome, population: usize) -> Self {
        let (peak_day, peak_infectious) = outcome.peak().map_or((0, 0), |(d, i)| (d.0, i));
        let final_recovered = outcome.final_recovered();
        let attack_rate = if population == 0 {
            0.0
        } else {
            f64::from(final_recovered) / population as f64
        };
        Self {
            scenario: scenario.to_owned(),
            final_recovered,
            peak_infectious,
            peak_day,
            attack_rate,
            vaccinated: outcome.vaccinated,
            infectious_series: outcome.infectious_series.clone(),
        }
    }
}

/// All scenario runs of one trial, in scenario order.  Every run of a trial
/// was driven by the same sampled contact sequence.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trial {
    pub index: usize,
    pub runs:  Vec<RunSummary>,
}

impl Trial {
    /// The run of scenario `i`.
    ///
    /// # Panics
    /// If `i` is not a scenario index of the hypothesis that produced the
    /// trial.
    #[inline]
    pub fn run(&self, i: usize) -> &RunSummary {
        &self.runs[i]
    }
}
