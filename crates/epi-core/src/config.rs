//! Intervention configuration for a single simulation instance.
//!
//! An `InterventionConfig` is immutable for the lifetime of the simulation
//! it configures.  Scenario comparisons are built by cloning a base config
//! and flipping one field (see `epi-harness`).

use crate::{EpiError, EpiResult};

// ── ProgressionTiming ─────────────────────────────────────────────────────────

/// Whether agents infected during a day's step are aged in that same step.
///
/// The per-day step applies new infections *before* progressing Infectious
/// agents.  The two variants differ only in whether the agents infected a
/// moment earlier take part in that progression pass.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ProgressionTiming {
    /// Newly infected agents start ageing on the following day, so every
    /// infection stays Infectious for exactly `infectious_days` steps.
    #[default]
    Deferred,
    /// Every Infectious agent is aged, including those infected this step.
    /// The realised infectious period is `infectious_days - 1` steps after
    /// the infecting step.
    SameDay,
}

// ── InterventionConfig ────────────────────────────────────────────────────────

/// Disease and intervention parameters for one simulation instance.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct InterventionConfig {
    /// Per-contact, per-direction transmission probability.
    pub infection_prob: f64,

    /// Number of steps an agent stays Infectious before recovering.
    pub infectious_days: u32,

    /// Per-agent, per-day probability of infection from outside the
    /// tracked network.
    pub external_infection_prob: f64,

    /// Fraction of the population made immune (Recovered) at t = 0.
    pub vaccination_coverage: f64,

    /// Isolate Infectious agents from the day after onset.
    pub isolate_symptomatic: bool,

    /// Isolate every member of a household with an Infectious member.
    pub isolate_households: bool,

    /// Fraction of non-isolated edges retained each day.  `1.0` = no thinning.
    pub contact_reduction: f64,

    /// Same-day ageing rule for fresh infections.
    pub progression: ProgressionTiming,
}

impl Default for InterventionConfig {
    fn default() -> Self {
        Self {
            infection_prob:          0.03,
            infectious_days:         5,
            external_infection_prob: 0.0,
            vaccination_coverage:    0.0,
            isolate_symptomatic:     false,
            isolate_households:      false,
            contact_reduction:       1.0,
            progression:             ProgressionTiming::Deferred,
        }
    }
}

impl InterventionConfig {
    /// Check every field against its admissible range.
    pub fn validate(&self) -> EpiResult<()> {
        check_unit("infection_prob", self.infection_prob)?;
        check_unit("external_infection_prob", self.external_infection_prob)?;
        check_unit("vaccination_coverage", self.vaccination_coverage)?;

        if self.infectious_days == 0 {
            return Err(EpiError::Config(
                "infectious_days must be at least 1".to_owned(),
            ));
        }
        if !(self.contact_reduction > 0.0 && self.contact_reduction <= 1.0) {
            return Err(EpiError::Config(format!(
                "contact_reduction must be in (0, 1], got {}",
                self.contact_reduction
            )));
        }
        Ok(())
    }

    /// `true` if either isolation rule is enabled.
    #[inline]
    pub fn any_isolation(&self) -> bool {
        self.isolate_symptomatic || self.isolate_households
    }

    /// `true` if the daily edge set is thinned after isolation filtering.
    #[inline]
    pub fn thins_contacts(&self) -> bool {
        self.contact_reduction < 1.0
    }

    /// Number of agents vaccinated at construction for a population of `n`.
    ///
    /// Rounded to the nearest integer and never larger than `n`.
    pub fn vaccinated_count(&self, n: usize) -> usize {
        ((n as f64 * self.vaccination_coverage).round() as usize).min(n)
    }
}

/// Reject NaN and values outside `[0, 1]`.
fn check_unit(name: &str, value: f64) -> EpiResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(EpiError::Config(format!("{name} must be in [0, 1], got {value}")))
    }
}
