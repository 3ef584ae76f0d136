//! The three intervention studies, each a pair of scenarios plus a reducer
//! that turns the paired trials into a report.

use std::fmt;

use epi_core::{InterventionConfig, ProgressionTiming};

use crate::metrics::{mean, proportion, relative_reduction};
use crate::{ExperimentConfig, HarnessError, HarnessResult, Scenario, Trial};

// ── Hypothesis trait ──────────────────────────────────────────────────────────

/// A paired Monte Carlo comparison.
///
/// [`MonteCarlo`][crate::MonteCarlo] runs every scenario of
/// [`scenarios`](Self::scenarios) once per trial, in order, on the same
/// sampled contact sequence, then hands the trials to
/// [`reduce`](Self::reduce).
pub trait Hypothesis {
    type Report: fmt::Debug + fmt::Display;

    /// Stable identifier, used in output files.
    fn name(&self) -> &'static str;

    fn scenarios(&self) -> Vec<Scenario>;

    /// Summarise the trials.  `trials[k].runs[i]` is scenario `i` of trial
    /// `k`.
    fn reduce(&self, trials: &[Trial]) -> Self::Report;

    /// Seed, run count and timeline settings this study is run with unless
    /// overridden.
    fn default_experiment(&self) -> ExperimentConfig {
        ExperimentConfig::default()
    }

    /// Check every scenario's intervention configuration.
    fn validate(&self) -> HarnessResult<()> {
        for scenario in self.scenarios() {
            scenario.intervention.validate()?;
        }
        Ok(())
    }
}

fn check_fraction(name: &str, value: f64) -> HarnessResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(HarnessError::Config(format!("{name} must lie in [0, 1], got {value}")))
    }
}

// ── Shared disease parameters ─────────────────────────────────────────────────

/// Pathogen settings common to every scenario of a study.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DiseaseParams {
    pub infection_prob:          f64,
    pub infectious_days:         u32,
    pub external_infection_prob: f64,
    pub progression:             ProgressionTiming,
}

impl Default for DiseaseParams {
    fn default() -> Self {
        Self {
            infection_prob:          0.03,
            infectious_days:         5,
            external_infection_prob: 0.001,
            progression:             ProgressionTiming::Deferred,
        }
    }
}

impl DiseaseParams {
    pub fn with_infection_prob(infection_prob: f64) -> Self {
        Self { infection_prob, ..Self::default() }
    }

    /// An intervention-free configuration carrying these disease settings.
    pub fn baseline(&self) -> InterventionConfig {
        InterventionConfig {
            infection_prob:          self.infection_prob,
            infectious_days:         self.infectious_days,
            external_infection_prob: self.external_infection_prob,
            progression:             self.progression,
            ..InterventionConfig::default()
        }
    }
}

// ── H1: household isolation ───────────────────────────────────────────────────

/// Does isolating the whole household of an infectious agent reduce total
/// infections compared to isolating symptomatic agents alone?
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct IsolationComparison {
    pub disease: DiseaseParams,
}

impl Default for IsolationComparison {
    fn default() -> Self {
        Self { disease: DiseaseParams::with_infection_prob(0.03) }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IsolationReport {
    pub trials:               usize,
    /// Mean final Recovered under symptomatic isolation.
    pub mean_final_individual: f64,
    /// Mean final Recovered under symptomatic plus household isolation.
    pub mean_final_household: f64,
    /// `1 - household / individual`.
    pub reduction:            f64,
}

impl Hypothesis for IsolationComparison {
    type Report = IsolationReport;

    fn name(&self) -> &'static str {
        "h1_isolation"
    }

    fn scenarios(&self) -> Vec<Scenario> {
        let base = self.disease.baseline();
        vec![
            Scenario::new("symptomatic", InterventionConfig {
                isolate_symptomatic: true,
                ..base.clone()
            }),
            Scenario::new("household", InterventionConfig {
                isolate_symptomatic: true,
                isolate_households:  true,
                ..base
            }),
        ]
    }

    fn reduce(&self, trials: &[Trial]) -> IsolationReport {
        let individual: Vec<f64> = trials.iter().map(|t| f64::from(t.run(0).final_recovered)).collect();
        let household: Vec<f64> = trials.iter().map(|t| f64::from(t.run(1).final_recovered)).collect();
        let mean_final_individual = mean(&individual);
        let mean_final_household = mean(&household);
        IsolationReport {
            trials: trials.len(),
            mean_final_individual,
            mean_final_household,
            reduction: relative_reduction(mean_final_household, mean_final_individual),
        }
    }

    fn default_experiment(&self) -> ExperimentConfig {
        ExperimentConfig::default().with_seed(42).with_runs(100)
    }
}

impl fmt::Display for IsolationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "H1 ({} trials):", self.trials)?;
        writeln!(f, "  Mean total infections (individual isolation): {:.3}", self.mean_final_individual)?;
        writeln!(f, "  Mean total infections (household isolation):  {:.3}", self.mean_final_household)?;
        write!(f, "  Relative reduction: {:.4}", self.reduction)
    }
}

// ── H2: contact reduction and peak timing ─────────────────────────────────────

/// Does thinning daily contacts delay and flatten the epidemic peak?
///
/// Only trials in which *both* scenarios reach an attack rate of at least
/// `min_attack` enter the statistics, so that fizzled outbreaks do not
/// drag the peak day towards zero.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ContactReduction {
    pub disease:           DiseaseParams,
    /// Fraction of contacts kept in the reduced scenario.
    pub contact_reduction: f64,
    pub min_attack:        f64,
}

impl Default for ContactReduction {
    fn default() -> Self {
        Self {
            disease:           DiseaseParams::with_infection_prob(0.08),
            contact_reduction: 0.4,
            min_attack:        0.2,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PeakTimingReport {
    pub trials:                   usize,
    /// Trials where both scenarios reached `min_attack`.
    pub retained_runs:            usize,
    pub mean_peak_day_high:       f64,
    pub mean_peak_day_low:        f64,
    pub mean_peak_infectious_high: f64,
    pub mean_peak_infectious_low: f64,
    /// `low - high`; positive when the reduced scenario peaks later.
    pub delay:                    f64,
    /// `1 - low / high` on the mean peak Infectious count.
    pub peak_reduction:           f64,
}

impl Hypothesis for ContactReduction {
    type Report = PeakTimingReport;

    fn name(&self) -> &'static str {
        "h2_contact_reduction"
    }

    fn scenarios(&self) -> Vec<Scenario> {
        let base = self.disease.baseline();
        vec![
            Scenario::new("baseline", base.clone()),
            Scenario::new("reduced_contact", InterventionConfig {
                contact_reduction: self.contact_reduction,
                ..base
            }),
        ]
    }

    fn reduce(&self, trials: &[Trial]) -> PeakTimingReport {
        let mut day_high = Vec::new();
        let mut day_low = Vec::new();
        let mut peak_high = Vec::new();
        let mut peak_low = Vec::new();

        for trial in trials {
            let (high, low) = (trial.run(0), trial.run(1));
            if high.attack_rate < self.min_attack || low.attack_rate < self.min_attack {
                continue;
            }
            day_high.push(f64::from(high.peak_day));
            day_low.push(f64::from(low.peak_day));
            peak_high.push(f64::from(high.peak_infectious));
            peak_low.push(f64::from(low.peak_infectious));
        }

        let mean_peak_day_high = mean(&day_high);
        let mean_peak_day_low = mean(&day_low);
        let mean_peak_infectious_high = mean(&peak_high);
        let mean_peak_infectious_low = mean(&peak_low);
        PeakTimingReport {
            trials: trials.len(),
            retained_runs: day_high.len(),
            mean_peak_day_high,
            mean_peak_day_low,
            mean_peak_infectious_high,
            mean_peak_infectious_low,
            delay: mean_peak_day_low - mean_peak_day_high,
            peak_reduction: relative_reduction(mean_peak_infectious_low, mean_peak_infectious_high),
        }
    }

    fn default_experiment(&self) -> ExperimentConfig {
        ExperimentConfig::default().with_seed(123).with_runs(200)
    }

    fn validate(&self) -> HarnessResult<()> {
        check_fraction("min_attack", self.min_attack)?;
        for scenario in self.scenarios() {
            scenario.intervention.validate()?;
        }
        Ok(())
    }
}

impl fmt::Display for PeakTimingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "H2 ({} of {} trials retained):", self.retained_runs, self.trials)?;
        writeln!(f, "  Mean peak day (high contacts): {:.2}", self.mean_peak_day_high)?;
        writeln!(f, "  Mean peak day (low contacts):  {:.2}", self.mean_peak_day_low)?;
        writeln!(f, "  Delay (days): {:.2}", self.delay)?;
        writeln!(f, "  Mean peak I (high): {:.2}", self.mean_peak_infectious_high)?;
        writeln!(f, "  Mean peak I (low):  {:.2}", self.mean_peak_infectious_low)?;
        write!(f, "  Relative reduction in peak load: {:.4}", self.peak_reduction)
    }
}

// ── H3: vaccination and large outbreaks ───────────────────────────────────────

/// Does pre-emptive vaccination lower the probability of a large outbreak
/// (attack rate at or above `large_outbreak_threshold`)?
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct VaccinationOutbreak {
    pub disease:                  DiseaseParams,
    pub vaccination_coverage:     f64,
    pub large_outbreak_threshold: f64,
}

impl Default for VaccinationOutbreak {
    fn default() -> Self {
        Self {
            disease:                  DiseaseParams::with_infection_prob(0.09),
            vaccination_coverage:     0.30,
            large_outbreak_threshold: 0.5,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OutbreakReport {
    pub trials:         usize,
    pub p_large_no_vax: f64,
    pub p_large_vax:    f64,
    /// `1 - p_vax / p_no`; `NaN` when no unvaccinated trial was large.
    pub reduction:      f64,
}

impl Hypothesis for VaccinationOutbreak {
    type Report = OutbreakReport;

    fn name(&self) -> &'static str {
        "h3_vaccination"
    }

    fn scenarios(&self) -> Vec<Scenario> {
        let base = self.disease.baseline();
        vec![
            Scenario::new("no_vaccination", base.clone()),
            Scenario::new("vaccination", InterventionConfig {
                vaccination_coverage: self.vaccination_coverage,
                ..base
            }),
        ]
    }

    fn reduce(&self, trials: &[Trial]) -> OutbreakReport {
        let threshold = self.large_outbreak_threshold;
        let large_no: Vec<bool> = trials.iter().map(|t| t.run(0).attack_rate >= threshold).collect();
        let large_vax: Vec<bool> = trials.iter().map(|t| t.run(1).attack_rate >= threshold).collect();
        let p_large_no_vax = proportion(&large_no);
        let p_large_vax = proportion(&large_vax);
        OutbreakReport {
            trials: trials.len(),
            p_large_no_vax,
            p_large_vax,
            reduction: relative_reduction(p_large_vax, p_large_no_vax),
        }
    }

    fn default_experiment(&self) -> ExperimentConfig {
        ExperimentConfig::default().with_seed(999).with_runs(300)
    }

    fn validate(&self) -> HarnessResult<()> {
        check_fraction("large_outbreak_threshold", self.large_outbreak_threshold)?;
        for scenario in self.scenarios() {
            scenario.intervention.validate()?;
        }
        Ok(())
    }
}

impl fmt::Display for OutbreakReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "H3 ({} trials):", self.trials)?;
        writeln!(f, "  P(large outbreak) no vax: {:.4}", self.p_large_no_vax)?;
        writeln!(f, "  P(large outbreak) vax:    {:.4}", self.p_large_vax)?;
        write!(f, "  Relative reduction: {:.4}", self.reduction)
    }
}
