//! The paired-trial Monte Carlo loop.

use epi_contact::{DailyContacts, Households, sample_contact_sequence};
use epi_core::SimRng;
use epi_sim::SimBuilder;

use crate::{
    ExperimentConfig, HarnessObserver, HarnessResult, Hypothesis, NoopHarnessObserver,
    RunSummary, Scenario, Trial,
};

// ── MonteCarlo ────────────────────────────────────────────────────────────────

/// Runs a [`Hypothesis`] for `num_runs` paired trials.
///
/// # Draw order
///
/// In serial mode every random draw comes from one root stream seeded with
/// `experiment.seed`, in this order:
///
/// ```text
/// households
/// for each trial:
///     contact sequence
///     for each scenario:
///         vaccination → seeding → per-day draws
/// ```
///
/// With the `parallel` feature the households are still drawn from the root
/// stream, after which one child stream per trial is derived serially with
/// [`SimRng::child`] and the trials run on Rayon's pool.
pub struct MonteCarlo {
    experiment: ExperimentConfig,
}

/// Read-only inputs shared by every trial.
struct TrialPlan<'a> {
    daily:            &'a DailyContacts,
    households:       &'a Households,
    scenarios:        &'a [Scenario],
    population:       usize,
    num_days:         usize,
    initial_infected: usize,
}

impl MonteCarlo {
    pub fn new(experiment: ExperimentConfig) -> Self {
        Self { experiment }
    }

    pub fn experiment(&self) -> &ExperimentConfig {
        &self.experiment
    }

    /// Run without callbacks.
    pub fn run<H: Hypothesis>(&self, hypothesis: &H, daily: &DailyContacts) -> HarnessResult<H::Report> {
        self.run_with(hypothesis, daily, &mut NoopHarnessObserver)
    }

    /// Run every trial, report each to `observer`, and reduce.
    ///
    /// Fails before drawing anything if the experiment or hypothesis
    /// configuration is invalid.
    pub fn run_with<H, O>(
        &self,
        hypothesis: &H,
        daily:      &DailyContacts,
        observer:   &mut O,
    ) -> HarnessResult<H::Report>
    where
        H: Hypothesis,
        O: HarnessObserver,
    {
        let exp = &self.experiment;
        exp.validate()?;
        hypothesis.validate()?;

        let mut rng = SimRng::new(exp.seed);
        let population = daily.population_size();
        let households = Households::build(population, exp.household_size, &mut rng)?;
        let scenarios = hypothesis.scenarios();

        log::info!(
            "{}: {} trials x {} scenarios, {} agents, {} contact days, seed {}",
            hypothesis.name(),
            exp.num_runs,
            scenarios.len(),
            population,
            daily.len(),
            exp.seed,
        );
        observer.on_experiment_start(hypothesis.name(), exp, population);

        let plan = TrialPlan {
            daily,
            households: &households,
            scenarios: &scenarios,
            population,
            num_days: exp.num_days,
            initial_infected: exp.initial_infected,
        };

        let mut trials = Vec::with_capacity(exp.num_runs);

        #[cfg(not(feature = "parallel"))]
        {
            for index in 0..exp.num_runs {
                let trial = run_trial(&plan, index, &mut rng)?;
                observer.on_trial_end(index, &trial);
                trials.push(trial);
            }
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            let children: Vec<SimRng> = (0..exp.num_runs).map(|i| rng.child(i as u64)).collect();
            let results: Vec<HarnessResult<Trial>> = children
                .into_par_iter()
                .enumerate()
                .map(|(index, mut child)| run_trial(&plan, index, &mut child))
                .collect();
            for result in results {
                let trial = result?;
                observer.on_trial_end(trial.index, &trial);
                trials.push(trial);
            }
        }

        observer.on_experiment_end(trials.len());
        let report = hypothesis.reduce(&trials);
        log::info!("{} finished after {} trials", hypothesis.name(), trials.len());
        Ok(report)
    }
}

/// One trial: sample a contact sequence and run every scenario on it.
fn run_trial(plan: &TrialPlan<'_>, index: usize, rng: &mut SimRng) -> HarnessResult<Trial> {
    let sequence = sample_contact_sequence(plan.daily, plan.num_days, rng)?;

    let mut runs = Vec::with_capacity(plan.scenarios.len());
    for scenario in plan.scenarios {
        let mut sim = SimBuilder::new(scenario.intervention.clone(), plan.population, &sequence)
            .households(plan.households)
            .build(rng)?;
        sim.seed_initial_infections(plan.initial_infected, rng);
        let outcome = sim.run(rng);
        runs.push(RunSummary::from_outcome(scenario.name, &outcome, plan.population));
    }

    log::debug!(
        "trial {index}: final R {:?}",
        runs.iter().map(|r| r.final_recovered).collect::<Vec<_>>()
    );
    Ok(Trial { index, runs })
}
