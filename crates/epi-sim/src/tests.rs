//! Integration tests for epi-sim.

use epi_contact::{ContactEdge, ContactSequence, Households};
use epi_core::{AgentId, CompartmentCounts, Day, HealthState, InterventionConfig, ProgressionTiming, SimRng};

use crate::{DayReport, SimBuilder, SimObserver, Simulation};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn e(a: u32, b: u32) -> ContactEdge {
    ContactEdge::from((a, b))
}

/// No external hazard, no interventions, deterministic transmission.
fn certain_config(infectious_days: u32) -> InterventionConfig {
    InterventionConfig {
        infection_prob: 1.0,
        infectious_days,
        ..Default::default()
    }
}

fn build<'a>(config: InterventionConfig, n: usize, seq: &'a ContactSequence, rng: &mut SimRng) -> Simulation<'a> {
    SimBuilder::new(config, n, seq).build(rng).unwrap()
}

/// Ring of `n` agents, every agent touching both neighbours.
fn ring(n: u32) -> Vec<ContactEdge> {
    (0..n).map(|i| e(i, (i + 1) % n)).collect()
}

/// Observer collecting every day report.
#[derive(Default)]
struct Recorder {
    starts:  Vec<(Day, CompartmentCounts)>,
    reports: Vec<DayReport>,
    ended:   Option<(Day, CompartmentCounts)>,
}

impl SimObserver for Recorder {
    fn on_day_start(&mut self, day: Day, counts: CompartmentCounts) {
        self.starts.push((day, counts));
    }
    fn on_day_end(&mut self, report: &DayReport) {
        self.reports.push(*report);
    }
    fn on_sim_end(&mut self, day: Day, counts: CompartmentCounts) {
        self.ended = Some((day, counts));
    }
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;
    use crate::SimError;

    #[test]
    fn builds_with_defaults() {
        let seq = ContactSequence::repeat(vec![e(0, 1)], 3);
        let sim = build(InterventionConfig::default(), 4, &seq, &mut SimRng::new(1));
        assert_eq!(sim.population(), 4);
        assert_eq!(sim.days_remaining(), 3);
        assert_eq!(sim.counts(), CompartmentCounts { susceptible: 4, infectious: 0, recovered: 0 });
    }

    #[test]
    fn invalid_config_errors() {
        let seq = ContactSequence::repeat(vec![], 1);
        let cfg = InterventionConfig { infectious_days: 0, ..Default::default() };
        let result = SimBuilder::new(cfg, 2, &seq).build(&mut SimRng::new(0));
        assert!(matches!(result, Err(SimError::Core(_))));
    }

    #[test]
    fn household_population_mismatch_errors() {
        let seq = ContactSequence::repeat(vec![], 1);
        let households = Households::build(3, 2, &mut SimRng::new(0)).unwrap();
        let result = SimBuilder::new(InterventionConfig::default(), 4, &seq)
            .households(&households)
            .build(&mut SimRng::new(0));
        assert!(matches!(result, Err(SimError::AgentCountMismatch { expected: 4, got: 3, .. })));
    }

    #[test]
    fn edge_outside_population_errors() {
        let seq = ContactSequence::from_days(vec![vec![e(0, 1)], vec![e(1, 7)]]);
        let result = SimBuilder::new(InterventionConfig::default(), 5, &seq).build(&mut SimRng::new(0));
        assert!(matches!(result, Err(SimError::AgentOutOfRange { agent: AgentId(7), population: 5 })));
    }

    #[test]
    fn vaccination_selects_rounded_share() {
        let seq = ContactSequence::repeat(vec![], 1);
        let cfg = InterventionConfig { vaccination_coverage: 0.3, ..Default::default() };
        let sim = build(cfg, 20, &seq, &mut SimRng::new(5));
        assert_eq!(sim.vaccinated(), 6);
        assert_eq!(sim.counts().recovered, 6);
        assert_eq!(sim.counts().susceptible, 14);
    }
}

// ── Seeding ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod seeding_tests {
    use super::*;

    #[test]
    fn seeds_requested_count() {
        let seq = ContactSequence::repeat(vec![], 1);
        let mut rng = SimRng::new(2);
        let mut sim = build(InterventionConfig::default(), 10, &seq, &mut rng);
        assert_eq!(sim.seed_initial_infections(3, &mut rng), 3);
        assert_eq!(sim.counts().infectious, 3);
        for a in sim.store().ids_in(HealthState::Infectious) {
            assert_eq!(sim.store().days_in_state(a), 0);
        }
    }

    #[test]
    fn oversized_request_is_clamped() {
        let seq = ContactSequence::repeat(vec![], 1);
        let mut rng = SimRng::new(2);
        let cfg = InterventionConfig { vaccination_coverage: 0.5, ..Default::default() };
        let mut sim = build(cfg, 6, &seq, &mut rng);
        assert_eq!(sim.seed_initial_infections(100, &mut rng), 3);
        assert_eq!(sim.counts(), CompartmentCounts { susceptible: 0, infectious: 3, recovered: 3 });
    }

    #[test]
    fn never_reinfects_non_susceptible() {
        let seq = ContactSequence::repeat(vec![], 1);
        let mut rng = SimRng::new(8);
        let mut sim = build(InterventionConfig::default(), 5, &seq, &mut rng);
        sim.seed_initial_infections(2, &mut rng);
        let first = sim.store().ids_in(HealthState::Infectious);
        sim.seed_initial_infections(2, &mut rng);
        let second = sim.store().ids_in(HealthState::Infectious);
        assert_eq!(second.len(), 4);
        assert!(first.iter().all(|a| second.contains(a)));
    }

    #[test]
    fn fully_vaccinated_is_noop() {
        let seq = ContactSequence::repeat(ring(6), 10);
        let mut rng = SimRng::new(4);
        let cfg = InterventionConfig { vaccination_coverage: 1.0, ..certain_config(3) };
        let mut sim = build(cfg, 6, &seq, &mut rng);
        assert_eq!(sim.seed_initial_infections(3, &mut rng), 0);

        let outcome = sim.run(&mut rng);
        assert_eq!(outcome.infectious_series, vec![0; 10]);
        assert_eq!(outcome.final_recovered(), 6);
        assert_eq!(outcome.ever_infected(), 0);
    }

    #[test]
    fn infect_agents_skips_non_susceptible() {
        let seq = ContactSequence::repeat(vec![], 1);
        let mut sim = build(InterventionConfig::default(), 3, &seq, &mut SimRng::new(0));
        assert_eq!(sim.infect_agents(&[AgentId(1), AgentId(1), AgentId(9)]), 1);
        assert_eq!(sim.store().state(AgentId(1)), HealthState::Infectious);
    }
}

// ── Step semantics ────────────────────────────────────────────────────────────

#[cfg(test)]
mod step_tests {
    use super::*;

    /// Two agents, edge (0,1) every day for 5 days, p = 1, agent 0 seeded,
    /// infectious for 5 days.
    fn pair_run(progression: ProgressionTiming) -> (crate::RunOutcome, Recorder) {
        let seq = ContactSequence::repeat(vec![e(0, 1)], 5);
        let mut rng = SimRng::new(0);
        let cfg = InterventionConfig { progression, ..certain_config(5) };
        let mut sim = build(cfg, 2, &seq, &mut rng);
        sim.infect_agents(&[AgentId(0)]);
        let mut rec = Recorder::default();
        let outcome = sim.run_with(&mut rng, &mut rec);
        (outcome, rec)
    }

    #[test]
    fn pair_scenario_deferred() {
        let (outcome, rec) = pair_run(ProgressionTiming::Deferred);
        // Agent 1 is infected during day 0's step.
        assert_eq!(rec.reports[0].network_infections, 1);
        assert_eq!(outcome.infectious_series, vec![1, 2, 2, 2, 2]);
        // Agent 0 recovers on the fifth step; agent 1 is still Infectious.
        assert_eq!(outcome.final_recovered(), 1);
        assert_eq!(outcome.final_counts.infectious, 1);
        assert_eq!(rec.reports[4].recoveries, 1);
    }

    #[test]
    fn pair_scenario_same_day_ageing() {
        let (outcome, _) = pair_run(ProgressionTiming::SameDay);
        // Agent 1 is aged on its infection day, so both recover on step 4.
        assert_eq!(outcome.infectious_series, vec![1, 2, 2, 2, 2]);
        assert_eq!(outcome.final_recovered(), 2);
    }

    #[test]
    fn series_has_one_entry_per_day_and_starts_post_seed() {
        let seq = ContactSequence::repeat(ring(8), 12);
        let mut rng = SimRng::new(6);
        let mut sim = build(InterventionConfig { infection_prob: 0.4, ..Default::default() }, 8, &seq, &mut rng);
        sim.seed_initial_infections(2, &mut rng);
        let outcome = sim.run(&mut rng);
        assert_eq!(outcome.infectious_series.len(), 12);
        assert_eq!(outcome.infectious_series[0], 2);
        assert!(sim.is_finished());
    }

    #[test]
    fn step_after_end_returns_none() {
        let seq = ContactSequence::repeat(vec![e(0, 1)], 2);
        let mut rng = SimRng::new(0);
        let mut sim = build(certain_config(3), 2, &seq, &mut rng);
        assert!(sim.step(&mut rng).is_some());
        assert!(sim.step(&mut rng).is_some());
        assert!(sim.step(&mut rng).is_none());
        assert_eq!(sim.day(), Day(2));
    }

    #[test]
    fn duplicate_edges_infect_once() {
        let seq = ContactSequence::repeat(vec![e(0, 1), e(1, 0), e(0, 1)], 1);
        let mut rng = SimRng::new(0);
        let mut sim = build(certain_config(4), 2, &seq, &mut rng);
        sim.infect_agents(&[AgentId(0)]);
        let report = sim.step(&mut rng).unwrap();
        assert_eq!(report.network_infections, 1);
        assert_eq!(report.active_contacts, 3);
        assert_eq!(sim.counts().infectious, 2);
    }

    #[test]
    fn newly_infected_do_not_transmit_same_day() {
        // 0 infects 1 on day 0; 1 must not pass it on to 2 within that step.
        let seq = ContactSequence::repeat(vec![e(0, 1), e(1, 2)], 1);
        let mut rng = SimRng::new(0);
        let mut sim = build(certain_config(4), 3, &seq, &mut rng);
        sim.infect_agents(&[AgentId(0)]);
        sim.step(&mut rng);
        assert_eq!(sim.store().state(AgentId(2)), HealthState::Susceptible);
    }

    #[test]
    fn certain_external_hazard_infects_everyone() {
        let seq = ContactSequence::repeat(vec![], 1);
        let mut rng = SimRng::new(3);
        let cfg = InterventionConfig { external_infection_prob: 1.0, ..Default::default() };
        let mut sim = build(cfg, 7, &seq, &mut rng);
        sim.seed_initial_infections(2, &mut rng);
        let report = sim.step(&mut rng).unwrap();
        assert_eq!(report.external_infections, 5);
        assert_eq!(report.network_infections, 0);
        assert_eq!(sim.counts().susceptible, 0);
    }

    #[test]
    fn no_transmission_means_no_growth() {
        let seq = ContactSequence::repeat(ring(20), 30);
        let mut rng = SimRng::new(10);
        let cfg = InterventionConfig { infection_prob: 0.0, external_infection_prob: 0.0, ..Default::default() };
        let mut sim = build(cfg, 20, &seq, &mut rng);
        sim.seed_initial_infections(4, &mut rng);
        let outcome = sim.run(&mut rng);
        assert!(outcome.infectious_series.iter().all(|&i| i <= 4));
        assert_eq!(outcome.final_recovered(), 4);
    }

    #[test]
    fn zero_population_runs_quietly() {
        let seq = ContactSequence::repeat(vec![], 4);
        let mut rng = SimRng::new(0);
        let cfg = InterventionConfig { external_infection_prob: 0.5, contact_reduction: 0.5, ..Default::default() };
        let mut sim = build(cfg, 0, &seq, &mut rng);
        assert_eq!(sim.seed_initial_infections(3, &mut rng), 0);
        let outcome = sim.run(&mut rng);
        assert_eq!(outcome.infectious_series, vec![0; 4]);
        assert_eq!(outcome.final_counts.total(), 0);
    }

    #[test]
    fn same_seed_same_outcome() {
        let seq = ContactSequence::repeat(ring(30), 40);
        let run = |seed| {
            let mut rng = SimRng::new(seed);
            let cfg = InterventionConfig {
                infection_prob:          0.3,
                external_infection_prob: 0.01,
                contact_reduction:       0.7,
                ..Default::default()
            };
            let mut sim = build(cfg, 30, &seq, &mut rng);
            sim.seed_initial_infections(2, &mut rng);
            sim.run(&mut rng)
        };
        assert_eq!(run(77), run(77));
    }
}

// ── Invariants ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod invariant_tests {
    use super::*;

    #[test]
    fn population_conserved_every_day() {
        let n = 40;
        let seq = ContactSequence::repeat(ring(n), 60);
        let households = Households::build(n as usize, 4, &mut SimRng::new(1)).unwrap();
        let mut rng = SimRng::new(99);
        let cfg = InterventionConfig {
            infection_prob:          0.5,
            external_infection_prob: 0.02,
            vaccination_coverage:    0.1,
            isolate_symptomatic:     true,
            isolate_households:      true,
            contact_reduction:       0.8,
            ..Default::default()
        };
        let mut sim = SimBuilder::new(cfg, n as usize, &seq)
            .households(&households)
            .build(&mut rng)
            .unwrap();
        sim.seed_initial_infections(3, &mut rng);

        let mut rec = Recorder::default();
        sim.run_with(&mut rng, &mut rec);
        assert_eq!(rec.reports.len(), 60);
        for r in &rec.reports {
            assert_eq!(r.counts_after.total(), n, "{}: {}", r.day, r.counts_after);
        }
        // Running tally matches a full recount.
        let recount = CompartmentCounts::tally(sim.store().states());
        assert_eq!(recount, sim.counts());
        assert_eq!(rec.ended.map(|(d, _)| d), Some(Day(60)));
    }

    #[test]
    fn transitions_are_monotone() {
        let n = 25;
        let seq = ContactSequence::repeat(ring(n), 40);
        let mut rng = SimRng::new(12);
        let cfg = InterventionConfig { infection_prob: 0.6, ..Default::default() };
        let mut sim = build(cfg, n as usize, &seq, &mut rng);
        sim.seed_initial_infections(1, &mut rng);

        let rank = |s: HealthState| match s {
            HealthState::Susceptible => 0,
            HealthState::Infectious  => 1,
            HealthState::Recovered   => 2,
        };
        let mut prev: Vec<HealthState> = sim.store().states().to_vec();
        while sim.step(&mut rng).is_some() {
            let now = sim.store().states();
            for (a, b) in prev.iter().zip(now) {
                assert!(rank(*a) <= rank(*b), "{a} -> {b}");
            }
            prev = now.to_vec();
        }
    }

    #[test]
    fn observer_sees_every_day() {
        let seq = ContactSequence::repeat(ring(5), 7);
        let mut rng = SimRng::new(0);
        let mut sim = build(InterventionConfig::default(), 5, &seq, &mut rng);
        let mut rec = Recorder::default();
        sim.run_with(&mut rng, &mut rec);
        assert_eq!(rec.starts.len(), 7);
        assert_eq!(rec.starts[3].0, Day(3));
    }
}

// ── Isolation and thinning ────────────────────────────────────────────────────

#[cfg(test)]
mod intervention_tests {
    use super::*;
    use crate::{HealthStore, IsolationPolicy, isolation_mask};

    #[test]
    fn symptomatic_isolation_starts_day_after_onset() {
        // Day 0: no contacts.  Day 1: 0 meets 1.
        let seq = ContactSequence::from_days(vec![vec![], vec![e(0, 1)]]);

        let run = |isolate: bool| {
            let mut rng = SimRng::new(0);
            let cfg = InterventionConfig { isolate_symptomatic: isolate, ..certain_config(10) };
            let mut sim = build(cfg, 2, &seq, &mut rng);
            sim.infect_agents(&[AgentId(0)]);
            sim.run(&mut rng);
            sim.store().state(AgentId(1))
        };

        assert_eq!(run(false), HealthState::Infectious);
        assert_eq!(run(true), HealthState::Susceptible);
    }

    #[test]
    fn symptomatic_isolation_misses_onset_day() {
        // Contact on the infection-onset day itself still transmits.
        let seq = ContactSequence::repeat(vec![e(0, 1)], 1);
        let mut rng = SimRng::new(0);
        let cfg = InterventionConfig { isolate_symptomatic: true, ..certain_config(10) };
        let mut sim = build(cfg, 2, &seq, &mut rng);
        sim.infect_agents(&[AgentId(0)]);
        let report = sim.step(&mut rng).unwrap();
        assert_eq!(report.isolated, 0);
        assert_eq!(report.network_infections, 1);
    }

    #[test]
    fn household_isolation_blocks_housemates() {
        // Households {0,1} and {2}.  Agent 1 is a Susceptible housemate of
        // index case 0 and meets agent 2.
        let households =
            Households::from_groups(vec![vec![AgentId(0), AgentId(1)], vec![AgentId(2)]], 3).unwrap();
        let seq = ContactSequence::repeat(vec![e(0, 2), e(1, 2)], 1);
        let mut rng = SimRng::new(0);
        let cfg = InterventionConfig { isolate_households: true, ..certain_config(5) };
        let mut sim = SimBuilder::new(cfg, 3, &seq)
            .households(&households)
            .build(&mut rng)
            .unwrap();
        sim.infect_agents(&[AgentId(0)]);
        let report = sim.step(&mut rng).unwrap();
        assert_eq!(report.isolated, 2);
        assert_eq!(report.active_contacts, 0);
        assert_eq!(sim.store().state(AgentId(2)), HealthState::Susceptible);
    }

    #[test]
    fn household_rule_without_households_is_noop() {
        let seq = ContactSequence::repeat(vec![e(0, 1)], 1);
        let mut rng = SimRng::new(0);
        let cfg = InterventionConfig { isolate_households: true, ..certain_config(5) };
        let mut sim = build(cfg, 2, &seq, &mut rng);
        sim.infect_agents(&[AgentId(0)]);
        let report = sim.step(&mut rng).unwrap();
        assert_eq!(report.isolated, 0);
        assert_eq!(report.network_infections, 1);
    }

    #[test]
    fn enabling_household_rule_only_adds_isolation() {
        let n = 30;
        let households = Households::build(n, 3, &mut SimRng::new(4)).unwrap();
        let mut store = HealthStore::new(n);
        for i in [1u32, 7, 8, 20] {
            store.set_state(AgentId(i), HealthState::Infectious);
        }
        // Age two of them past the detection delay.
        store.days_in_state[7] = 2;
        store.days_in_state[20] = 1;

        let mut base = Vec::new();
        let mut wider = Vec::new();
        let symptomatic = IsolationPolicy { symptomatic: true, households: false };
        let both = IsolationPolicy { symptomatic: true, households: true };
        let n_base = isolation_mask(&store, Some(&households), symptomatic, &mut base);
        let n_wider = isolation_mask(&store, Some(&households), both, &mut wider);

        assert_eq!(n_base, 2);
        assert!(n_wider >= n_base);
        for (b, w) in base.iter().zip(&wider) {
            assert!(!b || *w, "household rule removed an isolation flag");
        }
        // Every housemate of an Infectious agent is covered.
        for a in [1u32, 7, 8, 20] {
            let h = households.household_of(AgentId(a));
            assert!(households.members(h).iter().all(|m| wider[m.index()]));
        }

        let mut none = Vec::new();
        assert_eq!(isolation_mask(&store, Some(&households), IsolationPolicy::default(), &mut none), 0);
    }

    #[test]
    fn full_contact_retention_keeps_filtered_set() {
        let seq = ContactSequence::repeat(ring(10), 1);
        let mut rng = SimRng::new(1);
        let cfg = InterventionConfig { infection_prob: 0.0, contact_reduction: 1.0, ..Default::default() };
        let mut sim = build(cfg, 10, &seq, &mut rng);
        let report = sim.step(&mut rng).unwrap();
        assert_eq!(report.active_contacts, 10);
    }

    /// With no infectious agents and no external hazard, only thinning can
    /// consume randomness during a step.
    fn next_draw_after_step(contact_reduction: f64) -> (u64, u64) {
        let seq = ContactSequence::repeat(ring(10), 1);
        let cfg = InterventionConfig { infection_prob: 0.0, contact_reduction, ..Default::default() };

        let mut stepped = SimRng::new(17);
        let mut sim = build(cfg.clone(), 10, &seq, &mut stepped);
        sim.step(&mut stepped).unwrap();

        let mut idle = SimRng::new(17);
        let _twin = build(cfg, 10, &seq, &mut idle);

        (stepped.random::<u64>(), idle.random::<u64>())
    }

    #[test]
    fn full_contact_retention_draws_no_randomness() {
        let (stepped, idle) = next_draw_after_step(1.0);
        assert_eq!(stepped, idle);
    }

    #[test]
    fn partial_retention_consumes_randomness() {
        let (stepped, idle) = next_draw_after_step(0.5);
        assert_ne!(stepped, idle);
    }

    #[test]
    fn thinning_keeps_floor_share() {
        let seq = ContactSequence::repeat(ring(10), 1);
        let mut rng = SimRng::new(1);
        let cfg = InterventionConfig { infection_prob: 0.0, contact_reduction: 0.55, ..Default::default() };
        let mut sim = build(cfg, 10, &seq, &mut rng);
        let report = sim.step(&mut rng).unwrap();
        assert_eq!(report.active_contacts, 5);
    }

    #[test]
    fn thinning_applies_after_isolation() {
        // 10 edges, 4 touch isolated agent 0 (seeded, aged past delay).
        let mut edges = ring(10);
        edges.extend([e(0, 5), e(0, 6)]);
        let seq = ContactSequence::from_days(vec![vec![], edges]);
        let mut rng = SimRng::new(1);
        let cfg = InterventionConfig {
            infection_prob:      0.0,
            infectious_days:     10,
            isolate_symptomatic: true,
            contact_reduction:   0.5,
            ..Default::default()
        };
        let mut sim = build(cfg, 10, &seq, &mut rng);
        sim.infect_agents(&[AgentId(0)]);
        sim.step(&mut rng);
        let report = sim.step(&mut rng).unwrap();
        assert_eq!(report.isolated, 1);
        // 12 - 4 = 8 survive isolation; half are kept.
        assert_eq!(report.active_contacts, 4);
    }
}
