//! The `Simulation` struct and its day loop.

use epi_contact::{ContactEdge, ContactSequence, Households};
use epi_core::{AgentId, CompartmentCounts, Day, HealthState, InterventionConfig, ProgressionTiming, SimRng};

use crate::{DayReport, HealthStore, IsolationPolicy, NoopObserver, RunOutcome, SimObserver, isolation_mask};

// ── Simulation ────────────────────────────────────────────────────────────────

/// One simulation instance: owns its health arrays, borrows the shared
/// contact sequence and household partition.
///
/// Create via [`SimBuilder`][crate::SimBuilder], seed with
/// [`seed_initial_infections`](Self::seed_initial_infections), then
/// [`run`](Self::run) (or drive it with [`step`](Self::step)).
///
/// Nothing here returns an error: empty populations, empty edge lists,
/// fully immune populations and oversized seed requests all degrade to
/// no-ops so that a Monte Carlo batch never aborts on a degenerate trial.
pub struct Simulation<'a> {
    config:     InterventionConfig,
    policy:     IsolationPolicy,
    store:      HealthStore,
    sequence:   &'a ContactSequence,
    households: Option<&'a Households>,
    /// Next day to simulate.
    day:        Day,
    vaccinated: u32,

    // ── Per-step scratch buffers (reused across days) ─────────────────────
    mask:   Vec<bool>,
    /// Agents infected during the current step (cleared at step end).
    fresh:  Vec<bool>,
    /// Agents marked for infection; external marks first, then network.
    marked: Vec<AgentId>,
    active: Vec<ContactEdge>,
}

impl<'a> Simulation<'a> {
    pub(crate) fn new(
        config:     InterventionConfig,
        store:      HealthStore,
        sequence:   &'a ContactSequence,
        households: Option<&'a Households>,
        vaccinated: u32,
    ) -> Self {
        let n = store.count;
        Self {
            policy: IsolationPolicy::from_config(&config),
            config,
            store,
            sequence,
            households,
            day: Day::ZERO,
            vaccinated,
            mask:   Vec::with_capacity(n),
            fresh:  vec![false; n],
            marked: Vec::new(),
            active: Vec::new(),
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn config(&self) -> &InterventionConfig {
        &self.config
    }

    pub fn store(&self) -> &HealthStore {
        &self.store
    }

    pub fn population(&self) -> usize {
        self.store.count
    }

    #[inline]
    pub fn counts(&self) -> CompartmentCounts {
        self.store.counts()
    }

    /// The next day to be simulated.
    pub fn day(&self) -> Day {
        self.day
    }

    /// Agents vaccinated at construction.
    pub fn vaccinated(&self) -> u32 {
        self.vaccinated
    }

    pub fn days_remaining(&self) -> usize {
        self.sequence.len().saturating_sub(self.day.index())
    }

    /// `true` once every day of the contact sequence has been stepped.
    pub fn is_finished(&self) -> bool {
        self.day.index() >= self.sequence.len()
    }

    // ── Seeding ───────────────────────────────────────────────────────────

    /// Infect `min(count, |S|)` Susceptible agents chosen uniformly without
    /// replacement.  Returns the number actually infected.
    ///
    /// With no Susceptible agents this is a no-op and draws nothing.
    pub fn seed_initial_infections(&mut self, count: usize, rng: &mut SimRng) -> usize {
        let susceptible = self.store.ids_in(HealthState::Susceptible);
        if susceptible.is_empty() {
            return 0;
        }
        let picks = rng.sample_indices(susceptible.len(), count);
        for &p in &picks {
            self.store.set_state(susceptible[p], HealthState::Infectious);
        }
        picks.len()
    }

    /// Infect specific agents (index-case placement).  Agents that are not
    /// Susceptible are skipped.  Returns the number actually infected.
    pub fn infect_agents(&mut self, agents: &[AgentId]) -> usize {
        let mut infected = 0;
        for &agent in agents {
            if agent.index() < self.store.count && self.store.state(agent).is_susceptible() {
                self.store.set_state(agent, HealthState::Infectious);
                infected += 1;
            }
        }
        infected
    }

    // ── Run loop ──────────────────────────────────────────────────────────

    /// Run to the end of the contact sequence without callbacks.
    pub fn run(&mut self, rng: &mut SimRng) -> RunOutcome {
        self.run_with(rng, &mut NoopObserver)
    }

    /// Run from the current day to the end of the contact sequence,
    /// recording the Infectious count before each step.
    pub fn run_with<O: SimObserver>(&mut self, rng: &mut SimRng, observer: &mut O) -> RunOutcome {
        let mut infectious_series = Vec::with_capacity(self.days_remaining());
        loop {
            if self.is_finished() {
                break;
            }
            let before = self.counts();
            infectious_series.push(before.infectious);
            observer.on_day_start(self.day, before);

            let Some(report) = self.step(rng) else { break };
            observer.on_day_end(&report);
        }
        observer.on_sim_end(self.day, self.counts());

        RunOutcome {
            infectious_series,
            final_counts: self.counts(),
            vaccinated:   self.vaccinated,
        }
    }

    // ── Core day processing ───────────────────────────────────────────────

    /// Advance one day.  Returns `None` if the contact sequence is exhausted.
    pub fn step(&mut self, rng: &mut SimRng) -> Option<DayReport> {
        let day = self.day;
        if self.is_finished() {
            return None;
        }
        let counts_before = self.counts();
        self.marked.clear();

        // ── Phase 1: external hazard ──────────────────────────────────────
        let p_external = self.config.external_infection_prob;
        if p_external > 0.0 {
            for (i, s) in self.store.state.iter().enumerate() {
                if s.is_susceptible() && rng.gen_bool(p_external) {
                    self.marked.push(AgentId(i as u32));
                }
            }
        }
        let external_marks = self.marked.len();

        // ── Phase 2: isolation filter ─────────────────────────────────────
        let sequence = self.sequence;
        let edges = sequence.day(day.index());
        let isolated = isolation_mask(&self.store, self.households, self.policy, &mut self.mask);

        self.active.clear();
        if isolated == 0 {
            self.active.extend_from_slice(edges);
        } else {
            let mask = &self.mask;
            self.active.extend(
                edges
                    .iter()
                    .filter(|e| !mask[e.a.index()] && !mask[e.b.index()])
                    .copied(),
            );
        }

        // ── Phase 3: contact thinning ─────────────────────────────────────
        //
        // At contact_reduction == 1.0 the filtered set is used as-is and no
        // randomness is drawn.
        if self.config.thins_contacts() && !self.active.is_empty() {
            let keep = (self.active.len() as f64 * self.config.contact_reduction).floor() as usize;
            let picked = rng.sample_indices(self.active.len(), keep);
            let thinned: Vec<ContactEdge> = picked.iter().map(|&i| self.active[i]).collect();
            self.active = thinned;
        }

        // ── Phase 4: transmission ─────────────────────────────────────────
        //
        // States are read as of the start of the step; marks are applied in
        // phase 5, so an agent infected today cannot transmit today.
        let p = self.config.infection_prob;
        let state = &self.store.state;
        for edge in &self.active {
            let (sa, sb) = (state[edge.a.index()], state[edge.b.index()]);
            if sa.is_infectious() && sb.is_susceptible() && rng.gen_bool(p) {
                self.marked.push(edge.b);
            }
            if sb.is_infectious() && sa.is_susceptible() && rng.gen_bool(p) {
                self.marked.push(edge.a);
            }
        }

        // ── Phase 5: apply infections ─────────────────────────────────────
        let mut external_infections = 0u32;
        let mut network_infections = 0u32;
        for (k, &agent) in self.marked.iter().enumerate() {
            if !self.store.state(agent).is_susceptible() {
                continue; // marked twice
            }
            self.store.set_state(agent, HealthState::Infectious);
            self.fresh[agent.index()] = true;
            if k < external_marks {
                external_infections += 1;
            } else {
                network_infections += 1;
            }
        }

        // ── Phase 6: progression I → R ────────────────────────────────────
        let skip_fresh = self.config.progression == ProgressionTiming::Deferred;
        let infectious_days = self.config.infectious_days;
        let mut recoveries = 0u32;
        for i in 0..self.store.count {
            if !self.store.state[i].is_infectious() || (skip_fresh && self.fresh[i]) {
                continue;
            }
            let agent = AgentId(i as u32);
            if self.store.age(agent) >= infectious_days {
                self.store.set_state(agent, HealthState::Recovered);
                recoveries += 1;
            }
        }
        for &agent in &self.marked {
            self.fresh[agent.index()] = false;
        }

        self.day = day.next();

        Some(DayReport {
            day,
            counts_before,
            counts_after: self.counts(),
            external_infections,
            network_infections,
            recoveries,
            isolated: isolated as u32,
            active_contacts: self.active.len() as u32,
        })
    }
}
