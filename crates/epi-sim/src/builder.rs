//! Fluent builder for constructing a [`Simulation`].

use epi_contact::{ContactSequence, Households};
use epi_core::{AgentId, HealthState, InterventionConfig, SimRng};

use crate::{HealthStore, SimError, SimResult, Simulation};

/// Fluent builder for [`Simulation`].
///
/// # Required inputs
///
/// - [`InterventionConfig`] — disease and intervention parameters
/// - population size `N` — agents are `AgentId(0)..AgentId(N)`
/// - [`ContactSequence`] — one edge list per simulated day (borrowed)
///
/// # Optional inputs
///
/// | Method             | Default                                   |
/// |--------------------|-------------------------------------------|
/// | `.households(h)`   | none — household isolation is a no-op     |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, n, &sequence)
///     .households(&households)
///     .build(&mut rng)?;
/// ```
pub struct SimBuilder<'a> {
    config:     InterventionConfig,
    population: usize,
    sequence:   &'a ContactSequence,
    households: Option<&'a Households>,
}

impl<'a> SimBuilder<'a> {
    /// Create a builder with all required inputs.
    pub fn new(config: InterventionConfig, population: usize, sequence: &'a ContactSequence) -> Self {
        Self {
            config,
            population,
            sequence,
            households: None,
        }
    }

    /// Share a household partition with the simulation (read-only).
    ///
    /// Must cover exactly the same population.
    pub fn households(mut self, households: &'a Households) -> Self {
        self.households = Some(households);
        self
    }

    /// Validate inputs, vaccinate, and return a ready-to-seed [`Simulation`].
    ///
    /// Draws from `rng` only when vaccination coverage selects at least one
    /// agent.
    pub fn build(self, rng: &mut SimRng) -> SimResult<Simulation<'a>> {
        self.config.validate()?;

        let n = self.population;
        if u32::try_from(n).is_err() {
            return Err(SimError::Config(format!(
                "population {n} exceeds the AgentId range"
            )));
        }

        // ── Validate shared inputs ────────────────────────────────────────
        if let Some(h) = self.households {
            if h.population() != n {
                return Err(SimError::AgentCountMismatch {
                    expected: n,
                    got:      h.population(),
                    what:     "household partition",
                });
            }
        }

        if let Some(max) = self.sequence.max_agent_index() {
            if max >= n {
                return Err(SimError::AgentOutOfRange {
                    agent:      AgentId(max as u32),
                    population: n,
                });
            }
        }

        // ── Initial states: vaccinated agents start Recovered ─────────────
        let mut store = HealthStore::new(n);
        let n_vax = self.config.vaccinated_count(n);
        if n_vax > 0 {
            for i in rng.sample_indices(n, n_vax) {
                store.set_state(AgentId(i as u32), HealthState::Recovered);
            }
        }

        Ok(Simulation::new(
            self.config,
            store,
            self.sequence,
            self.households,
            n_vax as u32,
        ))
    }
}
