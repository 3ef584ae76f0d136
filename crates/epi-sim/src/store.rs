//! Structure-of-Arrays health state for every agent.

use epi_core::{AgentId, CompartmentCounts, HealthState};

/// Per-agent health arrays, indexed by `AgentId`.
///
/// Every `Vec` has exactly `count` elements.  Writes go through
/// [`set_state`](Self::set_state) so that `days_in_state` is reset on every
/// transition and the running compartment tally stays exact.
#[derive(Clone, Debug)]
pub struct HealthStore {
    /// Number of agents.  Equals the length of every SoA `Vec`.
    pub count: usize,

    pub(crate) state:         Vec<HealthState>,
    pub(crate) days_in_state: Vec<u32>,
    counts:                   CompartmentCounts,
}

impl HealthStore {
    /// `count` agents, all Susceptible with `days_in_state = 0`.
    pub fn new(count: usize) -> Self {
        Self {
            count,
            state:         vec![HealthState::Susceptible; count],
            days_in_state: vec![0; count],
            counts:        CompartmentCounts {
                susceptible: count as u32,
                ..Default::default()
            },
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterator over all `AgentId`s in ascending index order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.count as u32).map(AgentId)
    }

    #[inline]
    pub fn state(&self, agent: AgentId) -> HealthState {
        self.state[agent.index()]
    }

    #[inline]
    pub fn days_in_state(&self, agent: AgentId) -> u32 {
        self.days_in_state[agent.index()]
    }

    /// Read-only view of the state array.
    pub fn states(&self) -> &[HealthState] {
        &self.state
    }

    /// Current S/I/R tally (maintained incrementally, O(1)).
    #[inline]
    pub fn counts(&self) -> CompartmentCounts {
        self.counts
    }

    /// Agents currently in `state`, ascending.
    pub fn ids_in(&self, state: HealthState) -> Vec<AgentId> {
        self.state
            .iter()
            .enumerate()
            .filter(|&(_, &s)| s == state)
            .map(|(i, _)| AgentId(i as u32))
            .collect()
    }

    /// Move `agent` to `state` and reset its day counter.
    #[inline]
    pub fn set_state(&mut self, agent: AgentId, state: HealthState) {
        let i = agent.index();
        self.counts.remove(self.state[i]);
        self.counts.add(state);
        self.state[i] = state;
        self.days_in_state[i] = 0;
    }

    /// Increment `agent`'s day counter and return the new value.
    #[inline]
    pub(crate) fn age(&mut self, agent: AgentId) -> u32 {
        let d = &mut self.days_in_state[agent.index()];
        *d += 1;
        *d
    }
}
