//! Daily isolation mask.
//!
//! The mask is recomputed from scratch at the start of every step, before
//! any transmission.  An isolated agent takes part in no contact edge that
//! day (both endpoints of an edge must be free for the edge to survive).

use epi_contact::Households;
use epi_core::{HealthState, InterventionConfig};

use crate::HealthStore;

/// Which isolation rules are active.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct IsolationPolicy {
    /// Isolate Infectious agents with `days_in_state >= 1` (one-day
    /// symptom-detection delay).
    pub symptomatic: bool,
    /// Isolate every member of a household that has an Infectious member.
    pub households:  bool,
}

impl IsolationPolicy {
    pub fn from_config(config: &InterventionConfig) -> Self {
        Self {
            symptomatic: config.isolate_symptomatic,
            households:  config.isolate_households,
        }
    }

    #[inline]
    pub fn is_active(self) -> bool {
        self.symptomatic || self.households
    }
}

/// Fill `mask` (resized to the population) with today's isolation flags and
/// return the number of isolated agents.
///
/// Household isolation applies regardless of how long the Infectious
/// member has been infected.  Without `households` the household rule is a
/// no-op.
pub fn isolation_mask(
    store:      &HealthStore,
    households: Option<&Households>,
    policy:     IsolationPolicy,
    mask:       &mut Vec<bool>,
) -> usize {
    mask.clear();
    mask.resize(store.count, false);

    if policy.symptomatic {
        for (i, (&s, &d)) in store.state.iter().zip(&store.days_in_state).enumerate() {
            if s == HealthState::Infectious && d >= 1 {
                mask[i] = true;
            }
        }
    }

    if let (true, Some(households)) = (policy.households, households) {
        for (_, members) in households.iter() {
            if members.iter().any(|&a| store.state(a).is_infectious()) {
                for &a in members {
                    mask[a.index()] = true;
                }
            }
        }
    }

    mask.iter().filter(|&&m| m).count()
}
