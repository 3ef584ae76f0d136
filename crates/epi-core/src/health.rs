//! Health compartments (S/I/R) and population-level counts.
//!
//! Transitions are monotone: `Susceptible → Infectious → Recovered`.
//! Vaccination is the only way to enter `Recovered` without passing through
//! `Infectious`, and it happens once, at simulation construction.

use std::fmt;

/// Compartment an agent currently occupies.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HealthState {
    /// Can be infected (default state).
    #[default]
    Susceptible,
    /// Infected and able to transmit along contact edges.
    Infectious,
    /// Immune: either recovered from infection or vaccinated at t = 0.
    Recovered,
}

impl HealthState {
    #[inline]
    pub fn is_susceptible(self) -> bool {
        matches!(self, HealthState::Susceptible)
    }

    #[inline]
    pub fn is_infectious(self) -> bool {
        matches!(self, HealthState::Infectious)
    }

    #[inline]
    pub fn is_recovered(self) -> bool {
        matches!(self, HealthState::Recovered)
    }

    /// Single-letter label, useful for CSV column values.
    pub fn as_str(self) -> &'static str {
        match self {
            HealthState::Susceptible => "S",
            HealthState::Infectious  => "I",
            HealthState::Recovered   => "R",
        }
    }
}

impl fmt::Display for HealthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── CompartmentCounts ─────────────────────────────────────────────────────────

/// Number of agents in each compartment at one instant.
///
/// `susceptible + infectious + recovered` always equals the population size.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompartmentCounts {
    pub susceptible: u32,
    pub infectious:  u32,
    pub recovered:   u32,
}

impl CompartmentCounts {
    /// Tally a slice of health states.
    pub fn tally(states: &[HealthState]) -> Self {
        let mut counts = CompartmentCounts::default();
        for &s in states {
            counts.add(s);
        }
        counts
    }

    #[inline]
    pub fn add(&mut self, state: HealthState) {
        match state {
            HealthState::Susceptible => self.susceptible += 1,
            HealthState::Infectious  => self.infectious += 1,
            HealthState::Recovered   => self.recovered += 1,
        }
    }

    /// Inverse of [`add`](Self::add).
    #[inline]
    pub fn remove(&mut self, state: HealthState) {
        match state {
            HealthState::Susceptible => self.susceptible -= 1,
            HealthState::Infectious  => self.infectious -= 1,
            HealthState::Recovered   => self.recovered -= 1,
        }
    }

    #[inline]
    pub fn get(&self, state: HealthState) -> u32 {
        match state {
            HealthState::Susceptible => self.susceptible,
            HealthState::Infectious  => self.infectious,
            HealthState::Recovered   => self.recovered,
        }
    }

    /// Total population covered by these counts.
    #[inline]
    pub fn total(&self) -> u32 {
        self.susceptible + self.infectious + self.recovered
    }
}

impl fmt::Display for CompartmentCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S={} I={} R={}", self.susceptible, self.infectious, self.recovered)
    }
}
