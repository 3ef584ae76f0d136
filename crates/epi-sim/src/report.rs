//! Plain data returned by the engine.

use epi_core::{CompartmentCounts, Day};

/// What happened during one day's step.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DayReport {
    pub day:                Day,
    pub counts_before:      CompartmentCounts,
    pub counts_after:       CompartmentCounts,
    /// Infections applied from the external hazard.
    pub external_infections: u32,
    /// Infections applied from network transmission.
    pub network_infections: u32,
    pub recoveries:         u32,
    /// Agents masked by isolation this day.
    pub isolated:           u32,
    /// Edges evaluated for transmission after isolation and thinning.
    pub active_contacts:    u32,
}

impl DayReport {
    #[inline]
    pub fn new_infections(&self) -> u32 {
        self.external_infections + self.network_infections
    }
}

/// Result of running a simulation to the end of its contact sequence.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunOutcome {
    /// Infectious count recorded *before* each day's step; index 0 is the
    /// post-seeding state.
    pub infectious_series: Vec<u32>,
    pub final_counts:      CompartmentCounts,
    /// Agents initialised as Recovered by vaccination.
    pub vaccinated:        u32,
}

impl RunOutcome {
    /// Final Recovered count (includes vaccinated agents).
    #[inline]
    pub fn final_recovered(&self) -> u32 {
        self.final_counts.recovered
    }

    /// Agents infected at some point during the run: recovered from
    /// infection plus still Infectious.
    pub fn ever_infected(&self) -> u32 {
        self.final_counts.recovered - self.vaccinated + self.final_counts.infectious
    }

    /// `(day, count)` of the first maximum of the Infectious series, or
    /// `None` for an empty series.
    pub fn peak(&self) -> Option<(Day, u32)> {
        let mut best: Option<(Day, u32)> = None;
        for (i, &v) in self.infectious_series.iter().enumerate() {
            if best.is_none_or(|(_, b)| v > b) {
                best = Some((Day(i as u32), v));
            }
        }
        best
    }
}
