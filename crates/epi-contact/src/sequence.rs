//! Synthetic multi-day contact traces built by bootstrap resampling.

use std::sync::Arc;

use epi_core::SimRng;

use crate::{ContactEdge, ContactError, ContactResult, DailyContacts, DayEdges};

/// An ordered list of `T` daily edge lists, consumed by one simulation
/// instance (or a paired group of instances within one trial).
///
/// The lists are shared with the [`DailyContacts`] they were drawn from.
#[derive(Clone, Debug, Default)]
pub struct ContactSequence {
    days: Vec<DayEdges>,
    /// Day-key each entry was drawn from; `None` for hand-built sequences.
    keys: Vec<Option<i64>>,
}

impl ContactSequence {
    /// A fixed sequence from explicit per-day edge lists.
    pub fn from_days(days: Vec<Vec<ContactEdge>>) -> Self {
        let keys = vec![None; days.len()];
        let days = days.into_iter().map(DayEdges::from).collect();
        Self { days, keys }
    }

    /// The same edge list repeated on each of `num_days` days.
    pub fn repeat(edges: Vec<ContactEdge>, num_days: usize) -> Self {
        let shared: DayEdges = edges.into();
        Self {
            days: vec![shared; num_days],
            keys: vec![None; num_days],
        }
    }

    /// Number of simulated days (`T`).
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Edges for simulated day `i`.
    ///
    /// # Panics
    /// Panics if `i >= len()`.
    #[inline]
    pub fn day(&self, i: usize) -> &[ContactEdge] {
        &self.days[i]
    }

    /// The shared list behind day `i` (for identity checks).
    pub fn shared(&self, i: usize) -> &DayEdges {
        &self.days[i]
    }

    /// Empirical day-key that simulated day `i` was drawn from.
    pub fn day_key(&self, i: usize) -> Option<i64> {
        self.keys.get(i).copied().flatten()
    }

    pub fn iter(&self) -> impl Iterator<Item = &[ContactEdge]> + '_ {
        self.days.iter().map(|d| &d[..])
    }

    /// Largest agent index referenced on any day, or `None` if every day is
    /// empty.
    pub fn max_agent_index(&self) -> Option<usize> {
        self.days
            .iter()
            .flat_map(|d| d.iter())
            .map(ContactEdge::max_index)
            .max()
    }

    /// Total edges across all days (duplicates counted).
    pub fn total_edges(&self) -> usize {
        self.days.iter().map(|d| d.len()).sum()
    }
}

/// Draw `num_days` day-keys uniformly with replacement from `daily` and
/// return the corresponding edge lists in draw order.
///
/// Consumes exactly `num_days` draws from `rng`.  Fails with
/// [`ContactError::NoContactDays`] when `daily` is empty, since no
/// non-empty sequence can be produced.
pub fn sample_contact_sequence(
    daily:    &DailyContacts,
    num_days: usize,
    rng:      &mut SimRng,
) -> ContactResult<ContactSequence> {
    if daily.is_empty() {
        return Err(ContactError::NoContactDays);
    }

    let pool: Vec<(i64, &DayEdges)> = daily.iter().collect();
    let mut days = Vec::with_capacity(num_days);
    let mut keys = Vec::with_capacity(num_days);

    for _ in 0..num_days {
        let (key, edges) = pool[rng.gen_range(0..pool.len())];
        days.push(Arc::clone(edges));
        keys.push(Some(key));
    }

    Ok(ContactSequence { days, keys })
}
