//! Contact edges and the empirical day-key → edge-list mapping.

use std::collections::BTreeMap;
use std::sync::Arc;

use epi_core::AgentId;

/// An unordered pair of agents who met on one simulated day.
///
/// Duplicates within a day are kept; each copy is an independent
/// transmission opportunity.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct ContactEdge {
    pub a: AgentId,
    pub b: AgentId,
}

impl ContactEdge {
    #[inline]
    pub fn new(a: AgentId, b: AgentId) -> Self {
        Self { a, b }
    }

    /// `true` if `agent` is one of the two endpoints.
    #[inline]
    pub fn involves(&self, agent: AgentId) -> bool {
        self.a == agent || self.b == agent
    }

    /// The larger of the two endpoint indices.
    #[inline]
    pub fn max_index(&self) -> usize {
        self.a.index().max(self.b.index())
    }
}

impl From<(u32, u32)> for ContactEdge {
    #[inline]
    fn from((a, b): (u32, u32)) -> Self {
        Self::new(AgentId(a), AgentId(b))
    }
}

/// One day's edge list, shared immutably between the source map and every
/// sequence that drew it.
pub type DayEdges = Arc<[ContactEdge]>;

// ── DailyContacts ─────────────────────────────────────────────────────────────

/// Mapping from empirical day-key to that day's contact edges.
///
/// Keys are kept in ascending order so that sampling by position is
/// reproducible for a given seed.  Agent indices are expected to be dense
/// in `[0, population_size())`; this type does not remap them.
#[derive(Clone, Debug, Default)]
pub struct DailyContacts {
    days:       BTreeMap<i64, DayEdges>,
    population: usize,
}

impl DailyContacts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or replace) the edge list for `key`.
    ///
    /// Returns the previous list for that key, if any.
    pub fn insert_day(&mut self, key: i64, edges: Vec<ContactEdge>) -> Option<DayEdges> {
        if let Some(max) = edges.iter().map(ContactEdge::max_index).max() {
            self.population = self.population.max(max + 1);
        }
        self.days.insert(key, edges.into())
    }

    /// Raise the population size to at least `n`.
    ///
    /// Used by loaders that know of agents who never appear in an edge.
    pub fn ensure_population(&mut self, n: usize) {
        self.population = self.population.max(n);
    }

    /// Edge list for one day-key.
    pub fn day(&self, key: i64) -> Option<&DayEdges> {
        self.days.get(&key)
    }

    /// Day-keys in ascending order.
    pub fn day_keys(&self) -> impl Iterator<Item = i64> + '_ {
        self.days.keys().copied()
    }

    /// `(key, edges)` pairs in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, &DayEdges)> + '_ {
        self.days.iter().map(|(&k, v)| (k, v))
    }

    /// Number of distinct days.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Total number of edges across all days (duplicates counted).
    pub fn total_edges(&self) -> usize {
        self.days.values().map(|d| d.len()).sum()
    }

    /// Number of agents: largest endpoint index + 1, or the value set by
    /// [`ensure_population`](Self::ensure_population) if larger.  `0` when
    /// there are no edges.
    pub fn population_size(&self) -> usize {
        self.population
    }
}

impl FromIterator<(i64, Vec<ContactEdge>)> for DailyContacts {
    fn from_iter<I: IntoIterator<Item = (i64, Vec<ContactEdge>)>>(iter: I) -> Self {
        let mut daily = DailyContacts::new();
        for (key, edges) in iter {
            daily.insert_day(key, edges);
        }
        daily
    }
}
