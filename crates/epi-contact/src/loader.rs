//! CSV contact-log loader.
//!
//! # CSV format
//!
//! One row per observed contact.  Only the `day`, `id1` and `id2` columns
//! are read; any other columns (e.g. a `contact_time` stamp) are ignored.
//!
//! ```csv
//! contact_time,day,id1,id2
//! 1200,1,114,212
//! 1220,1,114,305
//! 1800,2,212,305
//! ```
//!
//! Raw ids are remapped to dense `AgentId`s in ascending raw-id order, so
//! the smallest raw id becomes `AgentId(0)`.  The remapping table is
//! returned alongside the contacts so results can be reported in raw ids.
//!
//! Self-contacts (`id1 == id2`) carry no transmission opportunity and are
//! dropped, but their ids still receive an index.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use epi_core::AgentId;

use crate::{ContactEdge, ContactError, ContactResult, DailyContacts};

#[cfg(feature = "fx-hash")]
type IdMap = rustc_hash::FxHashMap<u64, AgentId>;
#[cfg(not(feature = "fx-hash"))]
type IdMap = std::collections::HashMap<u64, AgentId>;

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ContactRecord {
    day: i64,
    id1: u64,
    id2: u64,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Contacts loaded from a log, with the dense-index → raw-id table.
#[derive(Clone, Debug, Default)]
pub struct LoadedContacts {
    pub daily: DailyContacts,
    /// `raw_ids[agent.index()]` is the id that agent had in the source log.
    pub raw_ids: Vec<u64>,
    /// Number of rows dropped because both ids were equal.
    pub self_contacts_dropped: usize,
}

impl LoadedContacts {
    /// Number of distinct agents seen in the log.
    pub fn population(&self) -> usize {
        self.raw_ids.len()
    }
}

/// Load a contact log from a CSV file.
pub fn load_contacts_csv(path: &Path) -> ContactResult<LoadedContacts> {
    let file = std::fs::File::open(path).map_err(ContactError::Io)?;
    load_contacts_reader(file)
}

/// Like [`load_contacts_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or for embedded logs.
pub fn load_contacts_reader<R: Read>(reader: R) -> ContactResult<LoadedContacts> {
    // ── Parse CSV rows ────────────────────────────────────────────────────
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut rows: Vec<ContactRecord> = Vec::new();
    for result in csv_reader.deserialize::<ContactRecord>() {
        let row = result.map_err(|e| ContactError::Parse(e.to_string()))?;
        rows.push(row);
    }

    // ── Dense id remapping (ascending raw id) ─────────────────────────────
    let mut raw_ids: Vec<u64> = rows.iter().flat_map(|r| [r.id1, r.id2]).collect();
    raw_ids.sort_unstable();
    raw_ids.dedup();

    let population = raw_ids.len();
    if u32::try_from(population).is_err() {
        return Err(ContactError::PopulationTooLarge(population));
    }

    let mut id_map = IdMap::default();
    id_map.reserve(population);
    for (i, &raw) in raw_ids.iter().enumerate() {
        id_map.insert(raw, AgentId(i as u32));
    }

    // ── Partition by day ──────────────────────────────────────────────────
    let mut by_day: BTreeMap<i64, Vec<ContactEdge>> = BTreeMap::new();
    let mut self_contacts_dropped = 0usize;

    for row in rows {
        // A day made only of self-contacts stays in the pool with no edges.
        let day_edges = by_day.entry(row.day).or_default();
        if row.id1 == row.id2 {
            self_contacts_dropped += 1;
            continue;
        }
        // Every raw id was inserted above.
        let (Some(&a), Some(&b)) = (id_map.get(&row.id1), id_map.get(&row.id2)) else {
            continue;
        };
        day_edges.push(ContactEdge::new(a, b));
    }

    if self_contacts_dropped > 0 {
        log::warn!("dropped {self_contacts_dropped} self-contact rows from contact log");
    }

    let mut daily: DailyContacts = by_day.into_iter().collect();
    daily.ensure_population(population);

    log::info!(
        "loaded contact log: {} days, {} edges, {} agents",
        daily.len(),
        daily.total_edges(),
        population
    );

    Ok(LoadedContacts { daily, raw_ids, self_contacts_dropped })
}
