//! `epi-contact` — the empirical contact network and its resampling.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                  |
//! |----------------|-----------------------------------------------------------|
//! | [`edge`]       | `ContactEdge`, `DailyContacts` (day-key → shared edge list) |
//! | [`household`]  | `Households` — random fixed-size cohabitation partition   |
//! | [`sequence`]   | `ContactSequence`, `sample_contact_sequence` (bootstrap)  |
//! | [`loader`]     | `load_contacts_csv`, `load_contacts_reader`               |
//! | [`error`]      | `ContactError`, `ContactResult<T>`                        |
//!
//! # Bootstrap model (summary)
//!
//! Each empirical day is treated as an exchangeable unit.  A synthetic
//! timeline of `T` days is built by drawing `T` day-keys uniformly *with
//! replacement* and appending each chosen day's edge list:
//!
//! ```text
//! keys     = ascending day-keys of DailyContacts
//! sequence = [ daily[keys[uniform(0..len)]] ; T ]
//! ```
//!
//! Edge lists are reference-counted (`Arc<[ContactEdge]>`), so a sequence
//! shares its lists with the source map and cannot mutate them.

pub mod edge;
pub mod error;
pub mod household;
pub mod loader;
pub mod sequence;


pub use edge::{ContactEdge, DailyContacts, DayEdges};
pub use error::{ContactError, ContactResult};
pub use household::Households;
pub use loader::{LoadedContacts, load_contacts_csv, load_contacts_reader};
pub use sequence::{ContactSequence, sample_contact_sequence};
