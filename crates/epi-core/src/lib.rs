//! `epi-core` — foundational types for the epi contact-network simulator.
//!
//! This crate is a dependency of every other `epi-*` crate.  It has no
//! `epi-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`ids`]     | `AgentId`, `HouseholdId`                                  |
//! | [`day`]     | `Day` — simulated calendar-day counter                    |
//! | [`health`]  | `HealthState`, `CompartmentCounts`                        |
//! | [`config`]  | `InterventionConfig`, `ProgressionTiming`                 |
//! | [`rng`]     | `SimRng` — the single seed-controlled random stream       |
//! | [`error`]   | `EpiError`, `EpiResult`                                   |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod day;
pub mod error;
pub mod health;
pub mod ids;
pub mod rng;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{InterventionConfig, ProgressionTiming};
pub use day::Day;
pub use error::{EpiError, EpiResult};
pub use health::{CompartmentCounts, HealthState};
pub use ids::{AgentId, HouseholdId};
pub use rng::SimRng;
