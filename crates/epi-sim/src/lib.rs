//! `epi-sim` — the per-day epidemic state machine.
//!
//! # Per-day step
//!
//! ```text
//! for day in 0..sequence.len():
//!   record I count                     (series[day])
//!   ① External   — each S agent marked with p_external
//!   ② Isolation  — mask agents; drop edges touching a masked agent
//!   ③ Thinning   — keep floor(|edges| × contact_reduction) edges at random
//!   ④ Transmit   — each edge, both directions: I→S with p_infection
//!   ⑤ Apply      — marked agents still S become I (days_in_state = 0)
//!   ⑥ Progress   — I agents age one day; age == infectious_days → R
//! ```
//!
//! One shared [`SimRng`](epi_core::SimRng) is passed to every stochastic
//! call (`build`, `seed_initial_infections`, `step`, `run`).  The order of
//! draws above is fixed and is part of the reproducibility contract.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use epi_contact::ContactSequence;
//! use epi_core::{InterventionConfig, SimRng};
//! use epi_sim::SimBuilder;
//!
//! let mut rng = SimRng::new(42);
//! let mut sim = SimBuilder::new(InterventionConfig::default(), n, &sequence)
//!     .households(&households)
//!     .build(&mut rng)?;
//! sim.seed_initial_infections(3, &mut rng);
//! let outcome = sim.run(&mut rng);
//! println!("final recovered: {}", outcome.final_recovered());
//! ```

pub mod builder;
pub mod error;
pub mod isolation;
pub mod observer;
pub mod report;
pub mod sim;
pub mod store;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use isolation::{IsolationPolicy, isolation_mask};
pub use observer::{NoopObserver, SimObserver};
pub use report::{DayReport, RunOutcome};
pub use sim::Simulation;
pub use store::HealthStore;
