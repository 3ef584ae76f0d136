//! `epi-harness` — Monte Carlo experiments comparing interventions.
//!
//! # Crate layout
//!
//! | Module            | Contents                                                   |
//! |-------------------|------------------------------------------------------------|
//! | [`experiment`]    | `ExperimentConfig` — seed, runs, days, household size      |
//! | [`trial`]         | `Scenario`, `RunSummary`, `Trial`                          |
//! | [`hypothesis`]    | `Hypothesis` trait and the three studies with their reports |
//! | [`monte_carlo`]   | `MonteCarlo` — the paired trial loop                       |
//! | [`metrics`]       | `mean`, `proportion`, `relative_reduction`                 |
//! | [`observer`]      | `HarnessObserver`, `NoopHarnessObserver`                   |
//! | [`error`]         | `HarnessError`, `HarnessResult<T>`                         |
//!
//! # Paired design
//!
//! Each trial samples one synthetic contact timeline and runs every
//! scenario of the hypothesis on it, so scenario differences within a
//! trial come from the intervention and the transmission draws, not from
//! different contact patterns.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `parallel` | Runs trials on Rayon's thread pool (one child RNG each).  |
//! | `serde`    | Serde derives on configs, parameters, summaries, reports. |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use epi_contact::load_contacts_csv;
//! use epi_harness::{Hypothesis, MonteCarlo, VaccinationOutbreak};
//!
//! let contacts = load_contacts_csv("contacts.csv")?;
//! let h3 = VaccinationOutbreak::default();
//! let report = MonteCarlo::new(h3.default_experiment()).run(&h3, &contacts.daily)?;
//! println!("{report}");
//! ```

pub mod error;
pub mod experiment;
pub mod hypothesis;
pub mod metrics;
pub mod monte_carlo;
pub mod observer;
pub mod trial;


pub use error::{HarnessError, HarnessResult};
pub use experiment::ExperimentConfig;
pub use hypothesis::{
    ContactReduction, DiseaseParams, Hypothesis, IsolationComparison, IsolationReport,
    OutbreakReport, PeakTimingReport, VaccinationOutbreak,
};
pub use metrics::{mean, proportion, relative_reduction};
pub use monte_carlo::MonteCarlo;
pub use observer::{HarnessObserver, NoopHarnessObserver};
pub use trial::{RunSummary, Scenario, Trial};
