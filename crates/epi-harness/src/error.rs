use epi_contact::ContactError;
use epi_core::EpiError;
use epi_sim::SimError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("experiment requested zero Monte Carlo runs")]
    NoRuns,

    #[error("experiment configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] EpiError),

    #[error("contact data error: {0}")]
    Contact(#[from] ContactError),

    #[error("simulation error: {0}")]
    Sim(#[from] SimError),
}

pub type HarnessResult<T> = Result<T, HarnessError>;
