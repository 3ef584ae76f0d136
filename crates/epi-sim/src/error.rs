use epi_core::{AgentId, EpiError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] EpiError),

    #[error("{what} covers {got} agents but the population is {expected}")]
    AgentCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("contact sequence references {agent}, outside population {population}")]
    AgentOutOfRange {
        agent:      AgentId,
        population: usize,
    },
}

pub type SimResult<T> = Result<T, SimError>;
