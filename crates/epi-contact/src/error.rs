use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContactError {
    #[error("contact log parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot sample a contact sequence: no contact days available")]
    NoContactDays,

    #[error("household size must be at least 1")]
    InvalidHouseholdSize,

    #[error("population of {0} agents exceeds the AgentId range")]
    PopulationTooLarge(usize),

    #[error("invalid household partition: {0}")]
    InvalidPartition(String),
}

pub type ContactResult<T> = Result<T, ContactError>;
