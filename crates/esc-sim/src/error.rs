use esc_core::CoreError;
use esc_escalator::EscalatorError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("escalator error: {0}")]
    Escalator(#[from] EscalatorError),

    /// Every usable `PersonId` has been handed out.
    #[error("person ids exhausted after {issued} arrivals")]
    PersonIdsExhausted { issued: u32 },
}

impl From<CoreError> for SimError {
    fn from(e: CoreError) -> Self {
        SimError::Config(e.to_string())
    }
}

pub type SimResult<T> = Result<T, SimError>;
