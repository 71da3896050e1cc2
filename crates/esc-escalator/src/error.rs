use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EscalatorError {
    /// Construction was refused; no escalator exists.
    #[error("invalid escalator configuration: {0}")]
    InvalidConfiguration(String),

    /// A lane index outside `0..lane_count`.  Nothing was mutated.
    #[error("invalid lane {lane}: {reason}")]
    InvalidArgument {
        lane:   i64,
        reason: &'static str,
    },
}

pub type EscalatorResult<T> = Result<T, EscalatorError>;
