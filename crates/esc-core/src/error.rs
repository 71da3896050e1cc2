//! Base error type.
//!
//! Sub-crates define their own error enums; `CoreError` covers the failures
//! that can happen before any escalator exists (loading and checking
//! configuration).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `esc-core`.
pub type CoreResult<T> = Result<T, CoreError>;
