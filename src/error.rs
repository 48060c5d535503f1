//! Error types for the quiz core and its configuration.

use thiserror::Error;

/// Errors raised while handling player input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum QuizError {
    /// Answer text did not contain an integer
    #[error("answer is not a number: {input:?}")]
    InvalidInput { input: String },
}

/// Errors raised while loading settings.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("malformed settings: {0}")]
    Json(#[from] serde_json::Error),
    #[error("delay must be non-zero: {0}")]
    ZeroDelay(&'static str),
    #[error("{field} of {value} ms exceeds {max} ms")]
    DelayTooLong {
        field: &'static str,
        value: u32,
        max: u32,
    },
}
