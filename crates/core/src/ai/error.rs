//! AI parse errors.

use thiserror::Error;

/// Failure to turn a model reply into an issue suggestion.
#[derive(Debug, Error)]
pub enum AiParseError {
    /// Reply is not valid JSON.
    #[error("AI response is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// A required field is missing or blank.
    #[error("AI response is missing '{0}'")]
    MissingField(&'static str),
}
