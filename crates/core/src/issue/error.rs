//! Issue error types.

use thiserror::Error;

/// Issue validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IssueError {
    /// Required field missing or blank.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// Unknown category label.
    #[error("Unknown issue category: {0}")]
    UnknownCategory(String),

    /// Unknown status label.
    #[error("Unknown issue status: {0}")]
    UnknownStatus(String),

    /// Unknown sort option.
    #[error("Unknown sort option: {0}")]
    UnknownSort(String),
}
