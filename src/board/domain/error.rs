//! Error types for board domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing or parsing board domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task text is empty after trimming.
    #[error("task text must not be empty")]
    EmptyText,

    /// The status value is not one of the three lanes.
    #[error("unknown task status: {0}")]
    UnknownStatus(String),

    /// The move direction is neither forward nor backward.
    #[error("unknown direction '{0}', expected forward or backward")]
    UnknownDirection(String),

    /// The sort mode is not recognised.
    #[error("unknown sort mode '{0}', expected default, ascending or descending")]
    UnknownSortMode(String),
}
