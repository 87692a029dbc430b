//! Error taxonomy shared by the duration, repository and report layers.
//!
//! Validation failures carry the specific reason so callers can show it.
//! Storage and internal failures display a generic message only; the
//! underlying cause stays reachable through `source()` for logging.

use thiserror::Error;

/// Result alias used by the core modules.
pub type Result<T> = std::result::Result<T, TaskflowError>;

#[derive(Debug, Error)]
pub enum TaskflowError {
    /// End instant strictly earlier than the start instant.
    #[error("end time {end} is earlier than start time {start}")]
    InvalidRange { start: String, end: String },

    /// Malformed or contradictory input.
    #[error("invalid input: {0}")]
    Validation(String),

    /// An id that had to exist does not.
    #[error("{0} not found")]
    NotFound(String),

    /// A report selection matched no rows.
    #[error("no records matched the report selection")]
    NoRows,

    #[error("storage failure")]
    Storage(#[from] rusqlite::Error),

    #[error("internal error")]
    Internal(String),
}

impl TaskflowError {
    pub fn not_found(what: impl Into<String>) -> Self {
        TaskflowError::NotFound(what.into())
    }

    pub fn validation(reason: impl Into<String>) -> Self {
        TaskflowError::Validation(reason.into())
    }

    /// True for both malformed input and inverted time ranges.
    pub fn is_validation(&self) -> bool {
        matches!(self, TaskflowError::InvalidRange { .. } | TaskflowError::Validation(_))
    }

    /// True for missing ids and empty report selections.
    pub fn is_not_found(&self) -> bool {
        matches!(self, TaskflowError::NotFound(_) | TaskflowError::NoRows)
    }
}
