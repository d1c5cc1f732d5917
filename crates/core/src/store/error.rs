//! Collaborator error types.

use thiserror::Error;

/// Errors reported by a budget store or transaction source.
///
/// `Unavailable` is deliberately separate from an empty result: callers must
/// be able to tell "no data" from "could not ask".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Collaborator could not be reached.
    #[error("{0} is unavailable")]
    Unavailable(String),

    /// Referenced record does not exist.
    #[error("Record not found: {0}")]
    NotFound(String),
}

impl StoreError {
    /// Creates an unavailable error.
    #[must_use]
    pub fn unavailable(what: impl Into<String>) -> Self {
        Self::Unavailable(what.into())
    }

    /// Creates a not found error.
    #[must_use]
    pub fn not_found(what: impl ToString) -> Self {
        Self::NotFound(what.to_string())
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Unavailable(_) => 503,
            Self::NotFound(_) => 404,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unavailable(_) => "COLLABORATOR_UNAVAILABLE",
            Self::NotFound(_) => "RECORD_NOT_FOUND",
        }
    }
}
