//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
///
/// Module errors in `budgetry-core` are folded into one of these before they
/// reach the HTTP surface.
#[derive(Debug, Error)]
pub enum AppError {
    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Caller supplied bad input.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Business rule violation (e.g. illegal status transition).
    #[error("Business rule violation: {0}")]
    BusinessRule(String),

    /// Conflict with existing state (e.g. year already has budgets).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A collaborator (budget store, transaction source) is unreachable.
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::Validation(_) => 400,
            Self::BusinessRule(_) => 422,
            Self::Conflict(_) => 409,
            Self::Unavailable(_) => 503,
            Self::Internal(_) => 500,
        }
    }

    /// Maps a status code onto the matching variant.
    ///
    /// Unlisted codes become `Internal`.
    #[must_use]
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            404 => Self::NotFound(message),
            400 => Self::Validation(message),
            422 => Self::BusinessRule(message),
            409 => Self::Conflict(message),
            503 => Self::Unavailable(message),
            _ => Self::Internal(message),
        }
    }

    /// The message without the category prefix.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::NotFound(m)
            | Self::Validation(m)
            | Self::BusinessRule(m)
            | Self::Conflict(m)
            | Self::Unavailable(m)
            | Self::Internal(m) => m,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::BusinessRule(_) => "BUSINESS_RULE_VIOLATION",
            Self::Conflict(_) => "CONFLICT",
            Self::Unavailable(_) => "SERVICE_UNAVAILABLE",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}
