//! Reconciliation error types.

use thiserror::Error;

use crate::store::StoreError;

/// Errors that can occur while reconciling budgets against actuals.
#[derive(Debug, Error)]
pub enum ReconciliationError {
    /// The transaction source failed; no actuals were computed.
    #[error("Actual data unavailable: {0}")]
    SourceUnavailable(#[source] StoreError),
}

impl ReconciliationError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::SourceUnavailable(_) => 503,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::SourceUnavailable(_) => "ACTUALS_UNAVAILABLE",
        }
    }
}
