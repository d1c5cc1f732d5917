//! Template generator error types.

use thiserror::Error;

use crate::store::StoreError;
use crate::taxonomy::TaxonomyError;

/// Errors that can occur while generating a yearly budget.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Budgets already exist for the year; nothing was created.
    #[error("Fiscal year {year} already has {existing} budget(s)")]
    Conflict {
        /// Target year.
        year: i32,
        /// Number of budgets already stored for it.
        existing: usize,
    },

    /// Target year out of range.
    #[error("Invalid budget year: {0}")]
    InvalidYear(i32),

    /// A template entry does not fit the taxonomy.
    #[error(transparent)]
    Taxonomy(#[from] TaxonomyError),

    /// Budget store failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl TemplateError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Conflict { .. } => 409,
            Self::InvalidYear(_) => 400,
            Self::Taxonomy(e) => e.status_code(),
            Self::Store(e) => e.status_code(),
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Conflict { .. } => "YEAR_ALREADY_BUDGETED",
            Self::InvalidYear(_) => "INVALID_YEAR",
            Self::Taxonomy(e) => e.error_code(),
            Self::Store(e) => e.error_code(),
        }
    }
}
