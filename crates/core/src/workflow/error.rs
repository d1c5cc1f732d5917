//! Workflow error types for budget lifecycle management.

use thiserror::Error;

use budgetry_shared::BudgetId;

use crate::store::StoreError;
use crate::workflow::types::BudgetStatus;

/// Errors that can occur during approval transitions.
#[derive(Debug, Error)]
pub enum ApprovalError {
    /// Attempted a transition outside the three permitted edges.
    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: BudgetStatus,
        /// The attempted target status.
        to: BudgetStatus,
    },

    /// Approval comment is required but not provided.
    #[error("Approval comment is required")]
    CommentRequired,

    /// Revocation reason is required but not provided.
    #[error("Revocation reason is required")]
    RevocationReasonRequired,

    /// Budget not found.
    #[error("Budget {0} not found")]
    BudgetNotFound(BudgetId),

    /// Budget store failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApprovalError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::CommentRequired | Self::RevocationReasonRequired => 400,
            Self::InvalidTransition { .. } => 422,
            Self::BudgetNotFound(_) => 404,
            Self::Store(e) => e.status_code(),
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::CommentRequired => "APPROVAL_COMMENT_REQUIRED",
            Self::RevocationReasonRequired => "REVOCATION_REASON_REQUIRED",
            Self::BudgetNotFound(_) => "BUDGET_NOT_FOUND",
            Self::Store(e) => e.error_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_transition_error() {
        let err = ApprovalError::InvalidTransition {
            from: BudgetStatus::Draft,
            to: BudgetStatus::Active,
        };
        assert_eq!(err.status_code(), 422);
        assert_eq!(err.error_code(), "INVALID_TRANSITION");
        assert!(err.to_string().contains("draft"));
        assert!(err.to_string().contains("active"));
    }

    #[test]
    fn test_comment_required_error() {
        let err = ApprovalError::CommentRequired;
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "APPROVAL_COMMENT_REQUIRED");
    }

    #[test]
    fn test_store_error_passes_through() {
        let err = ApprovalError::from(StoreError::unavailable("budget store"));
        assert_eq!(err.status_code(), 503);
        assert_eq!(err.to_string(), "budget store is unavailable");
    }
}
