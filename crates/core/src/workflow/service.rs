//! Approval service for budget status transitions.
//!
//! The single enforcement point for the lifecycle: every edge not listed in
//! [`ApprovalService::is_valid_transition`] is rejected.

use chrono::Utc;

use budgetry_shared::UserId;

use crate::workflow::error::ApprovalError;
use crate::workflow::types::{ApprovalAction, BudgetStatus};

/// Stateless service validating budget transitions.
///
/// Each method returns the `ApprovalAction` to record, with audit data.
pub struct ApprovalService;

impl ApprovalService {
    /// Approve a draft budget.
    ///
    /// # Returns
    /// * `Ok(ApprovalAction::Approve)` if the transition is valid
    /// * `Err(ApprovalError::CommentRequired)` if the comment is blank
    /// * `Err(ApprovalError::InvalidTransition)` if not in Draft status
    pub fn approve(
        current_status: BudgetStatus,
        approved_by: UserId,
        comment: String,
    ) -> Result<ApprovalAction, ApprovalError> {
        if comment.trim().is_empty() {
            return Err(ApprovalError::CommentRequired);
        }

        match current_status {
            BudgetStatus::Draft => Ok(ApprovalAction::Approve {
                new_status: BudgetStatus::Approved,
                approved_by,
                approved_at: Utc::now(),
                comment,
            }),
            _ => Err(ApprovalError::InvalidTransition {
                from: current_status,
                to: BudgetStatus::Approved,
            }),
        }
    }

    /// Activate an approved budget. No amount checks are performed.
    ///
    /// # Returns
    /// * `Ok(ApprovalAction::Activate)` if the transition is valid
    /// * `Err(ApprovalError::InvalidTransition)` if not in Approved status
    pub fn activate(
        current_status: BudgetStatus,
        activated_by: UserId,
    ) -> Result<ApprovalAction, ApprovalError> {
        match current_status {
            BudgetStatus::Approved => Ok(ApprovalAction::Activate {
                new_status: BudgetStatus::Active,
                activated_by,
                activated_at: Utc::now(),
            }),
            _ => Err(ApprovalError::InvalidTransition {
                from: current_status,
                to: BudgetStatus::Active,
            }),
        }
    }

    /// Revoke an approved budget.
    ///
    /// # Returns
    /// * `Ok(ApprovalAction::Revoke)` if the transition is valid
    /// * `Err(ApprovalError::RevocationReasonRequired)` if the reason is blank
    /// * `Err(ApprovalError::InvalidTransition)` if not in Approved status
    pub fn revoke(
        current_status: BudgetStatus,
        revoked_by: UserId,
        reason: String,
    ) -> Result<ApprovalAction, ApprovalError> {
        if reason.trim().is_empty() {
            return Err(ApprovalError::RevocationReasonRequired);
        }

        match current_status {
            BudgetStatus::Approved => Ok(ApprovalAction::Revoke {
                new_status: BudgetStatus::Revoked,
                revoked_by,
                revoked_at: Utc::now(),
                reason,
            }),
            _ => Err(ApprovalError::InvalidTransition {
                from: current_status,
                to: BudgetStatus::Revoked,
            }),
        }
    }

    /// Check if a status transition is one of the permitted edges.
    ///
    /// Valid transitions:
    /// - Draft → Approved
    /// - Approved → Active
    /// - Approved → Revoked
    #[must_use]
    pub fn is_valid_transition(from: BudgetStatus, to: BudgetStatus) -> bool {
        matches!(
            (from, to),
            (BudgetStatus::Draft, BudgetStatus::Approved)
                | (
                    BudgetStatus::Approved,
                    BudgetStatus::Active | BudgetStatus::Revoked
                )
        )
    }
}
