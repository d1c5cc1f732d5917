//! Budget lifecycle types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use budgetry_shared::UserId;

use crate::budget::BudgetPatch;

/// Budget status in the approval workflow.
///
/// The engine moves budgets along three edges only:
/// - Draft → Approved (approve, comment required)
/// - Approved → Active (activate)
/// - Approved → Revoked (revoke, reason required)
///
/// `Completed` and `Cancelled` are set by the surrounding application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    /// Being prepared; the only editable status.
    Draft,
    /// Approved, waiting for activation.
    Approved,
    /// In force for the fiscal year.
    Active,
    /// Approval withdrawn.
    Revoked,
    /// Closed out.
    Completed,
    /// Abandoned.
    Cancelled,
}

impl BudgetStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Approved => "approved",
            Self::Active => "active",
            Self::Revoked => "revoked",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "draft" => Some(Self::Draft),
            "approved" => Some(Self::Approved),
            "active" => Some(Self::Active),
            "revoked" => Some(Self::Revoked),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Returns true if the budget's fields can be edited.
    #[must_use]
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Draft)
    }

    /// Returns true if no engine transition leaves this status.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Revoked | Self::Completed | Self::Cancelled)
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A validated status transition with its audit data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApprovalAction {
    /// Draft budget approved.
    Approve {
        /// Status after the transition.
        new_status: BudgetStatus,
        /// Approver.
        approved_by: UserId,
        /// When it was approved.
        approved_at: DateTime<Utc>,
        /// Approval comment.
        comment: String,
    },
    /// Approved budget put in force.
    Activate {
        /// Status after the transition.
        new_status: BudgetStatus,
        /// User who activated it.
        activated_by: UserId,
        /// When it was activated.
        activated_at: DateTime<Utc>,
    },
    /// Approval withdrawn.
    Revoke {
        /// Status after the transition.
        new_status: BudgetStatus,
        /// User who revoked it.
        revoked_by: UserId,
        /// When it was revoked.
        revoked_at: DateTime<Utc>,
        /// Why it was revoked.
        reason: String,
    },
}

impl ApprovalAction {
    /// Returns the new status resulting from this action.
    #[must_use]
    pub fn new_status(&self) -> BudgetStatus {
        match self {
            Self::Approve { new_status, .. }
            | Self::Activate { new_status, .. }
            | Self::Revoke { new_status, .. } => *new_status,
        }
    }

    /// Converts the action into the store update that records it.
    #[must_use]
    pub fn into_patch(self) -> BudgetPatch {
        match self {
            Self::Approve {
                new_status,
                approved_by,
                approved_at,
                comment,
            } => BudgetPatch {
                status: Some(new_status),
                approved_by: Some(approved_by),
                approved_at: Some(approved_at),
                approval_comment: Some(comment),
                ..BudgetPatch::default()
            },
            Self::Activate {
                new_status,
                activated_at,
                ..
            } => BudgetPatch {
                status: Some(new_status),
                activated_at: Some(activated_at),
                ..BudgetPatch::default()
            },
            Self::Revoke {
                new_status,
                revoked_at,
                reason,
                ..
            } => BudgetPatch {
                status: Some(new_status),
                revocation_reason: Some(reason),
                revoked_at: Some(revoked_at),
                ..BudgetPatch::default()
            },
        }
    }
}
