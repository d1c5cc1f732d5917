//! Budget data types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use budgetry_shared::{AllocationId, BudgetId, UserId};

use crate::taxonomy::{MainCategory, SubCategory};
use crate::workflow::BudgetStatus;

/// One planned line item of a fiscal year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    /// Store-assigned ID.
    pub id: BudgetId,
    /// Main category; absent on legacy records.
    pub main_category: Option<MainCategory>,
    /// Sub-category; absent on legacy records.
    pub sub_category: Option<SubCategory>,
    /// Generated item code, e.g. `I-MS-001`.
    pub item_code: Option<String>,
    /// Fiscal year.
    pub budget_year: i32,
    /// Planned amount, never negative.
    pub total_budget: Decimal,
    /// Sum of allocations carved out of this budget.
    pub allocated_amount: Decimal,
    /// Spend recorded by the owning application.
    pub spent_amount: Decimal,
    /// `total_budget - allocated_amount` as of the last allocation change.
    pub remaining_amount: Decimal,
    /// Lifecycle status.
    pub status: BudgetStatus,
    /// Free-form note.
    pub note: Option<String>,
    /// Longer description.
    pub description: Option<String>,
    /// User who created the budget.
    pub created_by: UserId,
    /// Project name; also the classification fallback for legacy records.
    pub project_name: String,
    /// Approver, set by the approve transition.
    pub approved_by: Option<UserId>,
    /// Approval timestamp.
    pub approved_at: Option<DateTime<Utc>>,
    /// Approval comment.
    pub approval_comment: Option<String>,
    /// Activation timestamp.
    pub activated_at: Option<DateTime<Utc>>,
    /// Revocation reason.
    pub revocation_reason: Option<String>,
    /// Revocation timestamp.
    pub revoked_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Budget {
    /// Materialises a new draft budget from creation input.
    ///
    /// Used by store implementations once they have assigned an ID.
    #[must_use]
    pub fn from_new(id: BudgetId, input: NewBudget, now: DateTime<Utc>) -> Self {
        Self {
            id,
            main_category: input.main_category,
            sub_category: input.sub_category,
            item_code: input.item_code,
            budget_year: input.budget_year,
            total_budget: input.total_budget,
            allocated_amount: Decimal::ZERO,
            spent_amount: Decimal::ZERO,
            remaining_amount: input.total_budget,
            status: BudgetStatus::Draft,
            note: input.note,
            description: input.description,
            created_by: input.created_by,
            project_name: input.project_name,
            approved_by: None,
            approved_at: None,
            approval_comment: None,
            activated_at: None,
            revocation_reason: None,
            revoked_at: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Input for creating a budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBudget {
    /// Main category.
    pub main_category: Option<MainCategory>,
    /// Sub-category.
    pub sub_category: Option<SubCategory>,
    /// Item code.
    pub item_code: Option<String>,
    /// Fiscal year.
    pub budget_year: i32,
    /// Planned amount.
    pub total_budget: Decimal,
    /// Note.
    pub note: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Creating user.
    pub created_by: UserId,
    /// Project name.
    pub project_name: String,
}

/// Partial update of a budget. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetPatch {
    /// New main category.
    pub main_category: Option<MainCategory>,
    /// New sub-category.
    pub sub_category: Option<SubCategory>,
    /// New item code.
    pub item_code: Option<String>,
    /// New planned amount; `remaining_amount` follows it.
    pub total_budget: Option<Decimal>,
    /// New allocated amount; `remaining_amount` follows it.
    pub allocated_amount: Option<Decimal>,
    /// New spent amount. Does not touch `remaining_amount`.
    pub spent_amount: Option<Decimal>,
    /// New status.
    pub status: Option<BudgetStatus>,
    /// New note.
    pub note: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New project name.
    pub project_name: Option<String>,
    /// Approval audit: approver.
    pub approved_by: Option<UserId>,
    /// Approval audit: timestamp.
    pub approved_at: Option<DateTime<Utc>>,
    /// Approval audit: comment.
    pub approval_comment: Option<String>,
    /// Activation timestamp.
    pub activated_at: Option<DateTime<Utc>>,
    /// Revocation reason.
    pub revocation_reason: Option<String>,
    /// Revocation timestamp.
    pub revoked_at: Option<DateTime<Utc>>,
}

impl BudgetPatch {
    /// Returns true when the patch touches fields a user edits through the
    /// budget form (as opposed to workflow or allocation bookkeeping).
    #[must_use]
    pub fn touches_editable_fields(&self) -> bool {
        self.main_category.is_some()
            || self.sub_category.is_some()
            || self.item_code.is_some()
            || self.total_budget.is_some()
            || self.note.is_some()
            || self.description.is_some()
            || self.project_name.is_some()
    }

    /// Applies the patch to a budget.
    pub fn apply_to(self, budget: &mut Budget, now: DateTime<Utc>) {
        let amounts_changed = self.total_budget.is_some() || self.allocated_amount.is_some();

        if let Some(v) = self.main_category {
            budget.main_category = Some(v);
        }
        if let Some(v) = self.sub_category {
            budget.sub_category = Some(v);
        }
        if let Some(v) = self.item_code {
            budget.item_code = Some(v);
        }
        if let Some(v) = self.total_budget {
            budget.total_budget = v;
        }
        if let Some(v) = self.allocated_amount {
            budget.allocated_amount = v;
        }
        if let Some(v) = self.spent_amount {
            budget.spent_amount = v;
        }
        if let Some(v) = self.status {
            budget.status = v;
        }
        if let Some(v) = self.note {
            budget.note = Some(v);
        }
        if let Some(v) = self.description {
            budget.description = Some(v);
        }
        if let Some(v) = self.project_name {
            budget.project_name = v;
        }
        if let Some(v) = self.approved_by {
            budget.approved_by = Some(v);
        }
        if let Some(v) = self.approved_at {
            budget.approved_at = Some(v);
        }
        if let Some(v) = self.approval_comment {
            budget.approval_comment = Some(v);
        }
        if let Some(v) = self.activated_at {
            budget.activated_at = Some(v);
        }
        if let Some(v) = self.revocation_reason {
            budget.revocation_reason = Some(v);
        }
        if let Some(v) = self.revoked_at {
            budget.revoked_at = Some(v);
        }

        if amounts_changed {
            budget.remaining_amount = budget.total_budget - budget.allocated_amount;
        }
        budget.updated_at = now;
    }
}

/// A slice of a budget earmarked for one transaction purpose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetAllocation {
    /// Allocation ID.
    pub id: AllocationId,
    /// Owning budget.
    pub budget_id: BudgetId,
    /// Transaction purpose ID.
    pub purpose_id: String,
    /// Transaction purpose name.
    pub purpose_name: String,
    /// Allocated amount.
    pub allocated_amount: Decimal,
    /// Spend against this allocation.
    pub spent_amount: Decimal,
    /// `allocated_amount - spent_amount`.
    pub remaining_amount: Decimal,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl BudgetAllocation {
    /// Materialises a new allocation from creation input.
    #[must_use]
    pub fn from_new(id: AllocationId, input: NewAllocation, now: DateTime<Utc>) -> Self {
        Self {
            id,
            budget_id: input.budget_id,
            purpose_id: input.purpose_id,
            purpose_name: input.purpose_name,
            allocated_amount: input.allocated_amount,
            spent_amount: Decimal::ZERO,
            remaining_amount: input.allocated_amount,
            created_at: now,
        }
    }
}

/// Input for creating an allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAllocation {
    /// Owning budget.
    pub budget_id: BudgetId,
    /// Transaction purpose ID.
    pub purpose_id: String,
    /// Transaction purpose name.
    pub purpose_name: String,
    /// Amount to carve out of the budget.
    pub allocated_amount: Decimal,
}
