//! Applies approval transitions to stored budgets.

use std::sync::Arc;

use tracing::info;

use budgetry_shared::{BudgetId, UserId};

use crate::budget::Budget;
use crate::store::BudgetStore;
use crate::workflow::error::ApprovalError;
use crate::workflow::service::ApprovalService;
use crate::workflow::types::ApprovalAction;

/// Loads a budget, runs a transition through [`ApprovalService`] and writes
/// the resulting status and audit fields back.
///
/// Concurrent transitions on the same budget are not serialised here.
#[derive(Clone)]
pub struct BudgetLifecycle {
    store: Arc<dyn BudgetStore>,
}

impl BudgetLifecycle {
    /// Creates a lifecycle over a budget store.
    #[must_use]
    pub fn new(store: Arc<dyn BudgetStore>) -> Self {
        Self { store }
    }

    /// Approves a draft budget.
    pub async fn approve(
        &self,
        id: BudgetId,
        approved_by: UserId,
        comment: String,
    ) -> Result<Budget, ApprovalError> {
        let budget = self.load(id).await?;
        let action = ApprovalService::approve(budget.status, approved_by, comment)?;
        self.record(id, action).await
    }

    /// Activates an approved budget.
    pub async fn activate(&self, id: BudgetId, activated_by: UserId) -> Result<Budget, ApprovalError> {
        let budget = self.load(id).await?;
        let action = ApprovalService::activate(budget.status, activated_by)?;
        self.record(id, action).await
    }

    /// Revokes an approved budget.
    pub async fn revoke(
        &self,
        id: BudgetId,
        revoked_by: UserId,
        reason: String,
    ) -> Result<Budget, ApprovalError> {
        let budget = self.load(id).await?;
        let action = ApprovalService::revoke(budget.status, revoked_by, reason)?;
        self.record(id, action).await
    }

    async fn load(&self, id: BudgetId) -> Result<Budget, ApprovalError> {
        self.store
            .get(id)
            .await?
            .ok_or(ApprovalError::BudgetNotFound(id))
    }

    async fn record(&self, id: BudgetId, action: ApprovalAction) -> Result<Budget, ApprovalError> {
        let new_status = action.new_status();
        self.store.update(id, action.into_patch()).await?;
        info!(budget_id = %id, status = %new_status, "Budget status changed");
        self.load(id).await
    }
}
