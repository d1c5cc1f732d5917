//! Budget store seam.

use async_trait::async_trait;

use budgetry_shared::BudgetId;

use super::error::StoreError;
use crate::budget::{Budget, BudgetAllocation, BudgetPatch, NewAllocation, NewBudget};

/// CRUD access to budgets and their allocations.
///
/// Implementations assign IDs and keep `list` in insertion order.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BudgetStore: Send + Sync {
    /// Creates a draft budget and returns its ID.
    async fn create(&self, input: NewBudget) -> Result<BudgetId, StoreError>;

    /// Creates several budgets in one call, all or none.
    async fn create_batch(&self, inputs: Vec<NewBudget>) -> Result<Vec<BudgetId>, StoreError>;

    /// Fetches one budget.
    async fn get(&self, id: BudgetId) -> Result<Option<Budget>, StoreError>;

    /// Applies a partial update. Fails with `NotFound` for unknown IDs.
    async fn update(&self, id: BudgetId, patch: BudgetPatch) -> Result<(), StoreError>;

    /// Deletes a budget. Referential integrity is the caller's concern.
    async fn delete(&self, id: BudgetId) -> Result<(), StoreError>;

    /// Lists the budgets of a fiscal year in store order.
    async fn list(&self, year: i32) -> Result<Vec<Budget>, StoreError>;

    /// Creates an allocation under a budget.
    async fn create_allocation(&self, input: NewAllocation)
    -> Result<BudgetAllocation, StoreError>;

    /// Lists the allocations of a budget.
    async fn list_allocations(
        &self,
        budget_id: BudgetId,
    ) -> Result<Vec<BudgetAllocation>, StoreError>;
}
