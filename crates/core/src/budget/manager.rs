//! Async budget operations over a [`BudgetStore`].

use std::sync::Arc;

use tracing::{debug, info};

use budgetry_shared::BudgetId;

use super::error::BudgetError;
use super::service::BudgetService;
use super::types::{Budget, BudgetAllocation, BudgetPatch, NewAllocation, NewBudget};
use crate::store::{BudgetStore, StoreError};
use crate::taxonomy::Taxonomy;

/// Validates budget mutations against the taxonomy and persists them.
#[derive(Clone)]
pub struct BudgetManager {
    store: Arc<dyn BudgetStore>,
    taxonomy: Arc<Taxonomy>,
}

impl BudgetManager {
    /// Creates a manager over a store and a taxonomy.
    #[must_use]
    pub fn new(store: Arc<dyn BudgetStore>, taxonomy: Arc<Taxonomy>) -> Self {
        Self { store, taxonomy }
    }

    /// Creates a draft budget.
    ///
    /// A missing main category is inferred from the sub-category.
    ///
    /// # Errors
    ///
    /// Returns a validation error or a store failure.
    pub async fn create(&self, mut input: NewBudget) -> Result<Budget, BudgetError> {
        BudgetService::validate_new_budget(&self.taxonomy, &input)?;

        if input.main_category.is_none() {
            input.main_category = input
                .sub_category
                .as_ref()
                .and_then(|sub| self.taxonomy.main_category_of(sub));
        }

        let id = self.store.create(input).await?;
        let budget = self.load(id).await?;
        info!(
            budget_id = %id,
            year = budget.budget_year,
            total = %budget.total_budget,
            "Budget created"
        );
        Ok(budget)
    }

    /// Edits a draft budget.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::NotFound`, a validation error or a store failure.
    pub async fn edit(&self, id: BudgetId, mut patch: BudgetPatch) -> Result<Budget, BudgetError> {
        let budget = self.load(id).await?;
        BudgetService::validate_edit(&self.taxonomy, &budget, &patch)?;

        if patch.main_category.is_none() && budget.main_category.is_none() {
            patch.main_category = patch
                .sub_category
                .as_ref()
                .and_then(|sub| self.taxonomy.main_category_of(sub));
        }

        self.store.update(id, patch).await?;
        debug!(budget_id = %id, "Budget edited");
        self.load(id).await
    }

    /// Deletes a budget.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::NotFound` or a store failure.
    pub async fn delete(&self, id: BudgetId) -> Result<(), BudgetError> {
        self.load(id).await?;
        self.store.delete(id).await?;
        info!(budget_id = %id, "Budget deleted");
        Ok(())
    }

    /// Lists the budgets of a fiscal year in store order.
    ///
    /// # Errors
    ///
    /// Returns a store failure.
    pub async fn list(&self, year: i32) -> Result<Vec<Budget>, BudgetError> {
        Ok(self.store.list(year).await?)
    }

    /// Carves an allocation out of a budget's remaining amount.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::NotFound`, `BudgetError::ExceedsRemaining`,
    /// `BudgetError::NegativeAmount` or a store failure.
    pub async fn allocate(&self, input: NewAllocation) -> Result<BudgetAllocation, BudgetError> {
        let budget = self.load(input.budget_id).await?;
        let outcome = BudgetService::plan_allocation(&budget, &input)?;

        let allocation = self.store.create_allocation(input).await?;
        self.store.update(budget.id, outcome.into_patch()).await?;

        info!(
            budget_id = %budget.id,
            allocation_id = %allocation.id,
            amount = %allocation.allocated_amount,
            remaining = %outcome.remaining_amount,
            "Budget allocation created"
        );
        Ok(allocation)
    }

    /// Lists the allocations of a budget.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::NotFound` or a store failure.
    pub async fn list_allocations(
        &self,
        budget_id: BudgetId,
    ) -> Result<Vec<BudgetAllocation>, BudgetError> {
        self.load(budget_id).await?;
        Ok(self.store.list_allocations(budget_id).await?)
    }

    async fn load(&self, id: BudgetId) -> Result<Budget, BudgetError> {
        match self.store.get(id).await {
            Ok(Some(budget)) => Ok(budget),
            Ok(None) | Err(StoreError::NotFound(_)) => Err(BudgetError::NotFound(id)),
            Err(e) => Err(e.into()),
        }
    }
}
