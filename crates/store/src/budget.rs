//! In-memory budget store.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use tokio::sync::RwLock;
use tracing::debug;

use budgetry_core::budget::{Budget, BudgetAllocation, BudgetPatch, NewAllocation, NewBudget};
use budgetry_core::store::{BudgetStore, StoreError};
use budgetry_shared::{AllocationId, BudgetId};

/// Budgets held in a vector, so `list` returns insertion order.
#[derive(Debug, Default)]
pub struct InMemoryBudgetStore {
    budgets: RwLock<Vec<Budget>>,
    allocations: DashMap<BudgetId, Vec<BudgetAllocation>>,
}

impl InMemoryBudgetStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored budgets across all years.
    pub async fn len(&self) -> usize {
        self.budgets.read().await.len()
    }

    /// Returns true if no budget is stored.
    pub async fn is_empty(&self) -> bool {
        self.budgets.read().await.is_empty()
    }
}

#[async_trait]
impl BudgetStore for InMemoryBudgetStore {
    async fn create(&self, input: NewBudget) -> Result<BudgetId, StoreError> {
        let budget = Budget::from_new(BudgetId::new(), input, Utc::now());
        let id = budget.id;
        self.budgets.write().await.push(budget);
        debug!(budget_id = %id, "Stored budget");
        Ok(id)
    }

    async fn create_batch(&self, inputs: Vec<NewBudget>) -> Result<Vec<BudgetId>, StoreError> {
        let now = Utc::now();
        let created: Vec<Budget> = inputs
            .into_iter()
            .map(|input| Budget::from_new(BudgetId::new(), input, now))
            .collect();
        let ids = created.iter().map(|b| b.id).collect();

        // One write guard for the whole batch.
        self.budgets.write().await.extend(created);
        Ok(ids)
    }

    async fn get(&self, id: BudgetId) -> Result<Option<Budget>, StoreError> {
        Ok(self
            .budgets
            .read()
            .await
            .iter()
            .find(|b| b.id == id)
            .cloned())
    }

    async fn update(&self, id: BudgetId, patch: BudgetPatch) -> Result<(), StoreError> {
        let mut budgets = self.budgets.write().await;
        let budget = budgets
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| StoreError::not_found(format!("budget {id}")))?;
        patch.apply_to(budget, Utc::now());
        Ok(())
    }

    async fn delete(&self, id: BudgetId) -> Result<(), StoreError> {
        let mut budgets = self.budgets.write().await;
        let before = budgets.len();
        budgets.retain(|b| b.id != id);
        if budgets.len() == before {
            return Err(StoreError::not_found(format!("budget {id}")));
        }
        self.allocations.remove(&id);
        Ok(())
    }

    async fn list(&self, year: i32) -> Result<Vec<Budget>, StoreError> {
        Ok(self
            .budgets
            .read()
            .await
            .iter()
            .filter(|b| b.budget_year == year)
            .cloned()
            .collect())
    }

    async fn create_allocation(
        &self,
        input: NewAllocation,
    ) -> Result<BudgetAllocation, StoreError> {
        let budget_id = input.budget_id;
        if self.get(budget_id).await?.is_none() {
            return Err(StoreError::not_found(format!("budget {budget_id}")));
        }

        let allocation = BudgetAllocation::from_new(AllocationId::new(), input, Utc::now());
        self.allocations
            .entry(budget_id)
            .or_default()
            .push(allocation.clone());
        Ok(allocation)
    }

    async fn list_allocations(
        &self,
        budget_id: BudgetId,
    ) -> Result<Vec<BudgetAllocation>, StoreError> {
        Ok(self
            .allocations
            .get(&budget_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default())
    }
}
