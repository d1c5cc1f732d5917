//! In-memory transaction source.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;

use budgetry_core::store::{Actuals, ActualsKey, StoreError, TransactionSource};
use budgetry_core::taxonomy::CategoryKey;
use budgetry_shared::{BudgetId, TransactionId};

/// Side of the books a transaction posts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money received.
    Income,
    /// Money paid out.
    Expense,
}

/// A posted financial transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostedTransaction {
    /// Transaction ID.
    pub id: TransactionId,
    /// Fiscal year the transaction belongs to.
    pub fiscal_year: i32,
    /// Income or expense.
    pub kind: TransactionKind,
    /// Amount, positive.
    pub amount: Decimal,
    /// Budget the transaction is attributed to.
    pub budget_id: Option<BudgetId>,
    /// Category the transaction is tagged with.
    pub category: Option<CategoryKey>,
}

impl PostedTransaction {
    /// Creates an untagged income transaction.
    #[must_use]
    pub fn income(fiscal_year: i32, amount: Decimal) -> Self {
        Self::new(fiscal_year, TransactionKind::Income, amount)
    }

    /// Creates an untagged expense transaction.
    #[must_use]
    pub fn expense(fiscal_year: i32, amount: Decimal) -> Self {
        Self::new(fiscal_year, TransactionKind::Expense, amount)
    }

    fn new(fiscal_year: i32, kind: TransactionKind, amount: Decimal) -> Self {
        Self {
            id: TransactionId::new(),
            fiscal_year,
            kind,
            amount,
            budget_id: None,
            category: None,
        }
    }

    /// Attributes the transaction to a budget.
    #[must_use]
    pub fn for_budget(mut self, budget_id: BudgetId) -> Self {
        self.budget_id = Some(budget_id);
        self
    }

    /// Tags the transaction with a category.
    #[must_use]
    pub fn in_category(mut self, category: CategoryKey) -> Self {
        self.category = Some(category);
        self
    }

    fn matches(&self, key: &ActualsKey) -> bool {
        match key {
            ActualsKey::Budget(id) => self.budget_id == Some(*id),
            ActualsKey::Category(category) => {
                self.budget_id.is_none() && self.category.as_ref() == Some(category)
            }
        }
    }

    fn as_actuals(&self) -> Actuals {
        match self.kind {
            TransactionKind::Income => Actuals::new(self.amount, Decimal::ZERO),
            TransactionKind::Expense => Actuals::new(Decimal::ZERO, self.amount),
        }
    }
}

/// Transactions held in memory, with a switch to simulate an outage.
#[derive(Debug)]
pub struct InMemoryTransactionSource {
    transactions: RwLock<Vec<PostedTransaction>>,
    available: AtomicBool,
}

impl Default for InMemoryTransactionSource {
    fn default() -> Self {
        Self {
            transactions: RwLock::default(),
            available: AtomicBool::new(true),
        }
    }
}

impl InMemoryTransactionSource {
    /// Creates an empty, available source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a posted transaction.
    pub async fn post(&self, transaction: PostedTransaction) {
        self.transactions.write().await.push(transaction);
    }

    /// Makes every subsequent query succeed or fail.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }
}

#[async_trait]
impl TransactionSource for InMemoryTransactionSource {
    async fn actuals_for(
        &self,
        fiscal_year: i32,
        keys: &[ActualsKey],
    ) -> Result<HashMap<ActualsKey, Actuals>, StoreError> {
        if !self.available.load(Ordering::SeqCst) {
            return Err(StoreError::unavailable("transaction source"));
        }

        let transactions = self.transactions.read().await;
        let mut totals: HashMap<ActualsKey, Actuals> = HashMap::new();
        for tx in transactions.iter().filter(|tx| tx.fiscal_year == fiscal_year) {
            for key in keys.iter().filter(|key| tx.matches(key)) {
                *totals.entry(key.clone()).or_default() += tx.as_actuals();
            }
        }

        debug!(
            fiscal_year,
            requested = keys.len(),
            found = totals.len(),
            "Summed actuals"
        );
        Ok(totals)
    }
}
