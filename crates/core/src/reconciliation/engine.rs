//! Joins budgets against posted actuals.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, warn};

use budgetry_shared::BudgetId;

use super::error::ReconciliationError;
use super::service::ReconciliationService;
use super::types::{ActualIncomeExpenseData, ReconciliationSubject};
use crate::aggregation::BudgetAggregator;
use crate::budget::Budget;
use crate::store::{Actuals, ActualsKey, TransactionSource};
use crate::taxonomy::{CategoryKey, MainCategory};

/// Computes actual income/expense and variance per budget and per category.
///
/// Budgets are classified with the same aggregator that builds the budget
/// table, so category rows join onto its group rows. Budgets without a
/// resolvable main category reconcile on the expense side.
///
/// Transactions tagged only with a category count toward that category's
/// group row once per fiscal year. A budget row includes them only when the
/// budget is the sole budget of its category in that year.
#[derive(Clone)]
pub struct ReconciliationEngine {
    source: Arc<dyn TransactionSource>,
    aggregator: Arc<BudgetAggregator>,
}

impl ReconciliationEngine {
    /// Creates an engine over a transaction source.
    #[must_use]
    pub fn new(source: Arc<dyn TransactionSource>, aggregator: Arc<BudgetAggregator>) -> Self {
        Self { source, aggregator }
    }

    /// One row per distinct budget, in input order.
    ///
    /// # Errors
    ///
    /// Returns `ReconciliationError::SourceUnavailable` if the transaction
    /// source fails.
    pub async fn calculate_actual_income_expense(
        &self,
        budgets: &[Budget],
    ) -> Result<Vec<ActualIncomeExpenseData>, ReconciliationError> {
        let members = self.classified(budgets);
        if members.is_empty() {
            return Ok(Vec::new());
        }

        let fetched = self.fetch_actuals(&members).await?;
        let rows = members
            .iter()
            .map(|(budget, key)| {
                let mut actuals = fetched.budget(budget.id);
                if fetched.sole_member(budget.budget_year, key) {
                    actuals += fetched.category(budget.budget_year, key);
                }
                ReconciliationService::row(
                    ReconciliationSubject::Budget(budget.id),
                    key.main,
                    budget.total_budget,
                    actuals,
                )
            })
            .collect();
        Ok(rows)
    }

    /// One row per category, in order of first appearance.
    ///
    /// Actuals are summed over member budgets before the variance is taken,
    /// so each row's variance equals `Σ actual - Σ budgeted` exactly.
    ///
    /// # Errors
    ///
    /// Returns `ReconciliationError::SourceUnavailable` if the transaction
    /// source fails.
    pub async fn calculate_group_actual_income_expense(
        &self,
        budgets: &[Budget],
    ) -> Result<Vec<ActualIncomeExpenseData>, ReconciliationError> {
        let members = self.classified(budgets);
        if members.is_empty() {
            return Ok(Vec::new());
        }

        let fetched = self.fetch_actuals(&members).await?;

        let mut order: Vec<CategoryKey> = Vec::new();
        let mut totals: HashMap<CategoryKey, (Decimal, Actuals)> = HashMap::new();
        let mut counted: HashSet<(i32, &CategoryKey)> = HashSet::new();
        for (budget, key) in &members {
            let entry = totals.entry(key.clone()).or_insert_with(|| {
                order.push(key.clone());
                (Decimal::ZERO, Actuals::default())
            });
            entry.0 = entry.0.saturating_add(budget.total_budget);
            entry.1 += fetched.budget(budget.id);
            if counted.insert((budget.budget_year, key)) {
                entry.1 += fetched.category(budget.budget_year, key);
            }
        }

        let rows = order
            .into_iter()
            .filter_map(|key| {
                let (budgeted, sums) = totals.remove(&key)?;
                let main = key.main;
                Some(ReconciliationService::row(
                    ReconciliationSubject::Category(key),
                    main,
                    budgeted,
                    sums,
                ))
            })
            .collect();
        Ok(rows)
    }

    /// Category a budget reconciles under.
    #[must_use]
    pub fn category_of(&self, budget: &Budget) -> CategoryKey {
        let group = self.aggregator.classify(budget);
        group
            .category_key()
            .unwrap_or_else(|| CategoryKey::new(MainCategory::Expense, group.sub))
    }

    /// Distinct budgets paired with their reconciliation category.
    fn classified<'a>(&self, budgets: &'a [Budget]) -> Vec<(&'a Budget, CategoryKey)> {
        distinct(budgets)
            .into_iter()
            .map(|budget| (budget, self.category_of(budget)))
            .collect()
    }

    /// Queries the source once per fiscal year present in `members`, for
    /// every budget and every distinct category of that year.
    async fn fetch_actuals(
        &self,
        members: &[(&Budget, CategoryKey)],
    ) -> Result<FetchedActuals, ReconciliationError> {
        let mut fetched = FetchedActuals::default();
        let mut by_year: BTreeMap<i32, Vec<ActualsKey>> = BTreeMap::new();
        for (budget, key) in members {
            let year = budget.budget_year;
            let keys = by_year.entry(year).or_default();
            keys.push(ActualsKey::Budget(budget.id));

            let count = fetched.members.entry((year, key.clone())).or_default();
            if *count == 0 {
                keys.push(ActualsKey::Category(key.clone()));
            }
            *count += 1;
        }

        for (year, keys) in by_year {
            debug!(year, keys = keys.len(), "Fetching actuals");
            let found = self
                .source
                .actuals_for(year, &keys)
                .await
                .map_err(|e| {
                    warn!(year, error = %e, "Transaction source failed");
                    ReconciliationError::SourceUnavailable(e)
                })?;

            for (key, value) in found {
                match key {
                    ActualsKey::Budget(id) => {
                        fetched.budgets.insert(id, value);
                    }
                    ActualsKey::Category(category) => {
                        fetched.categories.insert((year, category), value);
                    }
                }
            }
        }
        Ok(fetched)
    }
}

/// Actuals returned by the source for one reconciliation call.
#[derive(Debug, Default)]
struct FetchedActuals {
    budgets: HashMap<BudgetId, Actuals>,
    /// Category-only actuals per fiscal year.
    categories: HashMap<(i32, CategoryKey), Actuals>,
    /// Number of input budgets per fiscal year and category.
    members: HashMap<(i32, CategoryKey), usize>,
}

impl FetchedActuals {
    fn budget(&self, id: BudgetId) -> Actuals {
        self.budgets.get(&id).copied().unwrap_or_default()
    }

    fn category(&self, year: i32, key: &CategoryKey) -> Actuals {
        self.categories
            .get(&(year, key.clone()))
            .copied()
            .unwrap_or_default()
    }

    fn sole_member(&self, year: i32, key: &CategoryKey) -> bool {
        self.members.get(&(year, key.clone())) == Some(&1)
    }
}

/// Drops repeated budget IDs, keeping the first occurrence.
fn distinct(budgets: &[Budget]) -> Vec<&Budget> {
    let mut seen = HashSet::with_capacity(budgets.len());
    budgets.iter().filter(|b| seen.insert(b.id)).collect()
}
