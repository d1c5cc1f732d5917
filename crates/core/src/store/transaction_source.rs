//! Transaction source seam.

use std::collections::HashMap;
use std::ops::{Add, AddAssign};

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use budgetry_shared::BudgetId;

use super::error::StoreError;
use crate::taxonomy::CategoryKey;

/// Typed key actuals are requested by.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ActualsKey {
    /// Transactions attributed to one budget.
    Budget(BudgetId),
    /// Transactions tagged with a category and attributed to no budget.
    ///
    /// A transaction carrying both tags is counted under its budget only.
    Category(CategoryKey),
}

/// Posted income and expense totals for one key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actuals {
    /// Sum of income transactions.
    pub income: Decimal,
    /// Sum of expense transactions.
    pub expense: Decimal,
}

impl Actuals {
    /// Creates an actuals pair.
    #[must_use]
    pub const fn new(income: Decimal, expense: Decimal) -> Self {
        Self { income, expense }
    }
}

/// Sums saturate at the `Decimal` bounds.
impl Add for Actuals {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            income: self.income.saturating_add(rhs.income),
            expense: self.expense.saturating_add(rhs.expense),
        }
    }
}

impl AddAssign for Actuals {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

/// Read-only access to posted transactions.
///
/// Keys with no transactions may be omitted from the result; callers treat
/// them as zero. Failure to reach the source must be an error, never an
/// empty map.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TransactionSource: Send + Sync {
    /// Sums posted income/expense per key for one fiscal year.
    async fn actuals_for(
        &self,
        fiscal_year: i32,
        keys: &[ActualsKey],
    ) -> Result<HashMap<ActualsKey, Actuals>, StoreError>;
}
