//! Reconciliation row types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use budgetry_shared::BudgetId;

use crate::store::Actuals;
use crate::taxonomy::{CategoryKey, MainCategory};

/// What a reconciliation row describes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ReconciliationSubject {
    /// A single budget.
    Budget(BudgetId),
    /// Every budget sharing a category.
    Category(CategoryKey),
}

/// Budgeted versus actual amounts for one budget or category group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActualIncomeExpenseData {
    /// Budget or category this row describes.
    pub subject: ReconciliationSubject,
    /// Side of the books the budget plans for.
    pub budget_category: MainCategory,
    /// Planned amount.
    pub budgeted_amount: Decimal,
    /// Posted income.
    pub actual_income: Decimal,
    /// Posted expense.
    pub actual_expense: Decimal,
    /// Actual on the budget's side minus budgeted.
    pub variance: Decimal,
    /// `variance / budgeted * 100`, two decimal places; zero when nothing
    /// was budgeted.
    pub variance_percentage: Decimal,
}

impl ActualIncomeExpenseData {
    /// Actual amount on the budget's own side.
    #[must_use]
    pub fn actual_amount(&self) -> Decimal {
        match self.budget_category {
            MainCategory::Income => self.actual_income,
            MainCategory::Expense => self.actual_expense,
        }
    }

    /// Posted actuals of this row.
    #[must_use]
    pub fn actuals(&self) -> Actuals {
        Actuals::new(self.actual_income, self.actual_expense)
    }
}
