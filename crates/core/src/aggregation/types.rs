//! Budget table row types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::budget::Budget;
use crate::taxonomy::{CategoryKey, MainCategory, SubCategory, UNKNOWN_KEY};

/// Main-category bucket of the budget table, including the fallback.
///
/// Variant order is the table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MainBucket {
    /// Income budgets.
    Income,
    /// Expense budgets.
    Expense,
    /// Budgets whose main category could not be resolved.
    Unknown,
}

impl MainBucket {
    /// Returns the string representation of the bucket.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
            Self::Unknown => UNKNOWN_KEY,
        }
    }

    /// The main category behind the bucket, if any.
    #[must_use]
    pub fn category(&self) -> Option<MainCategory> {
        match self {
            Self::Income => Some(MainCategory::Income),
            Self::Expense => Some(MainCategory::Expense),
            Self::Unknown => None,
        }
    }
}

impl From<Option<MainCategory>> for MainBucket {
    fn from(value: Option<MainCategory>) -> Self {
        match value {
            Some(MainCategory::Income) => Self::Income,
            Some(MainCategory::Expense) => Self::Expense,
            None => Self::Unknown,
        }
    }
}

impl fmt::Display for MainBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key of one group row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupKey {
    /// Main-category bucket.
    pub main: MainBucket,
    /// Sub-category, `unknown` when absent.
    pub sub: SubCategory,
}

impl GroupKey {
    /// Creates a group key.
    #[must_use]
    pub fn new(main: MainBucket, sub: SubCategory) -> Self {
        Self { main, sub }
    }

    /// The category key used to join reconciliation rows, if the main
    /// category is known.
    #[must_use]
    pub fn category_key(&self) -> Option<CategoryKey> {
        self.main
            .category()
            .map(|main| CategoryKey::new(main, self.sub.clone()))
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.main, self.sub)
    }
}

/// Roll-up of one sub-category group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRow {
    /// Group key.
    pub key: GroupKey,
    /// Display label of the sub-category.
    pub label: String,
    /// Σ `total_budget`.
    pub sub_category_total: Decimal,
    /// Σ `spent_amount`.
    pub sub_category_spent: Decimal,
    /// `sub_category_total - sub_category_spent`.
    pub sub_category_remaining: Decimal,
    /// Number of leaf rows following this group row.
    pub item_count: usize,
}

/// One budget, unmodified, tagged with its group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeafRow {
    /// Owning group.
    pub group: GroupKey,
    /// The budget.
    pub budget: Budget,
}

/// One row of the budget table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "row_type", rename_all = "snake_case")]
pub enum BudgetTableRow {
    /// Sub-category header with totals.
    Group(GroupRow),
    /// Budget line item.
    Leaf(LeafRow),
}

impl BudgetTableRow {
    /// Returns the group row, if this is one.
    #[must_use]
    pub fn as_group(&self) -> Option<&GroupRow> {
        match self {
            Self::Group(g) => Some(g),
            Self::Leaf(_) => None,
        }
    }

    /// Returns the leaf row, if this is one.
    #[must_use]
    pub fn as_leaf(&self) -> Option<&LeafRow> {
        match self {
            Self::Leaf(l) => Some(l),
            Self::Group(_) => None,
        }
    }
}

/// Planned totals per main category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateSummary {
    /// Σ planned income.
    pub income_total: Decimal,
    /// Σ planned expense.
    pub expense_total: Decimal,
    /// Σ planned amounts of unclassified budgets.
    pub unknown_total: Decimal,
    /// `income_total - expense_total`.
    pub net_planned: Decimal,
}
