//! Budget error types.

use rust_decimal::Decimal;
use thiserror::Error;

use budgetry_shared::BudgetId;

use crate::store::StoreError;
use crate::taxonomy::TaxonomyError;
use crate::workflow::BudgetStatus;

/// Budget validation and mutation errors.
#[derive(Debug, Error)]
pub enum BudgetError {
    /// Budget not found.
    #[error("Budget not found: {0}")]
    NotFound(BudgetId),

    /// Budget is past draft and cannot be edited.
    #[error("Budget in status {0} cannot be edited")]
    NotEditable(BudgetStatus),

    /// Amount cannot be negative.
    #[error("Amount cannot be negative")]
    NegativeAmount,

    /// Fiscal year out of range.
    #[error("Invalid budget year: {0}")]
    InvalidYear(i32),

    /// Project name is required.
    #[error("Project name is required")]
    ProjectNameRequired,

    /// Category does not fit the taxonomy.
    #[error(transparent)]
    Category(#[from] TaxonomyError),

    /// Allocation larger than what is left on the budget.
    #[error("Allocation {requested} exceeds remaining amount {remaining}")]
    ExceedsRemaining {
        /// Requested allocation.
        requested: Decimal,
        /// Remaining amount on the budget.
        remaining: Decimal,
    },

    /// Total lowered below what is already allocated.
    #[error("Total {total} is below allocated amount {allocated}")]
    TotalBelowAllocated {
        /// Proposed total.
        total: Decimal,
        /// Already allocated amount.
        allocated: Decimal,
    },

    /// Budget store failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl BudgetError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::NegativeAmount
            | Self::InvalidYear(_)
            | Self::ProjectNameRequired
            | Self::Category(_) => 400,
            Self::NotEditable(_) | Self::ExceedsRemaining { .. } | Self::TotalBelowAllocated { .. } => {
                422
            }
            Self::Store(e) => e.status_code(),
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "BUDGET_NOT_FOUND",
            Self::NotEditable(_) => "BUDGET_NOT_EDITABLE",
            Self::NegativeAmount => "NEGATIVE_AMOUNT",
            Self::InvalidYear(_) => "INVALID_YEAR",
            Self::ProjectNameRequired => "PROJECT_NAME_REQUIRED",
            Self::Category(e) => e.error_code(),
            Self::ExceedsRemaining { .. } => "EXCEEDS_REMAINING",
            Self::TotalBelowAllocated { .. } => "TOTAL_BELOW_ALLOCATED",
            Self::Store(e) => e.error_code(),
        }
    }
}
