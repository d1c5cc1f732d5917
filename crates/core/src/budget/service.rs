//! Budget service for validation and allocation arithmetic.

use rust_decimal::Decimal;

use super::error::BudgetError;
use super::types::{Budget, BudgetPatch, NewAllocation, NewBudget};
use crate::taxonomy::{MainCategory, SubCategory, Taxonomy};

/// Lowest fiscal year accepted.
pub const MIN_BUDGET_YEAR: i32 = 1900;

/// Highest fiscal year accepted.
pub const MAX_BUDGET_YEAR: i32 = 9999;

/// Budget amounts after an allocation mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocationOutcome {
    /// New allocated amount of the budget.
    pub allocated_amount: Decimal,
    /// New remaining amount of the budget.
    pub remaining_amount: Decimal,
}

impl AllocationOutcome {
    /// The store update that records this outcome.
    #[must_use]
    pub fn into_patch(self) -> BudgetPatch {
        BudgetPatch {
            allocated_amount: Some(self.allocated_amount),
            ..BudgetPatch::default()
        }
    }
}

/// Budget service for business logic.
pub struct BudgetService;

impl BudgetService {
    /// Validate budget creation input.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::NegativeAmount` if the total is negative.
    /// Returns `BudgetError::InvalidYear` if the year is out of range.
    /// Returns `BudgetError::ProjectNameRequired` if the name is blank.
    /// Returns `BudgetError::Category` if the categories do not fit the taxonomy.
    pub fn validate_new_budget(taxonomy: &Taxonomy, input: &NewBudget) -> Result<(), BudgetError> {
        if input.total_budget < Decimal::ZERO {
            return Err(BudgetError::NegativeAmount);
        }

        if !(MIN_BUDGET_YEAR..=MAX_BUDGET_YEAR).contains(&input.budget_year) {
            return Err(BudgetError::InvalidYear(input.budget_year));
        }

        if input.project_name.trim().is_empty() {
            return Err(BudgetError::ProjectNameRequired);
        }

        Self::validate_categories(
            taxonomy,
            input.main_category,
            input.sub_category.as_ref(),
        )
    }

    /// Validate an edit of an existing budget.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::NotEditable` unless the budget is a draft.
    /// Returns `BudgetError::NegativeAmount` for a negative total.
    /// Returns `BudgetError::TotalBelowAllocated` if the new total is below
    /// what is already allocated.
    /// Returns `BudgetError::Category` if the resulting categories do not fit
    /// the taxonomy.
    pub fn validate_edit(
        taxonomy: &Taxonomy,
        budget: &Budget,
        patch: &BudgetPatch,
    ) -> Result<(), BudgetError> {
        if !budget.status.is_editable() {
            return Err(BudgetError::NotEditable(budget.status));
        }

        if let Some(total) = patch.total_budget {
            if total < Decimal::ZERO {
                return Err(BudgetError::NegativeAmount);
            }
            if total < budget.allocated_amount {
                return Err(BudgetError::TotalBelowAllocated {
                    total,
                    allocated: budget.allocated_amount,
                });
            }
        }

        if patch
            .project_name
            .as_deref()
            .is_some_and(|name| name.trim().is_empty())
        {
            return Err(BudgetError::ProjectNameRequired);
        }

        let main = patch.main_category.or(budget.main_category);
        let sub = patch.sub_category.as_ref().or(budget.sub_category.as_ref());
        Self::validate_categories(taxonomy, main, sub)
    }

    /// Compute the budget amounts after carving out an allocation.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::NegativeAmount` if the amount is negative.
    /// Returns `BudgetError::ExceedsRemaining` if the amount is larger than
    /// the budget's remaining amount.
    pub fn plan_allocation(
        budget: &Budget,
        input: &NewAllocation,
    ) -> Result<AllocationOutcome, BudgetError> {
        if input.allocated_amount < Decimal::ZERO {
            return Err(BudgetError::NegativeAmount);
        }

        if input.allocated_amount > budget.remaining_amount {
            return Err(BudgetError::ExceedsRemaining {
                requested: input.allocated_amount,
                remaining: budget.remaining_amount,
            });
        }

        let allocated_amount = budget.allocated_amount + input.allocated_amount;
        Ok(AllocationOutcome {
            allocated_amount,
            remaining_amount: budget.total_budget - allocated_amount,
        })
    }

    fn validate_categories(
        taxonomy: &Taxonomy,
        main: Option<MainCategory>,
        sub: Option<&SubCategory>,
    ) -> Result<(), BudgetError> {
        match (main, sub) {
            (Some(main), Some(sub)) => {
                taxonomy.validate(main, sub)?;
            }
            (None, Some(sub)) => {
                if taxonomy.main_category_of(sub).is_none() {
                    return Err(crate::taxonomy::TaxonomyError::UnknownSubCategory(
                        sub.to_string(),
                    )
                    .into());
                }
            }
            (_, None) => {}
        }
        Ok(())
    }
}
