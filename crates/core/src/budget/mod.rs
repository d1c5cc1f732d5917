//! Budget entities, validation and allocation.

pub mod error;
pub mod manager;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::BudgetError;
pub use manager::BudgetManager;
pub use service::{AllocationOutcome, BudgetService, MAX_BUDGET_YEAR, MIN_BUDGET_YEAR};
pub use types::{Budget, BudgetAllocation, BudgetPatch, NewAllocation, NewBudget};
