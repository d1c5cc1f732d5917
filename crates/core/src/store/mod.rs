//! Collaborator seams: the budget store and the transaction source.
//!
//! Both live outside this crate. The engine only talks to them through
//! these traits; `budgetry-store` ships in-memory implementations.

mod budget_store;
mod error;
mod transaction_source;

pub use budget_store::BudgetStore;
pub use error::StoreError;
pub use transaction_source::{Actuals, ActualsKey, TransactionSource};

#[cfg(test)]
pub use budget_store::MockBudgetStore;
#[cfg(test)]
pub use transaction_source::MockTransactionSource;
