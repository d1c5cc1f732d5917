//! In-memory implementations of the collaborator traits.
//!
//! This crate provides:
//! - `InMemoryBudgetStore`, a [`BudgetStore`] keeping budgets in insertion order
//! - `InMemoryTransactionSource`, a [`TransactionSource`] over posted transactions
//!
//! [`BudgetStore`]: budgetry_core::store::BudgetStore
//! [`TransactionSource`]: budgetry_core::store::TransactionSource

pub mod budget;
pub mod transaction;

pub use budget::InMemoryBudgetStore;
pub use transaction::{InMemoryTransactionSource, PostedTransaction, TransactionKind};
