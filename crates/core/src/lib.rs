//! Core business logic for Budgetry.
//!
//! Budget categorization and actual-versus-budget reconciliation with ZERO
//! web or database dependencies. Persistence and posted transactions are
//! reached through the traits in [`store`].
//!
//! # Modules
//!
//! - `taxonomy` - Category tree and item-code generation
//! - `budget` - Budget entities, validation and allocations
//! - `aggregation` - Hierarchical budget table with roll-up totals
//! - `reconciliation` - Actual income/expense and variance
//! - `variance` - Execution ratings and budget health
//! - `workflow` - Approval state machine
//! - `template` - Yearly budget generation
//! - `store` - Budget store and transaction source seams

pub mod aggregation;
pub mod budget;
pub mod reconciliation;
pub mod store;
pub mod taxonomy;
pub mod template;
pub mod variance;
pub mod workflow;
