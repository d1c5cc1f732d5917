//! Budget approval workflow.
//!
//! # Modules
//!
//! - `types` - Lifecycle types (BudgetStatus, ApprovalAction)
//! - `error` - Workflow-specific error types
//! - `service` - State transition rules
//! - `lifecycle` - Applying transitions to stored budgets

pub mod error;
pub mod lifecycle;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::ApprovalError;
pub use lifecycle::BudgetLifecycle;
pub use service::ApprovalService;
pub use types::{ApprovalAction, BudgetStatus};
