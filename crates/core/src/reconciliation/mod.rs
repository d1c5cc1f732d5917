//! Actual-versus-budget reconciliation.
//!
//! Per-budget and per-category rows are computed independently from the
//! same transaction source snapshot. A source failure is reported as an
//! error, never as zero actuals.

pub mod engine;
pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use engine::ReconciliationEngine;
pub use error::ReconciliationError;
pub use service::{ReconciliationService, VARIANCE_PERCENT_DP};
pub use types::{ActualIncomeExpenseData, ReconciliationSubject};
