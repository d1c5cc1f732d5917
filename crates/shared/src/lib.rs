//! Shared identifiers, errors, and configuration for Budgetry.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, ClassifierConfig, ServerConfig, TaxonomyConfig};
pub use error::{AppError, AppResult};
pub use types::{AllocationId, BudgetId, TransactionId, UserId};
