//! Yearly budget template generator.

pub mod error;
pub mod generator;


pub use error::TemplateError;
pub use generator::{YearlyTemplate, YearlyTemplateGenerator};
