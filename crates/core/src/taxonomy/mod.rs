//! Category taxonomy and item-code generation.
//!
//! A taxonomy is an immutable value describing the two-level category tree
//! (income/expense, then sub-categories), the code prefix of each
//! sub-category and its suggested line items.

pub mod catalog;
pub mod error;
pub mod types;


pub use catalog::{STANDARD_VERSION, Taxonomy, UNCATEGORIZED_LABEL};
pub use error::TaxonomyError;
pub use types::{CategoryKey, ItemTemplate, MainCategory, SubCategory, SubCategoryDef, UNKNOWN_KEY};
