//! Taxonomy error types.

use thiserror::Error;

use super::types::MainCategory;

/// Taxonomy lookup and definition errors.
#[derive(Debug, Error)]
pub enum TaxonomyError {
    /// Sub-category is not defined in this taxonomy version.
    #[error("Unknown sub-category: {0}")]
    UnknownSubCategory(String),

    /// Sub-category exists but belongs to the other main category.
    #[error("Sub-category {sub} does not belong to {main}")]
    SubCategoryMismatch {
        /// Requested main category.
        main: MainCategory,
        /// Offending sub-category.
        sub: String,
    },

    /// Taxonomy definition is inconsistent.
    #[error("Invalid taxonomy definition: {0}")]
    InvalidDefinition(String),

    /// Taxonomy file could not be read or parsed.
    #[error("Failed to load taxonomy: {0}")]
    Load(String),
}

impl TaxonomyError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::UnknownSubCategory(_) | Self::SubCategoryMismatch { .. } => 400,
            Self::InvalidDefinition(_) | Self::Load(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownSubCategory(_) => "UNKNOWN_SUB_CATEGORY",
            Self::SubCategoryMismatch { .. } => "SUB_CATEGORY_MISMATCH",
            Self::InvalidDefinition(_) => "INVALID_TAXONOMY",
            Self::Load(_) => "TAXONOMY_LOAD_FAILED",
        }
    }
}

impl From<config::ConfigError> for TaxonomyError {
    fn from(err: config::ConfigError) -> Self {
        Self::Load(err.to_string())
    }
}
