//! Category taxonomy types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Key of the fallback bucket for budgets without a usable category.
pub const UNKNOWN_KEY: &str = "unknown";

/// Top-level budget classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MainCategory {
    /// Money coming in (dues, tickets, sponsorship).
    Income,
    /// Money going out.
    Expense,
}

impl MainCategory {
    /// All main categories in display order.
    pub const ALL: [Self; 2] = [Self::Income, Self::Expense];

    /// Returns the string representation of the category.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    /// Parses a category from a string. Unknown input yields `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" => Some(Self::Income),
            "expense" => Some(Self::Expense),
            _ => None,
        }
    }

    /// Single-letter prefix used in item codes.
    #[must_use]
    pub fn code_letter(&self) -> char {
        match self {
            Self::Income => 'I',
            Self::Expense => 'E',
        }
    }

    /// Human readable label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }
}

impl fmt::Display for MainCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Second-level classification key, e.g. `membership_subscription`.
///
/// Sub-categories are data, not an enum: each taxonomy version defines its
/// own set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubCategory(String);

impl SubCategory {
    /// Creates a sub-category key, normalising case and whitespace.
    #[must_use]
    pub fn new(key: impl AsRef<str>) -> Self {
        Self(key.as_ref().trim().to_lowercase())
    }

    /// The fallback bucket.
    #[must_use]
    pub fn unknown() -> Self {
        Self(UNKNOWN_KEY.to_string())
    }

    /// Returns true for the fallback bucket.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.0 == UNKNOWN_KEY
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SubCategory {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Fully qualified category, the typed join key between budgets and actuals.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CategoryKey {
    /// Main category.
    pub main: MainCategory,
    /// Sub-category within `main`.
    pub sub: SubCategory,
}

impl CategoryKey {
    /// Creates a category key.
    #[must_use]
    pub fn new(main: MainCategory, sub: impl Into<SubCategory>) -> Self {
        Self {
            main,
            sub: sub.into(),
        }
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.main, self.sub)
    }
}

/// Named line item suggested for a sub-category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemTemplate {
    /// Item name shown in forms.
    pub name: String,
    /// Note pre-filled when the template is chosen.
    #[serde(default)]
    pub default_note: String,
}

impl ItemTemplate {
    /// Creates an item template.
    #[must_use]
    pub fn new(name: impl Into<String>, default_note: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default_note: default_note.into(),
        }
    }
}

/// Definition of one sub-category inside a taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubCategoryDef {
    /// Sub-category key.
    pub key: SubCategory,
    /// Label shown in tables and forms.
    pub display_name: String,
    /// Uppercase alphanumeric prefix used in item codes.
    pub code_prefix: String,
    /// Suggested items, in display order.
    #[serde(default)]
    pub templates: Vec<ItemTemplate>,
}

impl SubCategoryDef {
    /// Creates a sub-category definition.
    #[must_use]
    pub fn new(
        key: &str,
        display_name: &str,
        code_prefix: &str,
        templates: Vec<ItemTemplate>,
    ) -> Self {
        Self {
            key: SubCategory::new(key),
            display_name: display_name.to_string(),
            code_prefix: code_prefix.to_string(),
            templates,
        }
    }
}
