//! The taxonomy value: category tree, display names, code generator and
//! item templates for one taxonomy version.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::error::TaxonomyError;
use super::types::{
    CategoryKey, ItemTemplate, MainCategory, SubCategory, SubCategoryDef, UNKNOWN_KEY,
};

/// Label of the fallback bucket.
pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";

/// Version tag of the built-in taxonomy.
pub const STANDARD_VERSION: &str = "2025.1";

/// Immutable two-level category taxonomy.
///
/// Passed by value (usually behind an `Arc`) into the aggregator and the
/// template generator, so several versions can coexist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Taxonomy {
    version: String,
    income: Vec<SubCategoryDef>,
    expense: Vec<SubCategoryDef>,
}

/// Serialized form of a taxonomy file.
#[derive(Debug, Deserialize)]
struct RawTaxonomy {
    version: String,
    #[serde(default)]
    income: Vec<SubCategoryDef>,
    #[serde(default)]
    expense: Vec<SubCategoryDef>,
}

impl Taxonomy {
    /// Builds a taxonomy, checking that keys and code prefixes are unique.
    ///
    /// # Errors
    ///
    /// Returns `TaxonomyError::InvalidDefinition` if a key is duplicated or
    /// reserved, or a code prefix is empty, non-alphanumeric or duplicated
    /// within a main category.
    pub fn new(
        version: impl Into<String>,
        income: Vec<SubCategoryDef>,
        expense: Vec<SubCategoryDef>,
    ) -> Result<Self, TaxonomyError> {
        let mut keys = HashSet::new();
        for defs in [&income, &expense] {
            let mut prefixes = HashSet::new();
            for def in defs {
                if def.key.as_str().is_empty() || def.key.is_unknown() {
                    return Err(TaxonomyError::InvalidDefinition(format!(
                        "sub-category key '{}' is reserved or empty",
                        def.key
                    )));
                }
                if !keys.insert(def.key.clone()) {
                    return Err(TaxonomyError::InvalidDefinition(format!(
                        "duplicate sub-category key '{}'",
                        def.key
                    )));
                }
                let prefix_ok = !def.code_prefix.is_empty()
                    && def
                        .code_prefix
                        .chars()
                        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit());
                if !prefix_ok {
                    return Err(TaxonomyError::InvalidDefinition(format!(
                        "code prefix '{}' of '{}' must be uppercase alphanumeric",
                        def.code_prefix, def.key
                    )));
                }
                if !prefixes.insert(def.code_prefix.as_str()) {
                    return Err(TaxonomyError::InvalidDefinition(format!(
                        "duplicate code prefix '{}'",
                        def.code_prefix
                    )));
                }
            }
        }

        Ok(Self {
            version: version.into(),
            income,
            expense,
        })
    }

    /// Loads a taxonomy from a TOML or JSON file.
    pub fn from_file(path: &str) -> Result<Self, TaxonomyError> {
        let raw: RawTaxonomy = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()?
            .try_deserialize()?;
        Self::new(raw.version, raw.income, raw.expense)
    }

    /// Parses a taxonomy from TOML text.
    pub fn from_toml_str(source: &str) -> Result<Self, TaxonomyError> {
        let raw: RawTaxonomy = config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        Self::new(raw.version, raw.income, raw.expense)
    }

    /// The built-in taxonomy.
    #[must_use]
    pub fn standard() -> Self {
        let income = vec![
            SubCategoryDef::new(
                "membership_subscription",
                "Membership Subscriptions",
                "MS",
                vec![
                    ItemTemplate::new("Annual membership dues", "Collected at renewal"),
                    ItemTemplate::new("New member joining fees", "One-off joining fee"),
                    ItemTemplate::new("Life membership", "Recognised across the fiscal year"),
                ],
            ),
            SubCategoryDef::new(
                "event_income",
                "Event Income",
                "EV",
                vec![
                    ItemTemplate::new("Event tickets", "Ticket sales for organised events"),
                    ItemTemplate::new("Workshop registration", "Course and workshop fees"),
                ],
            ),
            SubCategoryDef::new(
                "sponsorship",
                "Sponsorship",
                "SP",
                vec![
                    ItemTemplate::new("Corporate sponsorship", "Annual sponsor packages"),
                    ItemTemplate::new("Event sponsorship", "Per-event sponsor contributions"),
                ],
            ),
            SubCategoryDef::new(
                "donation",
                "Donations",
                "DN",
                vec![
                    ItemTemplate::new("Individual donations", "General donations from members"),
                    ItemTemplate::new("Fundraising campaigns", "Targeted appeals"),
                ],
            ),
            SubCategoryDef::new(
                "other_income",
                "Other Income",
                "OI",
                vec![
                    ItemTemplate::new("Interest income", "Bank interest"),
                    ItemTemplate::new("Miscellaneous income", "Receipts without a category"),
                ],
            ),
        ];
        let expense = vec![
            SubCategoryDef::new(
                "administrative_management",
                "Administrative Management",
                "AM",
                vec![
                    ItemTemplate::new("Office rent", "Premises and utilities"),
                    ItemTemplate::new("Office supplies", "Stationery and consumables"),
                    ItemTemplate::new("Professional fees", "Audit, legal and accounting"),
                ],
            ),
            SubCategoryDef::new(
                "event_expense",
                "Event Expenses",
                "EE",
                vec![
                    ItemTemplate::new("Venue hire", "Rental of event venues"),
                    ItemTemplate::new("Catering", "Food and beverages for events"),
                ],
            ),
            SubCategoryDef::new(
                "member_welfare",
                "Member Welfare",
                "MW",
                vec![
                    ItemTemplate::new("Member gifts", "Festive and birthday gifts"),
                    ItemTemplate::new("Awards and recognition", "Annual award ceremony"),
                ],
            ),
            SubCategoryDef::new(
                "marketing_promotion",
                "Marketing & Promotion",
                "MP",
                vec![
                    ItemTemplate::new("Printed materials", "Flyers and posters"),
                    ItemTemplate::new("Online advertising", "Social media promotion"),
                ],
            ),
            SubCategoryDef::new(
                "other_expense",
                "Other Expenses",
                "OE",
                vec![
                    ItemTemplate::new("Bank charges", "Transaction and account fees"),
                    ItemTemplate::new("Miscellaneous expenses", "Payments without a category"),
                ],
            ),
        ];

        Self {
            version: STANDARD_VERSION.to_string(),
            income,
            expense,
        }
    }

    /// Taxonomy version tag.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Sub-category definitions of a main category, in display order.
    #[must_use]
    pub fn sub_categories(&self, main: MainCategory) -> &[SubCategoryDef] {
        match main {
            MainCategory::Income => &self.income,
            MainCategory::Expense => &self.expense,
        }
    }

    /// Sub-category keys of a main category.
    #[must_use]
    pub fn sub_category_options(&self, main: MainCategory) -> Vec<SubCategory> {
        self.sub_categories(main)
            .iter()
            .map(|def| def.key.clone())
            .collect()
    }

    /// Sub-category keys for a raw main category string; empty when the
    /// string names no main category.
    #[must_use]
    pub fn sub_category_options_for(&self, main: &str) -> Vec<SubCategory> {
        MainCategory::parse(main)
            .map(|m| self.sub_category_options(m))
            .unwrap_or_default()
    }

    /// Finds a sub-category definition and the main category owning it.
    #[must_use]
    pub fn find(&self, sub: &SubCategory) -> Option<(MainCategory, &SubCategoryDef)> {
        MainCategory::ALL.into_iter().find_map(|main| {
            self.sub_categories(main)
                .iter()
                .find(|def| &def.key == sub)
                .map(|def| (main, def))
        })
    }

    /// Main category that owns `sub`.
    #[must_use]
    pub fn main_category_of(&self, sub: &SubCategory) -> Option<MainCategory> {
        self.find(sub).map(|(main, _)| main)
    }

    /// Position of `sub` within its main category, used for row ordering.
    #[must_use]
    pub fn position(&self, main: MainCategory, sub: &SubCategory) -> Option<usize> {
        self.sub_categories(main)
            .iter()
            .position(|def| &def.key == sub)
    }

    /// Checks that `sub` is defined under `main`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownSubCategory` if `sub` is not defined at all, or
    /// `SubCategoryMismatch` if it belongs to the other main category.
    pub fn validate(
        &self,
        main: MainCategory,
        sub: &SubCategory,
    ) -> Result<CategoryKey, TaxonomyError> {
        match self.main_category_of(sub) {
            Some(owner) if owner == main => Ok(CategoryKey::new(main, sub.clone())),
            Some(_) => Err(TaxonomyError::SubCategoryMismatch {
                main,
                sub: sub.to_string(),
            }),
            None => Err(TaxonomyError::UnknownSubCategory(sub.to_string())),
        }
    }

    /// Item templates of a sub-category; empty when the key is unknown.
    #[must_use]
    pub fn item_templates(&self, sub: &SubCategory) -> &[ItemTemplate] {
        self.find(sub)
            .map(|(_, def)| def.templates.as_slice())
            .unwrap_or_default()
    }

    /// Display label of a sub-category, falling back to the raw key.
    #[must_use]
    pub fn sub_category_display_name(&self, sub: &SubCategory) -> String {
        if sub.as_str() == UNKNOWN_KEY {
            return UNCATEGORIZED_LABEL.to_string();
        }
        self.find(sub)
            .map_or_else(|| sub.to_string(), |(_, def)| def.display_name.clone())
    }

    /// Generates the item code for the `index`-th item of a sub-category.
    ///
    /// Codes look like `I-MS-001`. The function consults nothing but the
    /// taxonomy, so the same `(sub, index)` always yields the same code and
    /// distinct indices yield distinct codes.
    ///
    /// # Errors
    ///
    /// Returns `TaxonomyError::UnknownSubCategory` if `sub` is not defined.
    pub fn generate_item_code(
        &self,
        sub: &SubCategory,
        index: u32,
    ) -> Result<String, TaxonomyError> {
        let (main, def) = self
            .find(sub)
            .ok_or_else(|| TaxonomyError::UnknownSubCategory(sub.to_string()))?;
        Ok(format!(
            "{}-{}-{index:03}",
            main.code_letter(),
            def.code_prefix
        ))
    }
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::standard()
    }
}
