//! Yearly budget template generation.

use std::collections::HashSet;
use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{info, warn};

use budgetry_shared::UserId;

use super::error::TemplateError;
use crate::budget::{Budget, MAX_BUDGET_YEAR, MIN_BUDGET_YEAR, NewBudget};
use crate::store::BudgetStore;
use crate::taxonomy::{CategoryKey, MainCategory, Taxonomy};

/// Ordered category entries generated for every fiscal year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearlyTemplate {
    entries: Vec<CategoryKey>,
}

impl YearlyTemplate {
    /// Creates a template from ordered entries.
    #[must_use]
    pub fn new(entries: Vec<CategoryKey>) -> Self {
        Self { entries }
    }

    /// Four income and four expense entries.
    #[must_use]
    pub fn standard() -> Self {
        use MainCategory::{Expense, Income};

        Self::new(vec![
            CategoryKey::new(Income, "membership_subscription"),
            CategoryKey::new(Income, "event_income"),
            CategoryKey::new(Income, "sponsorship"),
            CategoryKey::new(Income, "donation"),
            CategoryKey::new(Expense, "administrative_management"),
            CategoryKey::new(Expense, "event_expense"),
            CategoryKey::new(Expense, "member_welfare"),
            CategoryKey::new(Expense, "marketing_promotion"),
        ])
    }

    /// Entries in generation order.
    #[must_use]
    pub fn entries(&self) -> &[CategoryKey] {
        &self.entries
    }
}

impl Default for YearlyTemplate {
    fn default() -> Self {
        Self::standard()
    }
}

/// Creates the draft budgets of a fiscal year in one batch.
#[derive(Clone)]
pub struct YearlyTemplateGenerator {
    store: Arc<dyn BudgetStore>,
    taxonomy: Arc<Taxonomy>,
    template: YearlyTemplate,
}

impl YearlyTemplateGenerator {
    /// Creates a generator using the standard template.
    #[must_use]
    pub fn new(store: Arc<dyn BudgetStore>, taxonomy: Arc<Taxonomy>) -> Self {
        Self::with_template(store, taxonomy, YearlyTemplate::standard())
    }

    /// Creates a generator using a custom template.
    #[must_use]
    pub fn with_template(
        store: Arc<dyn BudgetStore>,
        taxonomy: Arc<Taxonomy>,
        template: YearlyTemplate,
    ) -> Self {
        Self {
            store,
            taxonomy,
            template,
        }
    }

    /// Builds the draft budgets for `year` without touching the store.
    ///
    /// `existing` is checked once, before anything is built: any budget
    /// for `year` is a conflict.
    ///
    /// # Errors
    ///
    /// Returns `TemplateError::Conflict` if `existing` holds a budget for
    /// `year`, `TemplateError::InvalidYear` for an out-of-range year, or
    /// `TemplateError::Taxonomy` if a template entry is not in the taxonomy.
    pub fn build(
        &self,
        year: i32,
        created_by: UserId,
        existing: &[Budget],
    ) -> Result<Vec<NewBudget>, TemplateError> {
        if !(MIN_BUDGET_YEAR..=MAX_BUDGET_YEAR).contains(&year) {
            return Err(TemplateError::InvalidYear(year));
        }

        let clashes = existing.iter().filter(|b| b.budget_year == year).count();
        if clashes > 0 {
            return Err(TemplateError::Conflict {
                year,
                existing: clashes,
            });
        }

        (1u32..)
            .zip(self.template.entries())
            .map(|(position, entry)| -> Result<NewBudget, TemplateError> {
                let key = self.taxonomy.validate(entry.main, &entry.sub)?;
                let item_code = self.taxonomy.generate_item_code(&key.sub, position)?;
                let templates = self.taxonomy.item_templates(&key.sub);
                let display = self.taxonomy.sub_category_display_name(&key.sub);

                let note = templates
                    .first()
                    .map(|t| t.default_note.clone())
                    .filter(|n| !n.is_empty());
                let description = (!templates.is_empty()).then(|| {
                    templates
                        .iter()
                        .map(|t| t.name.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                });

                Ok(NewBudget {
                    main_category: Some(key.main),
                    sub_category: Some(key.sub),
                    item_code: Some(item_code),
                    budget_year: year,
                    total_budget: Decimal::ZERO,
                    note,
                    description,
                    created_by,
                    project_name: format!("{year} {display}"),
                })
            })
            .collect()
    }

    /// Generates and stores the draft budgets of `year`.
    ///
    /// Either every template entry is created or none is.
    ///
    /// # Errors
    ///
    /// Returns `TemplateError::Conflict` when the year already has budgets,
    /// or any error from [`Self::build`] or the store.
    pub async fn generate_yearly_budget(
        &self,
        year: i32,
        created_by: UserId,
    ) -> Result<Vec<Budget>, TemplateError> {
        let existing = self.store.list(year).await?;
        let drafts = self.build(year, created_by, &existing).inspect_err(|e| {
            if let TemplateError::Conflict { existing, .. } = e {
                warn!(year, existing, "Yearly budget already generated");
            }
        })?;

        let ids = self.store.create_batch(drafts).await?;
        let wanted: HashSet<_> = ids.iter().copied().collect();
        let created: Vec<Budget> = self
            .store
            .list(year)
            .await?
            .into_iter()
            .filter(|b| wanted.contains(&b.id))
            .collect();

        info!(year, count = created.len(), "Yearly budget generated");
        Ok(created)
    }
}
