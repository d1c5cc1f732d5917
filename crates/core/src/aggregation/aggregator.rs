//! Groups a flat budget list into the two-level budget table.

use std::collections::HashMap;
use std::sync::Arc;

use rust_decimal::Decimal;

use super::legacy::{ClassificationPolicy, KeywordFallback};
use super::types::{AggregateSummary, BudgetTableRow, GroupKey, GroupRow, LeafRow, MainBucket};
use crate::budget::Budget;
use crate::taxonomy::{SubCategory, Taxonomy};

/// Builds budget table rows from the budgets of one fiscal year.
pub struct BudgetAggregator {
    taxonomy: Arc<Taxonomy>,
    policy: Box<dyn ClassificationPolicy>,
}

impl BudgetAggregator {
    /// Creates an aggregator with an explicit legacy policy.
    #[must_use]
    pub fn new(taxonomy: Arc<Taxonomy>, policy: Box<dyn ClassificationPolicy>) -> Self {
        Self { taxonomy, policy }
    }

    /// Creates an aggregator with the standard keyword fallback.
    #[must_use]
    pub fn with_keyword_fallback(taxonomy: Arc<Taxonomy>) -> Self {
        Self::new(taxonomy, Box::new(KeywordFallback::standard()))
    }

    /// Resolves the group a budget belongs to.
    ///
    /// Explicit fields win. A lone sub-category infers its main category
    /// from the taxonomy. Only when both fields are absent does the legacy
    /// policy look at the project name.
    #[must_use]
    pub fn classify(&self, budget: &Budget) -> GroupKey {
        match (budget.main_category, &budget.sub_category) {
            (Some(main), Some(sub)) => GroupKey::new(Some(main).into(), sub.clone()),
            (Some(main), None) => GroupKey::new(Some(main).into(), SubCategory::unknown()),
            (None, Some(sub)) => {
                GroupKey::new(self.taxonomy.main_category_of(sub).into(), sub.clone())
            }
            (None, None) => self.policy.classify(&budget.project_name).map_or_else(
                || GroupKey::new(MainBucket::Unknown, SubCategory::unknown()),
                |key| GroupKey::new(Some(key.main).into(), key.sub),
            ),
        }
    }

    /// Aggregates budgets into group and leaf rows.
    ///
    /// Each group row is immediately followed by its leaves in input order.
    /// Empty input yields no rows.
    #[must_use]
    pub fn aggregate(&self, budgets: &[Budget]) -> Vec<BudgetTableRow> {
        let mut index: HashMap<GroupKey, usize> = HashMap::new();
        let mut groups: Vec<(GroupKey, Vec<&Budget>)> = Vec::new();

        for budget in budgets {
            let key = self.classify(budget);
            match index.get(&key) {
                Some(&i) => groups[i].1.push(budget),
                None => {
                    index.insert(key.clone(), groups.len());
                    groups.push((key, vec![budget]));
                }
            }
        }

        // Stable: unlisted sub-categories keep first-appearance order.
        groups.sort_by_key(|(key, _)| (key.main, self.sub_rank(key)));

        let mut rows = Vec::with_capacity(budgets.len() + groups.len());
        for (key, members) in groups {
            let total: Decimal = members.iter().map(|b| b.total_budget).sum();
            let spent: Decimal = members.iter().map(|b| b.spent_amount).sum();

            rows.push(BudgetTableRow::Group(GroupRow {
                label: self.taxonomy.sub_category_display_name(&key.sub),
                key: key.clone(),
                sub_category_total: total,
                sub_category_spent: spent,
                sub_category_remaining: total - spent,
                item_count: members.len(),
            }));
            rows.extend(members.into_iter().map(|budget| {
                BudgetTableRow::Leaf(LeafRow {
                    group: key.clone(),
                    budget: budget.clone(),
                })
            }));
        }
        rows
    }

    /// Rolls group rows up per main category.
    #[must_use]
    pub fn summarize(rows: &[BudgetTableRow]) -> AggregateSummary {
        let mut summary = AggregateSummary::default();
        for group in rows.iter().filter_map(BudgetTableRow::as_group) {
            match group.key.main {
                MainBucket::Income => summary.income_total += group.sub_category_total,
                MainBucket::Expense => summary.expense_total += group.sub_category_total,
                MainBucket::Unknown => summary.unknown_total += group.sub_category_total,
            }
        }
        summary.net_planned = summary.income_total - summary.expense_total;
        summary
    }

    /// Sort rank inside a main bucket: taxonomy order, then unlisted keys,
    /// then `unknown`.
    fn sub_rank(&self, key: &GroupKey) -> (u8, usize) {
        if key.sub.is_unknown() {
            return (2, 0);
        }
        key.main
            .category()
            .and_then(|main| self.taxonomy.position(main, &key.sub))
            .map_or((1, 0), |pos| (0, pos))
    }
}
