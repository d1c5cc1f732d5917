//! Hierarchical budget table: sub-category groups with roll-up totals.

pub mod aggregator;
pub mod legacy;
pub mod types;


pub use aggregator::BudgetAggregator;
pub use legacy::{ClassificationPolicy, KeywordFallback, KeywordRule, RequireExplicit};
pub use types::{AggregateSummary, BudgetTableRow, GroupKey, GroupRow, LeafRow, MainBucket};
