//! Variance classification: execution ratings and budget health.

pub mod classifier;

#[cfg(test)]
mod classifier_props;

pub use classifier::{
    BudgetHealth, ExecutionRating, HealthThresholds, RatingThresholds, ThresholdError,
    VarianceClassifier,
};
