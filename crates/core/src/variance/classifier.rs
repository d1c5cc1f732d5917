//! Execution rating and budget health classification.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use budgetry_shared::ClassifierConfig;

/// Invalid classifier configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThresholdError {
    /// Rating bands must be non-negative and strictly increasing.
    #[error("Rating bands must satisfy 0 <= excellent < good < attention, got {excellent}/{good}/{attention}")]
    UnorderedBands {
        /// Excellent upper bound.
        excellent: Decimal,
        /// Good upper bound.
        good: Decimal,
        /// Attention upper bound.
        attention: Decimal,
    },

    /// The under-budget ratio must lie in `0..=1`.
    #[error("Under-budget ratio must be between 0 and 1, got {0}")]
    RatioOutOfRange(Decimal),
}

/// Inclusive upper bounds of the rating bands, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingThresholds {
    /// `|variance %| <= excellent_max` rates excellent.
    pub excellent_max: Decimal,
    /// `|variance %| <= good_max` rates good.
    pub good_max: Decimal,
    /// `|variance %| <= attention_max` rates attention; above is critical.
    pub attention_max: Decimal,
}

impl RatingThresholds {
    /// Default bands: 5 / 15 / 30 percent.
    pub const STANDARD: Self = Self {
        excellent_max: Decimal::from_parts(5, 0, 0, false, 0),
        good_max: Decimal::from_parts(15, 0, 0, false, 0),
        attention_max: Decimal::from_parts(30, 0, 0, false, 0),
    };

    /// Creates validated bands.
    ///
    /// # Errors
    ///
    /// Returns `ThresholdError::UnorderedBands` unless
    /// `0 <= excellent < good < attention`.
    pub fn new(
        excellent_max: Decimal,
        good_max: Decimal,
        attention_max: Decimal,
    ) -> Result<Self, ThresholdError> {
        if excellent_max < Decimal::ZERO || excellent_max >= good_max || good_max >= attention_max
        {
            return Err(ThresholdError::UnorderedBands {
                excellent: excellent_max,
                good: good_max,
                attention: attention_max,
            });
        }
        Ok(Self {
            excellent_max,
            good_max,
            attention_max,
        })
    }
}

impl Default for RatingThresholds {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl TryFrom<&ClassifierConfig> for RatingThresholds {
    type Error = ThresholdError;

    fn try_from(config: &ClassifierConfig) -> Result<Self, Self::Error> {
        Self::new(config.excellent_max, config.good_max, config.attention_max)
    }
}

/// Ratios driving the budget health status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthThresholds {
    /// Actual spend below `total * under_budget_ratio` is under budget.
    pub under_budget_ratio: Decimal,
}

impl HealthThresholds {
    /// Default ratio: 0.9, a 10% tolerance band.
    pub const STANDARD: Self = Self {
        under_budget_ratio: Decimal::from_parts(9, 0, 0, false, 1),
    };

    /// Creates validated thresholds.
    ///
    /// # Errors
    ///
    /// Returns `ThresholdError::RatioOutOfRange` unless the ratio is in `0..=1`.
    pub fn new(under_budget_ratio: Decimal) -> Result<Self, ThresholdError> {
        if under_budget_ratio < Decimal::ZERO || under_budget_ratio > Decimal::ONE {
            return Err(ThresholdError::RatioOutOfRange(under_budget_ratio));
        }
        Ok(Self { under_budget_ratio })
    }
}

impl Default for HealthThresholds {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl TryFrom<&ClassifierConfig> for HealthThresholds {
    type Error = ThresholdError;

    fn try_from(config: &ClassifierConfig) -> Result<Self, Self::Error> {
        Self::new(config.under_budget_ratio)
    }
}

/// Quality of budget execution, from best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionRating {
    /// Within the excellent band.
    Excellent,
    /// Within the good band.
    Good,
    /// Needs attention.
    Attention,
    /// Outside every band.
    Critical,
}

impl ExecutionRating {
    /// Returns the string representation of the rating.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Attention => "attention",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for ExecutionRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Spend status of a single budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BudgetHealth {
    /// Recorded spend reached the total.
    Completed,
    /// Actual spend exceeds the total.
    OverBudget,
    /// Actual spend is below the tolerance band.
    UnderBudget,
    /// Within the tolerance band.
    OnTrack,
}

impl BudgetHealth {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::OverBudget => "over-budget",
            Self::UnderBudget => "under-budget",
            Self::OnTrack => "on-track",
        }
    }
}

impl fmt::Display for BudgetHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pure, total classification of variance and spend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VarianceClassifier {
    rating: RatingThresholds,
    health: HealthThresholds,
}

impl VarianceClassifier {
    /// Creates a classifier from thresholds.
    #[must_use]
    pub fn new(rating: RatingThresholds, health: HealthThresholds) -> Self {
        Self { rating, health }
    }

    /// Creates a classifier from configuration.
    ///
    /// # Errors
    ///
    /// Returns a `ThresholdError` if the configured thresholds are invalid.
    pub fn from_config(config: &ClassifierConfig) -> Result<Self, ThresholdError> {
        Ok(Self::new(config.try_into()?, config.try_into()?))
    }

    /// Rating bands in use.
    #[must_use]
    pub fn rating_thresholds(&self) -> &RatingThresholds {
        &self.rating
    }

    /// Health thresholds in use.
    #[must_use]
    pub fn health_thresholds(&self) -> &HealthThresholds {
        &self.health
    }

    /// Rates a variance percentage by its magnitude.
    ///
    /// A value on a boundary falls in the stricter band.
    #[must_use]
    pub fn rate(&self, variance_percentage: Decimal) -> ExecutionRating {
        let magnitude = variance_percentage.abs();
        if magnitude <= self.rating.excellent_max {
            ExecutionRating::Excellent
        } else if magnitude <= self.rating.good_max {
            ExecutionRating::Good
        } else if magnitude <= self.rating.attention_max {
            ExecutionRating::Attention
        } else {
            ExecutionRating::Critical
        }
    }

    /// Health of a budget from its total, recorded spend and actual spend.
    ///
    /// A zero total is on track.
    #[must_use]
    pub fn health(&self, total: Decimal, spent: Decimal, actual: Decimal) -> BudgetHealth {
        if total.is_zero() {
            return BudgetHealth::OnTrack;
        }

        if spent >= total {
            BudgetHealth::Completed
        } else if actual > total {
            BudgetHealth::OverBudget
        } else if actual < self.under_budget_line(total) {
            BudgetHealth::UnderBudget
        } else {
            BudgetHealth::OnTrack
        }
    }

    /// `total * under_budget_ratio`; the ratio is at most one, so `total`
    /// bounds the result when the product cannot be represented.
    fn under_budget_line(&self, total: Decimal) -> Decimal {
        total
            .checked_mul(self.health.under_budget_ratio)
            .unwrap_or(total)
    }
}
