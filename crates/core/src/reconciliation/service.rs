//! Variance arithmetic.

use rust_decimal::Decimal;

use super::types::{ActualIncomeExpenseData, ReconciliationSubject};
use crate::store::Actuals;
use crate::taxonomy::MainCategory;

/// Decimal places kept in variance percentages.
pub const VARIANCE_PERCENT_DP: u32 = 2;

/// Stateless variance calculations.
pub struct ReconciliationService;

impl ReconciliationService {
    /// Actual amount on the budget's side minus the budgeted amount.
    ///
    /// Positive is favourable for income and unfavourable for expense.
    #[must_use]
    pub fn variance(category: MainCategory, budgeted: Decimal, actuals: Actuals) -> Decimal {
        let actual = match category {
            MainCategory::Income => actuals.income,
            MainCategory::Expense => actuals.expense,
        };
        actual.saturating_sub(budgeted)
    }

    /// `variance / budgeted * 100`, rounded to two places. Zero when
    /// `budgeted` is zero.
    ///
    /// Saturates at `Decimal::MAX` or `Decimal::MIN` when the quotient is
    /// not representable.
    #[must_use]
    pub fn variance_percentage(variance: Decimal, budgeted: Decimal) -> Decimal {
        if budgeted.is_zero() {
            return Decimal::ZERO;
        }
        variance
            .checked_div(budgeted)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .map_or_else(
                || {
                    if variance.is_sign_negative() == budgeted.is_sign_negative() {
                        Decimal::MAX
                    } else {
                        Decimal::MIN
                    }
                },
                |pct| pct.round_dp(VARIANCE_PERCENT_DP),
            )
    }

    /// Builds a reconciliation row.
    #[must_use]
    pub fn row(
        subject: ReconciliationSubject,
        category: MainCategory,
        budgeted: Decimal,
        actuals: Actuals,
    ) -> ActualIncomeExpenseData {
        let variance = Self::variance(category, budgeted, actuals);
        ActualIncomeExpenseData {
            subject,
            budget_category: category,
            budgeted_amount: budgeted,
            actual_income: actuals.income,
            actual_expense: actuals.expense,
            variance,
            variance_percentage: Self::variance_percentage(variance, budgeted),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use budgetry_shared::BudgetId;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_income_variance() {
        let row = ReconciliationService::row(
            ReconciliationSubject::Budget(BudgetId::new()),
            MainCategory::Income,
            dec!(50000),
            Actuals::new(dec!(45000), dec!(1200)),
        );
        assert_eq!(row.variance, dec!(-5000));
        assert_eq!(row.variance_percentage, dec!(-10));
        assert_eq!(row.actual_amount(), dec!(45000));
    }

    #[test]
    fn test_expense_variance_uses_expense_side() {
        let variance = ReconciliationService::variance(
            MainCategory::Expense,
            dec!(2000),
            Actuals::new(dec!(999), dec!(2500)),
        );
        assert_eq!(variance, dec!(500));
    }

    #[test]
    fn test_percentage_rounds_to_two_places() {
        assert_eq!(
            ReconciliationService::variance_percentage(dec!(1), dec!(3)),
            dec!(33.33)
        );
        assert_eq!(
            ReconciliationService::variance_percentage(dec!(-2), dec!(3)),
            dec!(-66.67)
        );
    }

    #[test]
    fn test_percentage_saturates_instead_of_overflowing() {
        let huge = Decimal::from_i128_with_scale(10i128.pow(24), 0);
        let tiny = Decimal::new(1, 8);
        assert_eq!(
            ReconciliationService::variance_percentage(huge, tiny),
            Decimal::MAX
        );
        assert_eq!(
            ReconciliationService::variance_percentage(-huge, tiny),
            Decimal::MIN
        );
    }

    #[test]
    fn test_extreme_row_is_rated_critical() {
        let row = ReconciliationService::row(
            ReconciliationSubject::Budget(BudgetId::new()),
            MainCategory::Income,
            Decimal::new(1, 8),
            Actuals::new(Decimal::MAX, Decimal::ZERO),
        );
        assert_eq!(row.variance_percentage, Decimal::MAX);
        assert_eq!(
            crate::variance::VarianceClassifier::default().rate(row.variance_percentage),
            crate::variance::ExecutionRating::Critical
        );
    }

    proptest! {
        /// Nothing budgeted means a zero percentage whatever the actuals.
        #[test]
        fn prop_zero_budget_zero_percentage(actual in -1_000_000_000i64..1_000_000_000) {
            let variance = Decimal::new(actual, 2);
            prop_assert_eq!(
                ReconciliationService::variance_percentage(variance, Decimal::ZERO),
                Decimal::ZERO
            );
        }
    }
}
