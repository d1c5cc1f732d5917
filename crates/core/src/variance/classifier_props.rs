//! Property-based tests for the variance classifier.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::classifier::{BudgetHealth, ExecutionRating, VarianceClassifier};

fn arb_pct() -> impl Strategy<Value = Decimal> {
    (-100_000i64..100_000).prop_map(|v| Decimal::new(v, 2))
}

proptest! {
    /// A larger variance magnitude never earns a better rating.
    #[test]
    fn prop_rating_monotonic(a in arb_pct(), b in arb_pct()) {
        let classifier = VarianceClassifier::default();
        let (small, large) = if a.abs() <= b.abs() { (a, b) } else { (b, a) };
        prop_assert!(classifier.rate(small) <= classifier.rate(large));
    }

    /// The rating ignores the sign of the variance.
    #[test]
    fn prop_rating_symmetric(pct in arb_pct()) {
        let classifier = VarianceClassifier::default();
        prop_assert_eq!(classifier.rate(pct), classifier.rate(-pct));
    }

    /// A zero total is on track whatever was spent.
    #[test]
    fn prop_zero_total_on_track(spent in 0i64..1_000_000, actual in 0i64..1_000_000) {
        let health = VarianceClassifier::default().health(
            Decimal::ZERO,
            Decimal::from(spent),
            Decimal::from(actual),
        );
        prop_assert_eq!(health, BudgetHealth::OnTrack);
    }

    /// Spend at or above the total always reads as completed.
    #[test]
    fn prop_full_spend_completed(total in 1i64..1_000_000, extra in 0i64..1_000, actual in 0i64..2_000_000) {
        let health = VarianceClassifier::default().health(
            Decimal::from(total),
            Decimal::from(total + extra),
            Decimal::from(actual),
        );
        prop_assert_eq!(health, BudgetHealth::Completed);
    }
}

#[test]
fn test_boundaries_fall_in_stricter_band() {
    let classifier = VarianceClassifier::default();
    assert_eq!(classifier.rate(Decimal::from(5)), ExecutionRating::Excellent);
    assert_eq!(classifier.rate(Decimal::from(15)), ExecutionRating::Good);
    assert_eq!(classifier.rate(Decimal::from(30)), ExecutionRating::Attention);
}
