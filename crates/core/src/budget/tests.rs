//! Property-based tests for budget module.

use chrono::Utc;
use proptest::prelude::*;
use rust_decimal::Decimal;

use budgetry_shared::{BudgetId, UserId};

use super::service::BudgetService;
use super::types::{Budget, BudgetPatch, NewAllocation, NewBudget};

fn budget_with_total(total: Decimal) -> Budget {
    Budget::from_new(
        BudgetId::new(),
        NewBudget {
            main_category: None,
            sub_category: None,
            item_code: None,
            budget_year: 2025,
            total_budget: total,
            note: None,
            description: None,
            created_by: UserId::new(),
            project_name: "Quarterly newsletter".to_string(),
        },
        Utc::now(),
    )
}

fn allocation_for(budget: &Budget, cents: i64) -> NewAllocation {
    NewAllocation {
        budget_id: budget.id,
        purpose_id: "p".to_string(),
        purpose_name: "purpose".to_string(),
        allocated_amount: Decimal::new(cents, 2),
    }
}

proptest! {
    /// After any sequence of accepted allocations the remaining amount is
    /// exactly total minus allocated.
    #[test]
    fn prop_remaining_tracks_allocations(
        total_cents in 0i64..100_000_000,
        requests in prop::collection::vec(0i64..20_000_000, 0..12),
    ) {
        let mut budget = budget_with_total(Decimal::new(total_cents, 2));

        for cents in requests {
            let input = allocation_for(&budget, cents);
            match BudgetService::plan_allocation(&budget, &input) {
                Ok(outcome) => outcome.into_patch().apply_to(&mut budget, Utc::now()),
                Err(_) => prop_assert!(input.allocated_amount > budget.remaining_amount),
            }
            prop_assert_eq!(
                budget.remaining_amount,
                budget.total_budget - budget.allocated_amount
            );
            prop_assert!(budget.remaining_amount >= Decimal::ZERO);
        }
    }

    /// Recording spend never moves the remaining amount.
    #[test]
    fn prop_spend_does_not_touch_remaining(
        total_cents in 0i64..100_000_000,
        spent_cents in 0i64..200_000_000,
    ) {
        let mut budget = budget_with_total(Decimal::new(total_cents, 2));
        let before = budget.remaining_amount;

        BudgetPatch {
            spent_amount: Some(Decimal::new(spent_cents, 2)),
            ..BudgetPatch::default()
        }
        .apply_to(&mut budget, Utc::now());

        prop_assert_eq!(budget.remaining_amount, before);
    }

    /// Raising the total of a draft keeps remaining in step.
    #[test]
    fn prop_total_edit_recomputes_remaining(
        total_cents in 0i64..100_000_000,
        allocated_cents in 0i64..100_000_000,
        new_total_cents in 0i64..200_000_000,
    ) {
        let mut budget = budget_with_total(Decimal::new(total_cents, 2));
        let input = allocation_for(&budget, allocated_cents);
        if let Ok(outcome) = BudgetService::plan_allocation(&budget, &input) {
            outcome.into_patch().apply_to(&mut budget, Utc::now());
        }

        let patch = BudgetPatch {
            total_budget: Some(Decimal::new(new_total_cents, 2)),
            ..BudgetPatch::default()
        };
        let taxonomy = crate::taxonomy::Taxonomy::standard();
        if BudgetService::validate_edit(&taxonomy, &budget, &patch).is_ok() {
            patch.apply_to(&mut budget, Utc::now());
            prop_assert_eq!(
                budget.remaining_amount,
                budget.total_budget - budget.allocated_amount
            );
        } else {
            prop_assert!(Decimal::new(new_total_cents, 2) < budget.allocated_amount);
        }
    }
}
