//! Tests for the reconciliation engine.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use budgetry_shared::{BudgetId, UserId};

use super::engine::ReconciliationEngine;
use super::error::ReconciliationError;
use super::types::ReconciliationSubject;
use crate::aggregation::BudgetAggregator;
use crate::budget::{Budget, NewBudget};
use crate::store::{Actuals, ActualsKey, MockTransactionSource, StoreError};
use crate::taxonomy::{CategoryKey, MainCategory, SubCategory, Taxonomy};
use crate::variance::{ExecutionRating, VarianceClassifier};

fn budget(main: Option<MainCategory>, sub: Option<&str>, year: i32, total: Decimal) -> Budget {
    Budget::from_new(
        BudgetId::new(),
        NewBudget {
            main_category: main,
            sub_category: sub.map(SubCategory::new),
            item_code: None,
            budget_year: year,
            total_budget: total,
            note: None,
            description: None,
            created_by: UserId::new(),
            project_name: "Line item".to_string(),
        },
        Utc::now(),
    )
}

fn engine(source: MockTransactionSource) -> ReconciliationEngine {
    let aggregator = BudgetAggregator::with_keyword_fallback(Arc::new(Taxonomy::standard()));
    ReconciliationEngine::new(Arc::new(source), Arc::new(aggregator))
}

/// Source answering from a fixed table of per-budget actuals.
fn source_with(table: HashMap<BudgetId, Actuals>) -> MockTransactionSource {
    source_with_categories(table, HashMap::new())
}

/// Source answering from per-budget and category-only tables.
fn source_with_categories(
    budgets: HashMap<BudgetId, Actuals>,
    categories: HashMap<CategoryKey, Actuals>,
) -> MockTransactionSource {
    let mut source = MockTransactionSource::new();
    source.expect_actuals_for().returning(move |_, keys| {
        Ok(keys
            .iter()
            .filter_map(|key| {
                let found = match key {
                    ActualsKey::Budget(id) => budgets.get(id),
                    ActualsKey::Category(category) => categories.get(category),
                };
                found.map(|a| (key.clone(), *a))
            })
            .collect())
    });
    source
}

#[tokio::test]
async fn test_membership_scenario_rates_good() {
    let b = budget(
        Some(MainCategory::Income),
        Some("membership_subscription"),
        2025,
        dec!(50000),
    );
    let source = source_with(HashMap::from([(b.id, Actuals::new(dec!(45000), dec!(0)))]));

    let rows = engine(source)
        .calculate_actual_income_expense(std::slice::from_ref(&b))
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.subject, ReconciliationSubject::Budget(b.id));
    assert_eq!(row.actual_income, dec!(45000));
    assert_eq!(row.variance, dec!(-5000));
    assert_eq!(row.variance_percentage, dec!(-10));
    assert_eq!(
        VarianceClassifier::default().rate(row.variance_percentage),
        ExecutionRating::Good
    );
}

#[tokio::test]
async fn test_empty_input_never_consults_source() {
    let mut source = MockTransactionSource::new();
    source.expect_actuals_for().never();
    let engine = engine(source);

    assert!(engine.calculate_actual_income_expense(&[]).await.unwrap().is_empty());
    assert!(
        engine
            .calculate_group_actual_income_expense(&[])
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn test_source_failure_is_not_zero() {
    let mut source = MockTransactionSource::new();
    source
        .expect_actuals_for()
        .returning(|_, _| Err(StoreError::unavailable("transaction ledger")));

    let b = budget(Some(MainCategory::Expense), Some("event_expense"), 2025, dec!(100));
    let result = engine(source)
        .calculate_actual_income_expense(std::slice::from_ref(&b))
        .await;
    assert!(matches!(
        result,
        Err(ReconciliationError::SourceUnavailable(StoreError::Unavailable(_)))
    ));
}

#[tokio::test]
async fn test_missing_actuals_count_as_zero() {
    let b = budget(Some(MainCategory::Expense), Some("event_expense"), 2025, dec!(400));
    let rows = engine(source_with(HashMap::new()))
        .calculate_actual_income_expense(std::slice::from_ref(&b))
        .await
        .unwrap();
    assert_eq!(rows[0].actual_expense, dec!(0));
    assert_eq!(rows[0].variance, dec!(-400));
    assert_eq!(rows[0].variance_percentage, dec!(-100));
}

#[tokio::test]
async fn test_duplicate_budgets_reconciled_once() {
    let b = budget(Some(MainCategory::Income), Some("donation"), 2025, dec!(10));
    let rows = engine(source_with(HashMap::new()))
        .calculate_actual_income_expense(&[b.clone(), b.clone()])
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
}

#[tokio::test]
async fn test_unresolved_main_reconciles_as_expense() {
    let b = budget(None, Some("travel"), 2025, dec!(100));
    let source = source_with(HashMap::from([(b.id, Actuals::new(dec!(500), dec!(80)))]));

    let rows = engine(source)
        .calculate_actual_income_expense(std::slice::from_ref(&b))
        .await
        .unwrap();
    assert_eq!(rows[0].budget_category, MainCategory::Expense);
    assert_eq!(rows[0].variance, dec!(-20));
}

#[tokio::test]
async fn test_queries_once_per_fiscal_year() {
    let budgets = vec![
        budget(Some(MainCategory::Income), Some("donation"), 2024, dec!(10)),
        budget(Some(MainCategory::Income), Some("donation"), 2025, dec!(10)),
        budget(Some(MainCategory::Income), Some("sponsorship"), 2025, dec!(10)),
    ];

    let mut source = MockTransactionSource::new();
    source
        .expect_actuals_for()
        .withf(|year, keys| *year == 2024 && keys.len() == 2)
        .times(1)
        .returning(|_, _| Ok(HashMap::new()));
    source
        .expect_actuals_for()
        .withf(|year, keys| {
            let categories = keys
                .iter()
                .filter(|k| matches!(k, ActualsKey::Category(_)))
                .count();
            *year == 2025 && keys.len() == 4 && categories == 2
        })
        .times(1)
        .returning(|_, _| Ok(HashMap::new()));

    let rows = engine(source)
        .calculate_actual_income_expense(&budgets)
        .await
        .unwrap();
    assert_eq!(rows.len(), 3);
}

#[tokio::test]
async fn test_group_rows_sum_members() {
    let a = budget(Some(MainCategory::Expense), Some("event_expense"), 2025, dec!(3000));
    let b = budget(Some(MainCategory::Expense), Some("event_expense"), 2025, dec!(2000));
    let c = budget(Some(MainCategory::Income), Some("sponsorship"), 2025, dec!(1000));
    let source = source_with(HashMap::from([
        (a.id, Actuals::new(dec!(0), dec!(3500))),
        (b.id, Actuals::new(dec!(0), dec!(1000))),
        (c.id, Actuals::new(dec!(1500), dec!(0))),
    ]));

    let rows = engine(source)
        .calculate_group_actual_income_expense(&[a, b, c])
        .await
        .unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(
        rows[0].subject,
        ReconciliationSubject::Category(CategoryKey::new(MainCategory::Expense, "event_expense"))
    );
    assert_eq!(rows[0].budgeted_amount, dec!(5000));
    assert_eq!(rows[0].actual_expense, dec!(4500));
    assert_eq!(rows[0].variance, dec!(-500));
    assert_eq!(rows[0].variance_percentage, dec!(-10));

    assert_eq!(rows[1].budget_category, MainCategory::Income);
    assert_eq!(rows[1].variance, dec!(500));
    assert_eq!(rows[1].variance_percentage, dec!(50));
}

#[tokio::test]
async fn test_category_only_actuals_reach_sole_budget() {
    let b = budget(Some(MainCategory::Income), Some("donation"), 2025, dec!(1000));
    let donation = CategoryKey::new(MainCategory::Income, "donation");
    let source = source_with_categories(
        HashMap::new(),
        HashMap::from([(donation.clone(), Actuals::new(dec!(900), dec!(0)))]),
    );
    let engine = engine(source);

    let groups = engine
        .calculate_group_actual_income_expense(std::slice::from_ref(&b))
        .await
        .unwrap();
    assert_eq!(groups[0].subject, ReconciliationSubject::Category(donation));
    assert_eq!(groups[0].actual_income, dec!(900));
    assert_eq!(groups[0].variance, dec!(-100));
    assert_eq!(groups[0].variance_percentage, dec!(-10));

    let rows = engine
        .calculate_actual_income_expense(std::slice::from_ref(&b))
        .await
        .unwrap();
    assert_eq!(rows[0].actual_income, dec!(900));
    assert_eq!(rows[0].variance_percentage, dec!(-10));
}

#[tokio::test]
async fn test_shared_category_actuals_count_once_per_group() {
    let a = budget(Some(MainCategory::Income), Some("donation"), 2025, dec!(600));
    let b = budget(Some(MainCategory::Income), Some("donation"), 2025, dec!(400));
    let donation = CategoryKey::new(MainCategory::Income, "donation");
    let source = source_with_categories(
        HashMap::from([(a.id, Actuals::new(dec!(500), dec!(0)))]),
        HashMap::from([(donation, Actuals::new(dec!(300), dec!(0)))]),
    );
    let engine = engine(source);
    let budgets = [a, b];

    let groups = engine
        .calculate_group_actual_income_expense(&budgets)
        .await
        .unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].budgeted_amount, dec!(1000));
    assert_eq!(groups[0].actual_income, dec!(800));

    let rows = engine
        .calculate_actual_income_expense(&budgets)
        .await
        .unwrap();
    assert_eq!(rows[0].actual_income, dec!(500));
    assert_eq!(rows[1].actual_income, dec!(0));
}

#[tokio::test]
async fn test_group_rows_follow_legacy_classification() {
    let mut legacy = budget(None, None, 2025, dec!(100));
    legacy.project_name = "行政办公用品".to_string();

    let rows = engine(source_with(HashMap::new()))
        .calculate_group_actual_income_expense(std::slice::from_ref(&legacy))
        .await
        .unwrap();
    assert_eq!(
        rows[0].subject,
        ReconciliationSubject::Category(CategoryKey::new(
            MainCategory::Expense,
            "administrative_management"
        ))
    );
}

#[tokio::test]
async fn test_concurrent_calls_agree() {
    let budgets: Vec<Budget> = (1..=6)
        .map(|i| {
            budget(
                Some(MainCategory::Expense),
                Some("member_welfare"),
                2025,
                Decimal::from(i * 1000),
            )
        })
        .collect();
    let table: HashMap<_, _> = budgets
        .iter()
        .enumerate()
        .map(|(i, b)| (b.id, Actuals::new(dec!(0), Decimal::from(i * 700))))
        .collect();
    let engine = engine(source_with(table));

    let (first, second, groups_a, groups_b) = tokio::join!(
        engine.calculate_actual_income_expense(&budgets),
        engine.calculate_actual_income_expense(&budgets),
        engine.calculate_group_actual_income_expense(&budgets),
        engine.calculate_group_actual_income_expense(&budgets),
    );
    assert_eq!(first.unwrap(), second.unwrap());
    assert_eq!(groups_a.unwrap(), groups_b.unwrap());
}

fn arb_members() -> impl Strategy<Value = Vec<(i64, i64, i64)>> {
    prop::collection::vec((0i64..10_000_000, 0i64..10_000_000, 0i64..10_000_000), 1..15)
}

proptest! {
    /// A group's variance is Σ actual − Σ budgeted over its members, and its
    /// actuals are the sum of the per-budget actuals.
    #[test]
    fn prop_group_rows_associative(members in arb_members(), income in any::<bool>()) {
        let (main, sub) = if income {
            (MainCategory::Income, "event_income")
        } else {
            (MainCategory::Expense, "event_expense")
        };

        let budgets: Vec<Budget> = members
            .iter()
            .map(|(total, _, _)| budget(Some(main), Some(sub), 2025, Decimal::new(*total, 2)))
            .collect();
        let table: HashMap<_, _> = budgets
            .iter()
            .zip(&members)
            .map(|(b, (_, inc, exp))| {
                (b.id, Actuals::new(Decimal::new(*inc, 2), Decimal::new(*exp, 2)))
            })
            .collect();

        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let engine = engine(source_with(table));
        let (rows, groups) = runtime.block_on(async {
            (
                engine.calculate_actual_income_expense(&budgets).await.unwrap(),
                engine.calculate_group_actual_income_expense(&budgets).await.unwrap(),
            )
        });

        prop_assert_eq!(groups.len(), 1);
        let group = &groups[0];

        let sum_budgeted: Decimal = rows.iter().map(|r| r.budgeted_amount).sum();
        let sum_actual: Decimal = rows.iter().map(|r| r.actual_amount()).sum();
        let sum_income: Decimal = rows.iter().map(|r| r.actual_income).sum();
        let sum_expense: Decimal = rows.iter().map(|r| r.actual_expense).sum();

        prop_assert_eq!(group.budgeted_amount, sum_budgeted);
        prop_assert_eq!(group.actual_income, sum_income);
        prop_assert_eq!(group.actual_expense, sum_expense);
        prop_assert_eq!(group.variance, sum_actual - sum_budgeted);
        prop_assert_eq!(
            group.variance,
            rows.iter().map(|r| r.variance).sum::<Decimal>()
        );
    }

    /// Budgets with nothing planned always show a zero percentage.
    #[test]
    fn prop_zero_budget_rows(actual in 0i64..10_000_000) {
        let b = budget(Some(MainCategory::Income), Some("donation"), 2025, Decimal::ZERO);
        let table = HashMap::from([(b.id, Actuals::new(Decimal::new(actual, 2), Decimal::ZERO))]);

        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let rows = runtime
            .block_on(engine(source_with(table)).calculate_actual_income_expense(std::slice::from_ref(&b)))
            .unwrap();
        prop_assert_eq!(rows[0].variance_percentage, Decimal::ZERO);
    }
}
