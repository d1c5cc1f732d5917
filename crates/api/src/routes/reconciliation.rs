//! Budget versus actual routes.

use std::collections::HashMap;

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use rust_decimal::Decimal;
use serde::Serialize;

use budgetry_core::reconciliation::{ActualIncomeExpenseData, ReconciliationSubject};
use budgetry_core::taxonomy::CategoryKey;
use budgetry_core::variance::{BudgetHealth, ExecutionRating, VarianceClassifier};
use budgetry_shared::BudgetId;

use super::YearQuery;
use crate::{AppState, error::ApiError};

/// Creates the reconciliation routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/budgets/reconciliation", get(reconcile_budgets))
        .route("/budgets/reconciliation/groups", get(reconcile_groups))
}

/// One reconciliation row with its classification.
#[derive(Debug, Serialize)]
pub struct ReconciliationRow {
    /// Budgeted and actual amounts.
    #[serde(flatten)]
    pub data: ActualIncomeExpenseData,
    /// Spend recorded against the budgets of this row.
    pub spent_amount: Decimal,
    /// Execution rating of the variance.
    pub rating: ExecutionRating,
    /// Budget health.
    pub health: BudgetHealth,
}

impl ReconciliationRow {
    fn classify(
        classifier: &VarianceClassifier,
        data: ActualIncomeExpenseData,
        spent_amount: Decimal,
    ) -> Self {
        Self {
            rating: classifier.rate(data.variance_percentage),
            health: classifier.health(data.budgeted_amount, spent_amount, data.actual_amount()),
            spent_amount,
            data,
        }
    }
}

/// Reconciliation rows of one year.
#[derive(Debug, Serialize)]
pub struct ReconciliationResponse {
    /// Fiscal year.
    pub year: i32,
    /// Rows in table order.
    pub rows: Vec<ReconciliationRow>,
}

async fn reconcile_budgets(
    State(state): State<AppState>,
    Query(query): Query<YearQuery>,
) -> Result<Json<ReconciliationResponse>, ApiError> {
    let budgets = state.budgets.list(query.year).await?;
    let spent: HashMap<BudgetId, Decimal> =
        budgets.iter().map(|b| (b.id, b.spent_amount)).collect();

    let rows = state
        .reconciliation
        .calculate_actual_income_expense(&budgets)
        .await?
        .into_iter()
        .map(|data| {
            let spent_amount = match &data.subject {
                ReconciliationSubject::Budget(id) => spent.get(id).copied().unwrap_or_default(),
                ReconciliationSubject::Category(_) => Decimal::ZERO,
            };
            ReconciliationRow::classify(&state.classifier, data, spent_amount)
        })
        .collect();

    Ok(Json(ReconciliationResponse {
        year: query.year,
        rows,
    }))
}

async fn reconcile_groups(
    State(state): State<AppState>,
    Query(query): Query<YearQuery>,
) -> Result<Json<ReconciliationResponse>, ApiError> {
    let budgets = state.budgets.list(query.year).await?;
    let mut spent: HashMap<CategoryKey, Decimal> = HashMap::new();
    for budget in &budgets {
        *spent
            .entry(state.reconciliation.category_of(budget))
            .or_default() += budget.spent_amount;
    }

    let rows = state
        .reconciliation
        .calculate_group_actual_income_expense(&budgets)
        .await?
        .into_iter()
        .map(|data| {
            let spent_amount = match &data.subject {
                ReconciliationSubject::Category(key) => spent.get(key).copied().unwrap_or_default(),
                ReconciliationSubject::Budget(_) => Decimal::ZERO,
            };
            ReconciliationRow::classify(&state.classifier, data, spent_amount)
        })
        .collect();

    Ok(Json(ReconciliationResponse {
        year: query.year,
        rows,
    }))
}
