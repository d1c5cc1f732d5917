//! Budget management routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, patch, post},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use budgetry_core::aggregation::{AggregateSummary, BudgetAggregator, BudgetTableRow};
use budgetry_core::budget::{Budget, BudgetAllocation, BudgetPatch, NewAllocation, NewBudget};
use budgetry_core::taxonomy::{MainCategory, SubCategory};
use budgetry_shared::BudgetId;

use super::YearQuery;
use crate::{AppState, error::ApiError, extractors::ActingUser};

/// Creates the budget routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/budgets", get(list_budgets))
        .route("/budgets", post(create_budget))
        .route("/budgets/yearly", post(generate_yearly))
        .route("/budgets/{budget_id}", patch(update_budget))
        .route("/budgets/{budget_id}", delete(delete_budget))
        .route("/budgets/{budget_id}/allocations", get(list_allocations))
        .route("/budgets/{budget_id}/allocations", post(create_allocation))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for creating a budget.
#[derive(Debug, Deserialize)]
pub struct CreateBudgetRequest {
    /// Main category; inferred from the sub-category when omitted.
    pub main_category: Option<MainCategory>,
    /// Sub-category.
    pub sub_category: Option<SubCategory>,
    /// Item code.
    pub item_code: Option<String>,
    /// Fiscal year.
    pub budget_year: i32,
    /// Planned amount.
    pub total_budget: Decimal,
    /// Note.
    pub note: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Project name.
    pub project_name: String,
}

impl CreateBudgetRequest {
    fn into_new_budget(self, user: ActingUser) -> NewBudget {
        NewBudget {
            main_category: self.main_category,
            sub_category: self.sub_category,
            item_code: self.item_code,
            budget_year: self.budget_year,
            total_budget: self.total_budget,
            note: self.note,
            description: self.description,
            created_by: user.user_id(),
            project_name: self.project_name,
        }
    }
}

/// Request body for editing a draft budget.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateBudgetRequest {
    /// Main category.
    pub main_category: Option<MainCategory>,
    /// Sub-category.
    pub sub_category: Option<SubCategory>,
    /// Item code.
    pub item_code: Option<String>,
    /// Planned amount.
    pub total_budget: Option<Decimal>,
    /// Note.
    pub note: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Project name.
    pub project_name: Option<String>,
}

impl From<UpdateBudgetRequest> for BudgetPatch {
    fn from(req: UpdateBudgetRequest) -> Self {
        Self {
            main_category: req.main_category,
            sub_category: req.sub_category,
            item_code: req.item_code,
            total_budget: req.total_budget,
            note: req.note,
            description: req.description,
            project_name: req.project_name,
            ..Self::default()
        }
    }
}

/// Request body for carving an allocation out of a budget.
#[derive(Debug, Deserialize)]
pub struct CreateAllocationRequest {
    /// Transaction purpose ID.
    pub purpose_id: String,
    /// Transaction purpose name.
    pub purpose_name: String,
    /// Amount to allocate.
    pub allocated_amount: Decimal,
}

/// Request body for generating a year's template budgets.
#[derive(Debug, Deserialize)]
pub struct GenerateYearlyRequest {
    /// Fiscal year to populate.
    pub year: i32,
}

/// Budget table of one year.
#[derive(Debug, Serialize)]
pub struct BudgetTableResponse {
    /// Fiscal year.
    pub year: i32,
    /// Group rows, each followed by its leaves.
    pub rows: Vec<BudgetTableRow>,
    /// Planned totals per side.
    pub summary: AggregateSummary,
}

// ============================================================================
// Handlers
// ============================================================================

async fn list_budgets(
    State(state): State<AppState>,
    Query(query): Query<YearQuery>,
) -> Result<Json<BudgetTableResponse>, ApiError> {
    let budgets = state.budgets.list(query.year).await?;
    let rows = state.aggregator.aggregate(&budgets);
    let summary = BudgetAggregator::summarize(&rows);
    Ok(Json(BudgetTableResponse {
        year: query.year,
        rows,
        summary,
    }))
}

async fn create_budget(
    State(state): State<AppState>,
    user: ActingUser,
    Json(req): Json<CreateBudgetRequest>,
) -> Result<(StatusCode, Json<Budget>), ApiError> {
    let budget = state.budgets.create(req.into_new_budget(user)).await?;
    Ok((StatusCode::CREATED, Json(budget)))
}

async fn update_budget(
    State(state): State<AppState>,
    _user: ActingUser,
    Path(budget_id): Path<BudgetId>,
    Json(req): Json<UpdateBudgetRequest>,
) -> Result<Json<Budget>, ApiError> {
    let budget = state.budgets.edit(budget_id, req.into()).await?;
    Ok(Json(budget))
}

async fn delete_budget(
    State(state): State<AppState>,
    _user: ActingUser,
    Path(budget_id): Path<BudgetId>,
) -> Result<StatusCode, ApiError> {
    state.budgets.delete(budget_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_allocations(
    State(state): State<AppState>,
    Path(budget_id): Path<BudgetId>,
) -> Result<Json<Vec<BudgetAllocation>>, ApiError> {
    Ok(Json(state.budgets.list_allocations(budget_id).await?))
}

async fn create_allocation(
    State(state): State<AppState>,
    _user: ActingUser,
    Path(budget_id): Path<BudgetId>,
    Json(req): Json<CreateAllocationRequest>,
) -> Result<(StatusCode, Json<BudgetAllocation>), ApiError> {
    let allocation = state
        .budgets
        .allocate(NewAllocation {
            budget_id,
            purpose_id: req.purpose_id,
            purpose_name: req.purpose_name,
            allocated_amount: req.allocated_amount,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(allocation)))
}

async fn generate_yearly(
    State(state): State<AppState>,
    user: ActingUser,
    Json(req): Json<GenerateYearlyRequest>,
) -> Result<(StatusCode, Json<Vec<Budget>>), ApiError> {
    let budgets = state
        .generator
        .generate_yearly_budget(req.year, user.user_id())
        .await?;
    Ok((StatusCode::CREATED, Json(budgets)))
}
