//! Budget approval routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::post,
};
use serde::Deserialize;

use budgetry_core::budget::Budget;
use budgetry_shared::BudgetId;

use crate::{AppState, error::ApiError, extractors::ActingUser};

/// Creates the workflow routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/budgets/{budget_id}/approve", post(approve_budget))
        .route("/budgets/{budget_id}/activate", post(activate_budget))
        .route("/budgets/{budget_id}/revoke", post(revoke_budget))
}

/// Request body for approving a budget.
#[derive(Debug, Deserialize)]
pub struct ApproveRequest {
    /// Approval comment; must not be blank.
    pub comment: String,
}

/// Request body for revoking a budget.
#[derive(Debug, Deserialize)]
pub struct RevokeRequest {
    /// Revocation reason; must not be blank.
    pub reason: String,
}

async fn approve_budget(
    State(state): State<AppState>,
    user: ActingUser,
    Path(budget_id): Path<BudgetId>,
    Json(req): Json<ApproveRequest>,
) -> Result<Json<Budget>, ApiError> {
    let budget = state
        .lifecycle
        .approve(budget_id, user.user_id(), req.comment)
        .await?;
    Ok(Json(budget))
}

async fn activate_budget(
    State(state): State<AppState>,
    user: ActingUser,
    Path(budget_id): Path<BudgetId>,
) -> Result<Json<Budget>, ApiError> {
    let budget = state.lifecycle.activate(budget_id, user.user_id()).await?;
    Ok(Json(budget))
}

async fn revoke_budget(
    State(state): State<AppState>,
    user: ActingUser,
    Path(budget_id): Path<BudgetId>,
    Json(req): Json<RevokeRequest>,
) -> Result<Json<Budget>, ApiError> {
    let budget = state
        .lifecycle
        .revoke(budget_id, user.user_id(), req.reason)
        .await?;
    Ok(Json(budget))
}
