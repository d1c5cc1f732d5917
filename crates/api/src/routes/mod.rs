//! API route definitions.

use axum::Router;
use serde::Deserialize;

use crate::AppState;

pub mod budgets;
pub mod health;
pub mod reconciliation;
pub mod taxonomy;
pub mod workflow;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(taxonomy::routes())
        .merge(budgets::routes())
        .merge(workflow::routes())
        .merge(reconciliation::routes())
}

/// `?year=` query parameter.
#[derive(Debug, Deserialize)]
pub struct YearQuery {
    /// Fiscal year.
    pub year: i32,
}
