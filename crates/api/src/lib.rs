//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes over the budget engine
//! - Request extractors
//! - Error responses

pub mod error;
pub mod extractors;
pub mod routes;

use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use budgetry_core::aggregation::BudgetAggregator;
use budgetry_core::budget::BudgetManager;
use budgetry_core::reconciliation::ReconciliationEngine;
use budgetry_core::store::{BudgetStore, TransactionSource};
use budgetry_core::taxonomy::Taxonomy;
use budgetry_core::template::YearlyTemplateGenerator;
use budgetry_core::variance::VarianceClassifier;
use budgetry_core::workflow::BudgetLifecycle;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Category taxonomy in force.
    pub taxonomy: Arc<Taxonomy>,
    /// Budget table builder.
    pub aggregator: Arc<BudgetAggregator>,
    /// Budget CRUD and allocations.
    pub budgets: BudgetManager,
    /// Approval transitions.
    pub lifecycle: BudgetLifecycle,
    /// Actual-versus-budget engine.
    pub reconciliation: ReconciliationEngine,
    /// Rating and health thresholds.
    pub classifier: VarianceClassifier,
    /// Yearly template generator.
    pub generator: YearlyTemplateGenerator,
}

impl AppState {
    /// Wires the engine components over a store and a transaction source.
    #[must_use]
    pub fn new(
        store: Arc<dyn BudgetStore>,
        source: Arc<dyn TransactionSource>,
        taxonomy: Arc<Taxonomy>,
        classifier: VarianceClassifier,
    ) -> Self {
        let aggregator = Arc::new(BudgetAggregator::with_keyword_fallback(Arc::clone(
            &taxonomy,
        )));

        Self {
            budgets: BudgetManager::new(Arc::clone(&store), Arc::clone(&taxonomy)),
            lifecycle: BudgetLifecycle::new(Arc::clone(&store)),
            reconciliation: ReconciliationEngine::new(source, Arc::clone(&aggregator)),
            generator: YearlyTemplateGenerator::new(store, Arc::clone(&taxonomy)),
            classifier,
            aggregator,
            taxonomy,
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
