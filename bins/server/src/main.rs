//! Budgetry API Server
//!
//! Main entry point for the budget engine service.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use budgetry_api::{AppState, create_router};
use budgetry_core::taxonomy::Taxonomy;
use budgetry_core::variance::VarianceClassifier;
use budgetry_shared::AppConfig;
use budgetry_store::{InMemoryBudgetStore, InMemoryTransactionSource};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "budgetry=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Load taxonomy
    let taxonomy = match &config.taxonomy.path {
        Some(path) => Taxonomy::from_file(path)
            .with_context(|| format!("Failed to load taxonomy from {path}"))?,
        None => Taxonomy::standard(),
    };
    info!(version = %taxonomy.version(), "Taxonomy loaded");

    let classifier = VarianceClassifier::from_config(&config.classifier)
        .context("Invalid classifier thresholds")?;

    // Create application state
    let state = AppState::new(
        Arc::new(InMemoryBudgetStore::new()),
        Arc::new(InMemoryTransactionSource::new()),
        Arc::new(taxonomy),
        classifier,
    );

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
