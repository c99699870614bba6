//! Application setup and initialization

pub mod routes;
pub mod server;

use crate::state::AppState;
use anyhow::{Context, Result};
use ingestor_core::IngestConfig;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: IngestConfig) -> Result<(Arc<AppState>, axum::Router)> {
    // Initialize telemetry first
    crate::telemetry::init_telemetry(config.is_production())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!(
        environment = %config.environment(),
        storage_backend = %config.storage_backend(),
        "Configuration loaded"
    );

    let missing = config.missing_required_keys();
    if !missing.is_empty() {
        tracing::warn!(
            missing = %missing.join(","),
            "Required settings are not configured; requests will fail until they are set"
        );
    }

    // Setup storage
    let storage = ingestor_storage::create_storage(&config)
        .await
        .context("Failed to initialize storage")?;

    let config = Arc::new(config);
    let state = Arc::new(AppState::new(config.clone(), storage));

    // Setup routes
    let router = routes::setup_routes(&config, state.clone());

    Ok((state, router))
}
