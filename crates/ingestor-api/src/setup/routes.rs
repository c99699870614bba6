//! Route configuration and setup

use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use ingestor_core::IngestConfig;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Setup all application routes
pub fn setup_routes(config: &IngestConfig, state: Arc<AppState>) -> Router<()> {
    let max_body = config.max_request_body_bytes();
    tracing::info!(max_request_body_bytes = max_body, "Request body limit enabled");

    // Oversized bodies surface as a `Bytes` rejection so handlers can answer in JSON
    Router::new()
        .route("/", post(handlers::ingest::ingest_image))
        .route("/api/v0/images", post(handlers::ingest::ingest_image))
        .route("/invoke", post(handlers::ingest::invoke))
        .route("/health", get(handlers::health::health_check))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(max_body)),
        )
}
