//! Ingestor API Library
//!
//! This crate provides the authenticated ingestion pipeline, its function-style invocation
//! contract, and the axum adapter that serves it over HTTP.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod invocation;
pub mod services;
pub mod setup;
pub mod state;
pub mod telemetry;
pub mod validation;

// Re-exports
pub use error::ErrorResponse;
pub use invocation::{Invocation, InvocationResponse};
pub use services::ingest::IngestService;
pub use state::AppState;
