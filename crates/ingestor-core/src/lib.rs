//! Ingestor Core Library
//!
//! This crate provides the request models, error types, and configuration shared by
//! every Ingestor component.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use config::IngestConfig;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{IngestRequest, OwningIdentity, ValidatedOwnership};
pub use storage_types::StorageBackend;
