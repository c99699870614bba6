//! Configuration module
//!
//! Settings are read from the process environment (after loading a `.env` file when one is
//! present). `ACCESS_KEY` and `S3_BUCKET` are required to serve requests, but their absence
//! does not prevent startup: the pipeline reports it per request as a misconfiguration.

use std::env;

use crate::constants::{DEFAULT_MAX_REQUEST_BODY_MB, DEFAULT_PORT};
use crate::storage_types::StorageBackend;

/// Ingestion service configuration
#[derive(Clone, Debug, Default)]
pub struct IngestConfig {
    // Request-time settings
    pub access_key: Option<String>,
    pub s3_bucket: Option<String>,
    pub image_access_base_uri: Option<String>,
    // Storage client settings
    pub storage_backend: StorageBackend,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO, etc.)
    // Server settings
    pub server_port: u16,
    pub max_request_body_bytes: usize,
    pub environment: String,
}

impl IngestConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let storage_backend = match get("STORAGE_BACKEND") {
            Some(value) => value.parse::<StorageBackend>()?,
            None => StorageBackend::default(),
        };

        let server_port = match get("PORT") {
            Some(value) => value
                .parse::<u16>()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid port number, got {}", value))?,
            None => DEFAULT_PORT,
        };

        let max_request_body_bytes = match get("MAX_REQUEST_BODY_MB") {
            Some(value) => value
                .parse::<usize>()
                .ok()
                .and_then(|mb| mb.checked_mul(1024 * 1024))
                .ok_or_else(|| {
                    anyhow::anyhow!("MAX_REQUEST_BODY_MB must be a positive integer, got {}", value)
                })?,
            None => DEFAULT_MAX_REQUEST_BODY_MB * 1024 * 1024,
        };

        Ok(IngestConfig {
            access_key: get("ACCESS_KEY"),
            s3_bucket: get("S3_BUCKET"),
            image_access_base_uri: get("IMAGE_ACCESS_BASE_URI"),
            storage_backend,
            s3_region: get("S3_REGION").or_else(|| get("AWS_REGION")),
            s3_endpoint: get("S3_ENDPOINT"),
            server_port,
            max_request_body_bytes,
            environment: get("ENVIRONMENT")
                .or_else(|| get("APP_ENV"))
                .unwrap_or_else(|| "development".to_string()),
        })
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let environment = self.environment.to_lowercase();
        environment == "production" || environment == "prod"
    }

    /// Names of request-time settings that are not configured.
    pub fn missing_required_keys(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.access_key.is_none() {
            missing.push("ACCESS_KEY");
        }
        if self.s3_bucket.is_none() {
            missing.push("S3_BUCKET");
        }
        missing
    }

    pub fn access_key(&self) -> Option<&str> {
        self.access_key.as_deref()
    }

    pub fn s3_bucket(&self) -> Option<&str> {
        self.s3_bucket.as_deref()
    }

    pub fn image_access_base_uri(&self) -> Option<&str> {
        self.image_access_base_uri.as_deref()
    }

    pub fn s3_region(&self) -> Option<&str> {
        self.s3_region.as_deref()
    }

    pub fn s3_endpoint(&self) -> Option<&str> {
        self.s3_endpoint.as_deref()
    }

    pub fn storage_backend(&self) -> StorageBackend {
        self.storage_backend
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn max_request_body_bytes(&self) -> usize {
        self.max_request_body_bytes
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }
}
