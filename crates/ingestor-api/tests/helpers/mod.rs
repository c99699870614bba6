#![allow(dead_code)]

pub mod fixtures;

use async_trait::async_trait;
use axum_test::TestServer;
use ingestor_api::setup::routes::setup_routes;
use ingestor_api::AppState;
use ingestor_core::{IngestConfig, StorageBackend};
use ingestor_storage::{InMemoryStorage, Storage, StorageError, StorageObject, StorageResult};
use std::sync::Arc;

pub const ACCESS_KEY: &str = "test-access-key";
pub const BUCKET: &str = "test-bucket";
pub const BASE_URI: &str = "https://images.example.com/";

/// Configuration with every request-time setting present
pub fn test_config() -> IngestConfig {
    IngestConfig {
        access_key: Some(ACCESS_KEY.to_string()),
        s3_bucket: Some(BUCKET.to_string()),
        image_access_base_uri: Some(BASE_URI.to_string()),
        storage_backend: StorageBackend::Memory,
        max_request_body_bytes: 20 * 1024 * 1024,
        environment: "test".to_string(),
        ..Default::default()
    }
}

pub fn bearer() -> String {
    format!("Bearer {}", ACCESS_KEY)
}

/// Test application backed by in-memory storage
pub struct TestApp {
    pub server: TestServer,
    pub storage: Arc<InMemoryStorage>,
}

impl TestApp {
    /// Get the HTTP test client
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

pub fn setup_test_app() -> TestApp {
    setup_test_app_with_config(test_config())
}

pub fn setup_test_app_with_config(config: IngestConfig) -> TestApp {
    let storage = Arc::new(InMemoryStorage::new());
    let server = test_server(config, storage.clone());
    TestApp { server, storage }
}

pub fn test_server(config: IngestConfig, storage: Arc<dyn Storage>) -> TestServer {
    let config = Arc::new(config);
    let state = Arc::new(AppState::new(config.clone(), storage));
    let router = setup_routes(&config, state);
    TestServer::new(router).expect("Failed to start test server")
}

/// Storage double whose every write fails
pub struct FailingStorage;

#[async_trait]
impl Storage for FailingStorage {
    async fn put_object(&self, _object: &StorageObject) -> StorageResult<()> {
        Err(StorageError::UploadFailed("simulated outage".to_string()))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Memory
    }
}
