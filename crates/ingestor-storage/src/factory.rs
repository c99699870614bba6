use crate::memory::InMemoryStorage;
#[cfg(feature = "storage-s3")]
use crate::S3Storage;
use crate::{Storage, StorageBackend, StorageResult};
#[cfg(not(feature = "storage-s3"))]
use crate::StorageError;
use ingestor_core::IngestConfig;
use std::sync::Arc;

/// Create the process-wide storage handle based on configuration
///
/// `StorageBackend::Memory` keeps every upload in process memory and never evicts, so it is
/// only meant for tests and short local runs. Deployments use S3.
pub async fn create_storage(config: &IngestConfig) -> StorageResult<Arc<dyn Storage>> {
    match config.storage_backend() {
        #[cfg(feature = "storage-s3")]
        StorageBackend::S3 => {
            let region = config.s3_region().map(String::from);
            let endpoint = config.s3_endpoint().map(String::from);

            let storage = S3Storage::new(region, endpoint).await?;
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-s3"))]
        StorageBackend::S3 => Err(StorageError::ConfigError(
            "S3 storage backend not available (storage-s3 feature not enabled)".to_string(),
        )),

        StorageBackend::Memory => {
            tracing::warn!(
                "Using in-memory storage; uploads are never evicted and are lost on restart. \
                 Not for deployed instances"
            );
            Ok(Arc::new(InMemoryStorage::new()))
        }
    }
}
