//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::BTreeMap;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Access policy applied to a stored object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessControl {
    /// Anyone holding the URI may read the object
    #[default]
    PublicRead,
}

/// A fully prepared object, ready for a single put.
#[derive(Debug, Clone)]
pub struct StorageObject {
    pub bucket: String,
    pub key: String,
    pub bytes: Bytes,
    pub content_type: String,
    /// Object metadata; values are already transport-safe
    pub metadata: BTreeMap<String, String>,
    pub access_control: AccessControl,
}

impl StorageObject {
    pub fn size_bytes(&self) -> usize {
        self.bytes.len()
    }
}

/// Storage abstraction trait
///
/// Backends perform exactly one write attempt per call. Retrying is left to the caller,
/// and the ingestion pipeline never retries.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Write the object under its key with its content type, metadata and ACL.
    async fn put_object(&self, object: &StorageObject) -> StorageResult<()>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
