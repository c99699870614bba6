//! In-memory storage backend.
//!
//! Keeps every written object in a map keyed by `(bucket, key)`. Nothing is ever evicted, so
//! the map grows with every upload. Used by the test suites and for short local runs without
//! object storage (`STORAGE_BACKEND=memory`); never as a deployed backend.

use crate::traits::{Storage, StorageObject, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// In-memory object store.
pub struct InMemoryStorage {
    objects: RwLock<HashMap<(String, String), StorageObject>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self {
            objects: RwLock::new(HashMap::new()),
        }
    }

    /// Fetch a previously written object.
    pub fn get(&self, bucket: &str, key: &str) -> Option<StorageObject> {
        self.objects
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
    }

    /// All stored keys, sorted.
    pub fn keys(&self) -> Vec<String> {
        let objects = self.objects.read().unwrap_or_else(PoisonError::into_inner);
        let mut keys: Vec<String> = objects.keys().map(|(_, key)| key.clone()).collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.objects
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn put_object(&self, object: &StorageObject) -> StorageResult<()> {
        let mut objects = self.objects.write().unwrap_or_else(PoisonError::into_inner);
        objects.insert(
            (object.bucket.clone(), object.key.clone()),
            object.clone(),
        );

        tracing::debug!(
            bucket = %object.bucket,
            key = %object.key,
            size_bytes = object.size_bytes(),
            "Stored object in memory"
        );

        Ok(())
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Memory
    }
}
