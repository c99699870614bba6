//! Ingestor Storage Library
//!
//! This crate provides the object-store abstraction used by the ingestion pipeline, with
//! an S3 backend and an in-memory backend.
//!
//! # Storage key format
//!
//! Every stored image lives at `{owner_id}/{type}/{uuid}.{extension}`. The owner id is the
//! account id or, failing that, the champion fund id. Key generation is centralized in the
//! `keys` module.

pub mod factory;
pub mod keys;
pub mod memory;
pub mod metadata;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;
pub mod urls;

// Re-export commonly used types
pub use factory::create_storage;
pub use ingestor_core::StorageBackend;
pub use keys::derive_storage_key;
pub use memory::InMemoryStorage;
pub use metadata::{build_object_metadata, encode_component};
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{AccessControl, Storage, StorageError, StorageObject, StorageResult};
pub use urls::public_uri;
