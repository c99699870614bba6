//! Storage key generation.
//!
//! Key format: `{owner_id}/{type}/{uuid}.{extension}`.

use ingestor_core::OwningIdentity;
use uuid::Uuid;

/// Build a fresh storage key for an image.
///
/// A new v4 UUID is drawn on every call. There is no collision check.
pub fn derive_storage_key(identity: &OwningIdentity, category: &str, extension: &str) -> String {
    storage_key_with_id(identity, category, Uuid::new_v4(), extension)
}

pub(crate) fn storage_key_with_id(
    identity: &OwningIdentity,
    category: &str,
    id: Uuid,
    extension: &str,
) -> String {
    format!("{}/{}/{}.{}", identity.id(), category, id, extension)
}
