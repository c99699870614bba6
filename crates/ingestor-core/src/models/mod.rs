//! Request models shared by the pipeline stages.

pub mod identity;
pub mod request;

pub use identity::OwningIdentity;
pub use request::{IngestRequest, ValidatedOwnership};
