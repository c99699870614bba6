//! Ingestor Image Processing Library
//!
//! This crate turns an uploaded byte buffer into a publishable image: it identifies the
//! format from the bytes alone, bounds the dimensions, and re-encodes in the same family.

pub mod error;
pub mod image;
pub mod sniff;

// Re-export commonly used types
pub use error::NormalizeError;
pub use crate::image::{normalize, NormalizedImage};
pub use sniff::{sniff_format, SniffError, SniffedFormat};
