//! Image normalization
//!
//! - Bounded resizing (resize)
//! - Format-specific re-encoding (encode)
//! - EXIF/ICC carry-over (embedded)
//! - The blocking pipeline and its async entry point (normalizer)

pub mod embedded;
pub mod encode;
pub mod normalizer;
pub mod resize;

pub use normalizer::{normalize, normalize_blocking, NormalizedImage};
pub use resize::{calculate_bounded_dimensions, fit_within};
