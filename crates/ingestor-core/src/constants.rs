//! Fixed pipeline constants.

/// Largest width or height, in pixels, of a stored image.
pub const MAX_IMAGE_DIMENSION: u32 = 2500;

/// JPEG quality used when re-encoding.
pub const JPEG_QUALITY: u8 = 85;

/// WebP quality used when re-encoding.
pub const WEBP_QUALITY: f32 = 85.0;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_MAX_REQUEST_BODY_MB: usize = 20;
