//! Normalization failure classification.

use image::ImageError;
use ingestor_core::AppError;
use thiserror::Error;

/// Why an image could not be normalized
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// The bytes carry a known signature but the payload cannot be decoded
    #[error("corrupt image: {0}")]
    CorruptInput(String),

    /// The format was recognised but has no codec in this build
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("image processing failed: {0}")]
    Other(String),
}

impl NormalizeError {
    /// True when the failure is the caller's fault.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            NormalizeError::CorruptInput(_) | NormalizeError::UnsupportedFormat(_)
        )
    }
}

impl From<ImageError> for NormalizeError {
    fn from(err: ImageError) -> Self {
        match err {
            ImageError::Decoding(e) => NormalizeError::CorruptInput(e.to_string()),
            ImageError::IoError(e) => NormalizeError::CorruptInput(e.to_string()),
            ImageError::Unsupported(e) => NormalizeError::UnsupportedFormat(e.to_string()),
            ImageError::Limits(e) => NormalizeError::Other(e.to_string()),
            ImageError::Parameter(e) => NormalizeError::Other(e.to_string()),
            ImageError::Encoding(e) => NormalizeError::Other(e.to_string()),
        }
    }
}

/// Messages from text-only encoders that indicate bad input rather than a server fault.
const CORRUPT_INPUT_MARKERS: &[&str] = &[
    "invalid sos parameters for sequential jpeg",
    "premature end of",
];

const UNSUPPORTED_FORMAT_MARKERS: &[&str] = &["unsupported image format"];

/// Classify an error that only exposes a message (mozjpeg reports libjpeg failures as text).
pub(crate) fn classify_message(message: &str) -> NormalizeError {
    let lowered = message.to_lowercase();

    if CORRUPT_INPUT_MARKERS.iter().any(|m| lowered.contains(m)) {
        NormalizeError::CorruptInput(message.to_string())
    } else if UNSUPPORTED_FORMAT_MARKERS.iter().any(|m| lowered.contains(m)) {
        NormalizeError::UnsupportedFormat(message.to_string())
    } else {
        NormalizeError::Other(message.to_string())
    }
}

impl From<NormalizeError> for AppError {
    fn from(err: NormalizeError) -> Self {
        match err {
            NormalizeError::CorruptInput(msg) | NormalizeError::UnsupportedFormat(msg) => {
                AppError::CorruptInput(msg)
            }
            NormalizeError::Other(msg) => AppError::Processing(msg),
        }
    }
}
