//! Error types module
//!
//! Every failure the pipeline can produce is an `AppError` variant. The variant alone decides
//! the caller-visible status code and message (see [`ErrorMetadata`]); the inner strings carry
//! operator-facing detail that is logged but never returned to the caller.

use std::collections::BTreeMap;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for rejected input that may indicate a misbehaving client
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "STORAGE_ERROR")
    fn error_code(&self) -> &'static str;

    /// Client-facing message (differs from the internal error message)
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Misconfiguration: {0}")]
    Misconfiguration(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Missing metadata: {0}")]
    MissingMetadata(String),

    #[error("Id mismatch: {0}")]
    IdMismatch(String),

    #[error("Unrecognised file type")]
    UnrecognisedFileType,

    #[error("Corrupt input: {0}")]
    CorruptInput(String),

    #[error("Image processing error: {0}")]
    Processing(String),

    #[error("Storage error: {message}")]
    Storage {
        message: String,
        /// Metadata that was attached to the failed put, for diagnosis
        metadata: BTreeMap<String, String>,
    },
}

/// Static metadata for each variant: (http_status, error_code, log_level).
fn app_error_static_metadata(err: &AppError) -> (u16, &'static str, LogLevel) {
    match err {
        AppError::Misconfiguration(_) => (500, "MISCONFIGURATION", LogLevel::Error),
        AppError::Unauthorized(_) => (401, "UNAUTHORIZED", LogLevel::Warn),
        AppError::PayloadTooLarge(_) => (413, "PAYLOAD_TOO_LARGE", LogLevel::Debug),
        AppError::MissingMetadata(_) => (400, "MISSING_METADATA", LogLevel::Debug),
        AppError::IdMismatch(_) => (400, "ID_MISMATCH", LogLevel::Debug),
        AppError::UnrecognisedFileType => (400, "UNRECOGNISED_FILE_TYPE", LogLevel::Debug),
        AppError::CorruptInput(_) => (400, "CORRUPT_INPUT", LogLevel::Warn),
        AppError::Processing(_) => (500, "PROCESSING_ERROR", LogLevel::Error),
        AppError::Storage { .. } => (500, "STORAGE_ERROR", LogLevel::Error),
    }
}

impl AppError {
    /// Get the error type name for logs
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::Misconfiguration(_) => "Misconfiguration",
            AppError::Unauthorized(_) => "Unauthorized",
            AppError::PayloadTooLarge(_) => "PayloadTooLarge",
            AppError::MissingMetadata(_) => "MissingMetadata",
            AppError::IdMismatch(_) => "IdMismatch",
            AppError::UnrecognisedFileType => "UnrecognisedFileType",
            AppError::CorruptInput(_) => "CorruptInput",
            AppError::Processing(_) => "ProcessingError",
            AppError::Storage { .. } => "StorageError",
        }
    }

    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).2
    }

    fn client_message(&self) -> String {
        match self {
            AppError::Misconfiguration(_) => "Server misconfigured".to_string(),
            AppError::Unauthorized(_) => "Not authorised".to_string(),
            AppError::PayloadTooLarge(_) => "Payload too large".to_string(),
            AppError::MissingMetadata(_) => "Missing metadata".to_string(),
            AppError::IdMismatch(_) => "Id Mismatch".to_string(),
            AppError::UnrecognisedFileType => "Unrecognised file type".to_string(),
            AppError::CorruptInput(_) => "Corrupt image data".to_string(),
            AppError::Processing(_) => "Error processing image".to_string(),
            AppError::Storage { metadata, .. } => format!(
                "Error storing image, metadata: {}",
                serde_json::to_string(metadata).unwrap_or_default()
            ),
        }
    }
}
