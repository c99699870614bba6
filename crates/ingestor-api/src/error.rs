//! Caller-visible error rendering
//!
//! Every `AppError` leaving the pipeline is logged at the level its metadata prescribes and
//! rendered as `{"error": "<client message>"}`. Internal detail stays in the logs.

use ingestor_core::{AppError, ErrorMetadata, LogLevel};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        ErrorResponse {
            error: err.client_message(),
        }
    }
}

/// Body of a successful ingestion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub uri: String,
}

pub fn log_error(error: &AppError) {
    let error_type = error.error_type();
    let error_code = error.error_code();
    let details = error.detailed_message();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %details, error_type, error_code, "Request rejected");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %details, error_type, error_code, "Request rejected");
        }
        LogLevel::Error => {
            tracing::error!(error = %details, error_type, error_code, "Request failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_uses_client_message() {
        let err = AppError::CorruptInput("premature end of input".into());
        let body = serde_json::to_string(&ErrorResponse::from(&err)).unwrap();
        assert_eq!(body, r#"{"error":"Corrupt image data"}"#);
    }
}
