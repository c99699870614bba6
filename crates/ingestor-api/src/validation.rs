//! Request payload parsing and validation.
//!
//! Checks run in a fixed order: JSON shape, base64 payload, required fields, then mutual
//! exclusion of identities.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use ingestor_core::{AppError, IngestRequest, ValidatedOwnership};

/// Standard alphabet, padding optional
const BODY_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// A request that passed every validation step
#[derive(Debug, Clone)]
pub struct ValidatedPayload {
    pub request: IngestRequest,
    pub ownership: ValidatedOwnership,
    /// Decoded upload, never empty
    pub image: Vec<u8>,
}

pub fn parse_request(body: Option<&str>) -> Result<IngestRequest, AppError> {
    let body = body
        .filter(|b| !b.trim().is_empty())
        .ok_or_else(|| AppError::MissingMetadata("request body is empty".to_string()))?;

    serde_json::from_str::<IngestRequest>(body)
        .map_err(|e| AppError::MissingMetadata(format!("request body is not valid JSON: {}", e)))
}

pub fn decode_image(request: &IngestRequest) -> Result<Vec<u8>, AppError> {
    let encoded = request
        .body
        .as_deref()
        .ok_or_else(|| AppError::MissingMetadata("body is required".to_string()))?;

    let image = BODY_ENGINE
        .decode(encoded.trim())
        .map_err(|e| AppError::MissingMetadata(format!("body is not valid base64: {}", e)))?;

    if image.is_empty() {
        return Err(AppError::MissingMetadata("body decodes to zero bytes".to_string()));
    }

    Ok(image)
}

/// Run every payload check and return the decoded upload with its owner.
pub fn validate_payload(body: Option<&str>) -> Result<ValidatedPayload, AppError> {
    let request = parse_request(body)?;
    let image = decode_image(&request)?;
    let ownership = request.validate()?;

    Ok(ValidatedPayload {
        request,
        ownership,
        image,
    })
}
