//! The ingestion pipeline.
//!
//! authenticate → validate → sniff → normalize → (metadata, key) → put → URI.
//! Every stage may short-circuit with an `AppError`; `handle` renders whichever outcome
//! is reached.

use std::sync::Arc;
use std::time::Instant;

use ingestor_core::{AppError, IngestConfig};
use ingestor_processing::{normalize, sniff_format};
use ingestor_storage::{
    build_object_metadata, derive_storage_key, public_uri, AccessControl, Storage, StorageObject,
};

use crate::auth::authenticate;
use crate::error::log_error;
use crate::invocation::{Invocation, InvocationResponse};
use crate::validation::validate_payload;

#[derive(Clone)]
pub struct IngestService {
    config: Arc<IngestConfig>,
    storage: Arc<dyn Storage>,
}

impl IngestService {
    pub fn new(config: Arc<IngestConfig>, storage: Arc<dyn Storage>) -> Self {
        Self { config, storage }
    }

    /// Run the pipeline and render its outcome.
    pub async fn handle(&self, invocation: Invocation) -> InvocationResponse {
        match self.ingest(&invocation).await {
            Ok(uri) => InvocationResponse::success(uri),
            Err(err) => {
                log_error(&err);
                InvocationResponse::from_error(&err)
            }
        }
    }

    /// Render a request that never reached the pipeline.
    ///
    /// Missing settings still take precedence over anything wrong with the request.
    pub fn reject(&self, err: AppError) -> InvocationResponse {
        let err = match self.required_settings() {
            Ok(_) => err,
            Err(config_err) => config_err,
        };
        log_error(&err);
        InvocationResponse::from_error(&err)
    }

    /// Access key and bucket, both required before a request is looked at.
    fn required_settings(&self) -> Result<(&str, &str), AppError> {
        let access_key = self
            .config
            .access_key()
            .ok_or_else(|| AppError::Misconfiguration("ACCESS_KEY not configured".to_string()))?;
        let bucket = self
            .config
            .s3_bucket()
            .ok_or_else(|| AppError::Misconfiguration("S3_BUCKET not configured".to_string()))?;
        Ok((access_key, bucket))
    }

    /// Run the pipeline, returning the public URI of the stored image.
    pub async fn ingest(&self, invocation: &Invocation) -> Result<String, AppError> {
        let start = Instant::now();

        let (access_key, bucket) = self.required_settings()?;

        authenticate(invocation.header("Authorization"), access_key)?;

        let payload = validate_payload(invocation.body.as_deref())?;
        let format = sniff_format(&payload.image)?;
        let input_bytes = payload.image.len();

        let normalized = normalize(payload.image, format).await?;

        let identity = &payload.ownership.identity;
        let metadata = build_object_metadata(&payload.request, identity);
        let key = derive_storage_key(identity, &payload.ownership.category, format.extension);

        let object = StorageObject {
            bucket: bucket.to_string(),
            key,
            bytes: normalized.bytes,
            content_type: format.mime_type.to_string(),
            metadata,
            access_control: AccessControl::PublicRead,
        };

        if let Err(e) = self.storage.put_object(&object).await {
            return Err(AppError::Storage {
                message: e.to_string(),
                metadata: object.metadata,
            });
        }

        let uri = public_uri(&self.config, bucket, &object.key);

        tracing::info!(
            bucket = %bucket,
            key = %object.key,
            content_type = %object.content_type,
            input_bytes,
            size_bytes = object.size_bytes(),
            width = normalized.width,
            height = normalized.height,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Image ingested"
        );

        Ok(uri)
    }
}
