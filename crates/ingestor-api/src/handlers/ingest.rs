//! HTTP entry points for the ingestion pipeline.

use std::sync::Arc;

use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use ingestor_core::AppError;

use crate::invocation::Invocation;
use crate::state::AppState;

/// Plain HTTP upload: headers and body are taken from the request itself.
#[tracing::instrument(skip_all)]
pub async fn ingest_image(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let response = match body {
        Ok(body) => {
            let invocation = Invocation::from_http(&headers, &body);
            state.ingest.handle(invocation).await
        }
        Err(rejection) => state.ingest.reject(body_error(rejection)),
    };

    response.into_response()
}

/// Function-style call: the body is an invocation envelope, the reply is a response envelope.
#[tracing::instrument(skip_all)]
pub async fn invoke(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let response = match body.map_err(body_error).and_then(|body| {
        serde_json::from_slice::<Invocation>(&body).map_err(|e| {
            AppError::MissingMetadata(format!("invalid invocation envelope: {}", e))
        })
    }) {
        Ok(invocation) => state.ingest.handle(invocation).await,
        Err(err) => state.ingest.reject(err),
    };

    axum::Json(response).into_response()
}

fn body_error(rejection: BytesRejection) -> AppError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(rejection.body_text())
    } else {
        AppError::MissingMetadata(format!("unreadable request body: {}", rejection.body_text()))
    }
}
