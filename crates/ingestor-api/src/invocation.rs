//! Function-style invocation contract.
//!
//! An `Invocation` is what a serverless runtime hands the pipeline: the request headers and
//! the raw body text. The pipeline always answers with an `InvocationResponse`, never an
//! error, so every failure is rendered before it leaves the crate.

use std::collections::{BTreeMap, HashMap};

use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use ingestor_core::{AppError, ErrorMetadata};
use serde::{Deserialize, Serialize};

use crate::error::{ErrorResponse, UploadResponse};

const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Invocation {
    #[serde(default)]
    pub headers: Option<HashMap<String, String>>,
    #[serde(default)]
    pub body: Option<String>,
}

impl Invocation {
    pub fn new(headers: HashMap<String, String>, body: Option<String>) -> Self {
        Invocation {
            headers: Some(headers),
            body,
        }
    }

    /// Build an invocation from an HTTP request. Non-UTF-8 headers and bodies are dropped.
    pub fn from_http(headers: &HeaderMap, body: &[u8]) -> Self {
        let headers = headers
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = std::str::from_utf8(body).ok().map(str::to_string);
        Invocation::new(headers, body)
    }

    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .as_ref()?
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationResponse {
    pub status_code: u16,
    pub body: String,
    pub headers: BTreeMap<String, String>,
}

impl InvocationResponse {
    fn json(status_code: u16, body: String) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), JSON_CONTENT_TYPE.to_string());
        InvocationResponse {
            status_code,
            body,
            headers,
        }
    }

    pub fn success(uri: String) -> Self {
        let body = serde_json::to_string(&UploadResponse { uri }).unwrap_or_default();
        Self::json(200, body)
    }

    pub fn from_error(err: &AppError) -> Self {
        let body = serde_json::to_string(&ErrorResponse::from(err)).unwrap_or_default();
        Self::json(err.http_status_code(), body)
    }
}

impl IntoResponse for InvocationResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, self.body).into_response();
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(JSON_CONTENT_TYPE),
        );
        response
    }
}
