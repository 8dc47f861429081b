//! HTTP client for the Empholite backend
//!
//! Every endpoint answers with the same envelope: `{"success": true, ...}`
//! on success, `{"success": false, "error": ...}` on failure. The client
//! unwraps it so callers only see the payload or an [`ApiError`].

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, RequestBuilder};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

use crate::state::Failure;

/// Header sent with every request so the backend answers with JSON
pub const XHR_HEADER: (&str, &str) = ("x-requested-with", "XMLHttpRequest");

pub const LIST_PATH: &str = "/ajax/list";
pub const CHECK_PATH: &str = "/ajax/check";
pub const LOGIN_PATH: &str = "/ajax/login";
pub const CREATE_PATH: &str = "/ajax/create";

/// Errors from a backend call
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection, timeout or body read failure
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx HTTP status
    #[error("HTTP {status}")]
    Status { status: u16, body: String },

    /// `success` was false and the backend said why
    #[error("Backend error: {0}")]
    Application(Value),

    /// Body is not an envelope
    #[error("Malformed response, {0}")]
    Malformed(String),
}

impl ApiError {
    /// HTTP status, or the numeric `status` of an application error
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Application(error) => error
                .get("status")
                .and_then(Value::as_u64)
                .and_then(|s| u16::try_from(s).ok()),
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
            ApiError::Malformed(_) => None,
        }
    }
}

impl From<ApiError> for Failure {
    fn from(error: ApiError) -> Self {
        let status = error.status();
        let detail = match &error {
            ApiError::Status { body, .. } if body.is_empty() => None,
            ApiError::Status { body, .. } => Some(body.clone()),
            ApiError::Application(Value::String(text)) => Some(text.clone()),
            ApiError::Application(error) => error
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_owned)
                .or_else(|| Some(error.to_string())),
            ApiError::Transport(_) | ApiError::Malformed(_) => Some(error.to_string()),
        };
        Failure { status, detail }
    }
}

/// Unwrap a response envelope
///
/// Returns the payload (the envelope minus `success`) when `success` is
/// true.
pub fn unwrap_envelope(status: u16, body: &str) -> Result<Map<String, Value>, ApiError> {
    if !(200..300).contains(&status) {
        return Err(ApiError::Status {
            status,
            body: body.to_string(),
        });
    }

    let Ok(Value::Object(mut envelope)) = serde_json::from_str::<Value>(body) else {
        return Err(ApiError::Malformed(body.to_string()));
    };

    if envelope.get("success") == Some(&Value::Bool(true)) {
        envelope.remove("success");
        return Ok(envelope);
    }

    match envelope.remove("error") {
        Some(error) => Err(ApiError::Application(error)),
        None => Err(ApiError::Malformed(body.to_string())),
    }
}

/// Client bound to one backend origin
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static(XHR_HEADER.0),
            HeaderValue::from_static(XHR_HEADER.1),
        );
        let http = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET /ajax/list
    pub async fn list(&self) -> Result<Map<String, Value>, ApiError> {
        self.send(self.http.get(self.url(LIST_PATH))).await
    }

    /// GET /ajax/check
    pub async fn check(&self) -> Result<Map<String, Value>, ApiError> {
        self.send(self.http.get(self.url(CHECK_PATH))).await
    }

    /// POST /ajax/login, returning the `redirectUri` to navigate to
    pub async fn login(&self, user_details: &BTreeMap<String, String>) -> Result<String, ApiError> {
        let payload = self
            .send(self.http.post(self.url(LOGIN_PATH)).json(user_details))
            .await?;

        match payload.get("redirectUri") {
            Some(Value::String(uri)) => Ok(uri.clone()),
            _ => Err(ApiError::Malformed(Value::Object(payload).to_string())),
        }
    }

    /// POST /ajax/create with the document as body
    pub async fn create(&self, document: &Value) -> Result<Map<String, Value>, ApiError> {
        self.send(self.http.post(self.url(CREATE_PATH)).json(document))
            .await
    }

    async fn send(&self, request: RequestBuilder) -> Result<Map<String, Value>, ApiError> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        let url = response.url().path().to_string();
        let body = response.text().await?;
        debug!(%url, status, bytes = body.len(), "Backend responded");

        unwrap_envelope(status, &body).inspect_err(|e| {
            if let ApiError::Malformed(raw) = e {
                warn!(%url, body = %raw, "Malformed response");
            }
        })
    }
}
