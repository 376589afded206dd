//! HTTP request helpers for webhook delivery.
//!
//! Webhook endpoints are plain HTTP: POST creates, PUT updates, DELETE
//! removes. Uses reqwest's blocking client directly -- deliveries are
//! sequential and short-lived.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use serde_json::Value;

use crate::delivery::auth::{apply_auth, RequestAuth};
use crate::error::HookError;

/// Blocking HTTP sender shared across deliveries.
pub struct HttpSender {
    client: Client,
}

impl HttpSender {
    /// Create a sender with a 30 second request timeout.
    pub fn new() -> Result<Self, HookError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| HookError::RequestFailed {
                url: String::new(),
                reason: format!("Failed to create HTTP client: {}", e),
            })?;
        Ok(Self { client })
    }

    /// POST a JSON payload to the resource.
    pub fn post(&self, url: &str, auth: &RequestAuth, data: &Value) -> Result<Value, HookError> {
        self.send(Method::POST, url, auth, Some(data))
    }

    /// PUT a JSON payload to the resource.
    pub fn put(&self, url: &str, auth: &RequestAuth, data: &Value) -> Result<Value, HookError> {
        self.send(Method::PUT, url, auth, Some(data))
    }

    /// DELETE the resource.
    pub fn delete(&self, url: &str, auth: &RequestAuth) -> Result<Value, HookError> {
        self.send(Method::DELETE, url, auth, None)
    }

    fn send(
        &self,
        method: Method,
        url: &str,
        auth: &RequestAuth,
        body: Option<&Value>,
    ) -> Result<Value, HookError> {
        let mut request = self.client.request(method.clone(), url);
        if let Some(data) = body {
            request = request.json(data);
        }
        let request = apply_auth(request, auth);

        let response = request.send().map_err(|e| {
            tracing::error!(%url, %method, error = %e, "Webhook request failed");
            HookError::RequestFailed {
                url: url.to_string(),
                reason: e.to_string(),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(%url, %method, %status, "Webhook endpoint rejected request");
            return Err(HookError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        let text = response.text().map_err(|e| HookError::RequestFailed {
            url: url.to_string(),
            reason: format!("Failed to read response body: {}", e),
        })?;

        parse_body(&content_type, url, &text)
    }
}

/// Parse a response body by content type.
///
/// Some endpoints answer form-encoded key/value text; those are mapped
/// to a JSON object of strings. Everything else is parsed as JSON, with
/// an empty body standing in for null.
fn parse_body(content_type: &str, url: &str, text: &str) -> Result<Value, HookError> {
    if text.is_empty() {
        return Ok(Value::Null);
    }

    if content_type.starts_with("text/plain") {
        let map: serde_json::Map<String, Value> = url::form_urlencoded::parse(text.as_bytes())
            .map(|(k, v)| (k.into_owned(), Value::String(v.into_owned())))
            .collect();
        return Ok(Value::Object(map));
    }

    serde_json::from_str(text).map_err(|e| HookError::RequestFailed {
        url: url.to_string(),
        reason: format!("Invalid JSON response: {}", e),
    })
}
