//! HTTP error mapping utilities

use crate::providers::{ProviderError, ProviderId};
use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Failure to obtain any HTTP reply
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Request timed out")]
    Timeout,

    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("Failed to read response body: {0}")]
    Body(String),

    #[error("Response size {size} exceeds maximum {limit}")]
    ResponseTooLarge { size: usize, limit: usize },

    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::Connect(err.to_string())
        } else if err.is_body() || err.is_decode() {
            TransportError::Body(err.to_string())
        } else {
            TransportError::Other(err.to_string())
        }
    }
}

/// Map a non-success status and its body to a provider error
pub fn map_http_error(provider: ProviderId, status: u16, body: &str) -> ProviderError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| extract_error_message(&v))
        .or_else(|| {
            let trimmed = body.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .unwrap_or_else(|| status_reason(status));

    ProviderError::Request {
        provider,
        status: Some(status),
        message,
    }
}

/// Canonical reason phrase, e.g. "Internal Server Error"
fn status_reason(status: u16) -> String {
    StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP error {}", status))
}

/// Extract the error message from a JSON error envelope
fn extract_error_message(json: &Value) -> Option<String> {
    // OpenAI, Anthropic and Gemini all use: { "error": { "message": "..." } }
    if let Some(message) = json
        .get("error")
        .and_then(|e| e.get("message"))
        .and_then(|v| v.as_str())
    {
        return Some(message.to_string());
    }

    // Generic format: { "message": "..." }
    if let Some(message) = json.get("message").and_then(|v| v.as_str()) {
        return Some(message.to_string());
    }

    // { "error": "..." }
    json.get("error")
        .and_then(|v| v.as_str())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message_of(err: ProviderError) -> (Option<u16>, String) {
        match err {
            ProviderError::Request { status, message, .. } => (status, message),
            other => panic!("Expected Request error, got {:?}", other),
        }
    }

    #[test]
    fn test_openai_style_envelope() {
        let body = r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error"}}"#;
        let (status, message) = message_of(map_http_error(ProviderId::OpenAI, 401, body));
        assert_eq!(status, Some(401));
        assert_eq!(message, "Incorrect API key provided");
    }

    #[test]
    fn test_anthropic_style_envelope() {
        let body = r#"{"type":"error","error":{"type":"overloaded_error","message":"Overloaded"}}"#;
        let (_, message) = message_of(map_http_error(ProviderId::Anthropic, 529, body));
        assert_eq!(message, "Overloaded");
    }

    #[test]
    fn test_plain_error_string() {
        let (_, message) = message_of(map_http_error(ProviderId::Gemini, 400, r#"{"error":"bad"}"#));
        assert_eq!(message, "bad");
    }

    #[test]
    fn test_raw_body_fallback() {
        let (_, message) = message_of(map_http_error(ProviderId::Gemini, 502, "upstream down\n"));
        assert_eq!(message, "upstream down");
    }

    #[test]
    fn test_empty_body_uses_reason_phrase() {
        let (_, message) = message_of(map_http_error(ProviderId::OpenAI, 500, ""));
        assert_eq!(message, "Internal Server Error");
    }
}
