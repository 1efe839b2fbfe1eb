//! HTTP transport for outbound provider calls
//!
//! This module implements the wire layer for the gateway, handling:
//! - Connection pooling and client management
//! - Per-call options (timeout, request ID correlation)
//! - Error mapping from HTTP status codes and error envelopes
//!
//! Adapters talk to the network only through [`HttpExecutor`], so tests can
//! substitute their own transport.

pub mod client;
pub mod error;

pub use client::HttpClient;
pub use error::{map_http_error, TransportError};

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use uuid::Uuid;

/// Options for a single gateway call
#[derive(Debug, Clone)]
pub struct RequestOptions {
    /// Unique request ID for correlation
    pub request_id: Uuid,

    /// Request timeout; `None` keeps the transport's configured timeout
    pub timeout: Option<Duration>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            request_id: Uuid::new_v4(),
            timeout: None,
        }
    }
}

impl RequestOptions {
    /// Create new request options with a generated request ID
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the timeout for this request
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// A fully built outbound JSON POST
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Value,
    pub options: RequestOptions,
}

impl HttpRequest {
    pub fn new(url: impl Into<String>, body: Value, options: RequestOptions) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
            body,
            options,
        }
    }

    /// Add a header. The executor sets the JSON content type itself.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Raw reply from the transport, whatever its status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait for HTTP executors
#[async_trait]
pub trait HttpExecutor: Send + Sync {
    /// Send one JSON POST and return the reply for any HTTP status.
    ///
    /// Only failures to obtain a reply at all are errors.
    async fn post_json(&self, request: HttpRequest) -> Result<HttpReply, TransportError>;
}
