//! HTTP client implementation using reqwest

use crate::config::ConnectionConfig;
use crate::http::{HttpExecutor, HttpReply, HttpRequest, TransportError};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, Response};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};

/// Maximum response size (10MB)
const MAX_RESPONSE_SIZE: usize = 10 * 1024 * 1024;

/// Default user agent
const USER_AGENT: &str = concat!("aigate/", env!("CARGO_PKG_VERSION"));

/// Shared HTTP client with connection pooling
#[derive(Clone)]
pub struct HttpClient {
    /// The underlying reqwest client
    client: Arc<Client>,

    /// Maximum response size to prevent OOM
    max_response_size: usize,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, TransportError> {
        Self::from_config(&ConnectionConfig::default())
    }

    /// Create a new HTTP client from connection settings
    pub fn from_config(config: &ConnectionConfig) -> Result<Self, TransportError> {
        Self::with_config(
            config.connect_timeout(),
            config.request_timeout(),
            config.max_idle_per_host,
            config.keepalive(),
        )
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(
        connect_timeout: Duration,
        request_timeout: Duration,
        max_idle_per_host: usize,
        pool_idle_timeout: Duration,
    ) -> Result<Self, TransportError> {
        let client = ClientBuilder::new()
            .pool_max_idle_per_host(max_idle_per_host)
            .pool_idle_timeout(pool_idle_timeout)
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .user_agent(USER_AGENT)
            .gzip(true)
            .build()
            .map_err(|e| TransportError::Other(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client: Arc::new(client),
            max_response_size: MAX_RESPONSE_SIZE,
        })
    }

    /// Limit the accepted response size
    pub fn with_max_response_size(mut self, max_response_size: usize) -> Self {
        self.max_response_size = max_response_size;
        self
    }

    /// Check response size to prevent OOM
    fn check_content_length(&self, response: &Response) -> Result<(), TransportError> {
        if let Some(content_length) = response.content_length() {
            if content_length as usize > self.max_response_size {
                return Err(TransportError::ResponseTooLarge {
                    size: content_length as usize,
                    limit: self.max_response_size,
                });
            }
        }

        Ok(())
    }
}

#[async_trait]
impl HttpExecutor for HttpClient {
    async fn post_json(&self, request: HttpRequest) -> Result<HttpReply, TransportError> {
        let request_id = request.options.request_id;
        debug!("POST {} [request_id: {}]", request.url, request_id);

        let mut req_builder = self.client.post(&request.url).json(&request.body);

        if let Some(timeout) = request.options.timeout {
            req_builder = req_builder.timeout(timeout);
        }

        for (key, value) in &request.headers {
            req_builder = req_builder.header(key, value);
        }

        // Add request ID header for correlation
        req_builder = req_builder.header("X-Request-ID", request_id.to_string());

        let response = req_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                warn!("Request timeout [request_id: {}]", request_id);
            } else {
                error!("Request error [request_id: {}]: {}", request_id, e);
            }
            TransportError::from(e)
        })?;

        let status = response.status();
        debug!("Response status: {} [request_id: {}]", status, request_id);

        self.check_content_length(&response)?;

        let body = response.bytes().await.map_err(TransportError::from)?;

        // Check response size after reading
        if body.len() > self.max_response_size {
            return Err(TransportError::ResponseTooLarge {
                size: body.len(),
                limit: self.max_response_size,
            });
        }

        Ok(HttpReply {
            status: status.as_u16(),
            body: String::from_utf8_lossy(&body).into_owned(),
        })
    }
}
