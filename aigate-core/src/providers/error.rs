//! Provider error types and handling

use super::ProviderId;
use crate::http::TransportError;
use thiserror::Error;

/// Result type for provider operations
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Errors raised by the provider registry and adapters
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Configured provider id is not registered
    #[error("Unsupported AI provider: {id}. Supported providers: {}", .supported.join(", "))]
    UnsupportedProvider { id: String, supported: Vec<String> },

    /// Credential for the active provider is missing
    #[error("{provider} API key not configured")]
    Authentication { provider: ProviderId },

    /// Backend returned a non-success status, or the transport failed
    #[error("{provider} API error{}: {message}", .status.map(|s| format!(" ({})", s)).unwrap_or_default())]
    Request {
        provider: ProviderId,
        status: Option<u16>,
        message: String,
    },

    /// Success status, but the body lacks the expected payload
    #[error("{provider} returned an unexpected response: {message}")]
    ResponseShape { provider: ProviderId, message: String },

    /// Chat was called without any message
    #[error("Conversation must contain at least one message")]
    EmptyConversation,
}

impl ProviderError {
    /// Wrap a transport failure
    pub fn transport(provider: ProviderId, err: TransportError) -> Self {
        ProviderError::Request {
            provider,
            status: None,
            message: err.to_string(),
        }
    }

    /// Build a response shape error
    pub fn shape(provider: ProviderId, message: impl Into<String>) -> Self {
        ProviderError::ResponseShape {
            provider,
            message: message.into(),
        }
    }

    /// Whether the caller may reasonably retry the call
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ProviderError::Request { .. } | ProviderError::ResponseShape { .. }
        )
    }

    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            ProviderError::Request { status, .. } => *status,
            _ => None,
        }
    }
}
