//! Public gateway API
//!
//! [`Gateway`] resolves the configured provider once and exposes
//! provider-agnostic operations over it. Every failure leaves this module as a
//! [`GatewayError`] naming the operation that failed.

use crate::config::GatewayConfig;
use crate::http::{HttpClient, HttpExecutor, RequestOptions};
use crate::protocol::{ImageAttachment, Message, PromptRequest};
use crate::providers::{resolve_provider, supported_provider_ids, ProviderAdapter, ProviderError, ProviderId};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

/// Prompt sent by [`Gateway::probe`]
pub const PROBE_PROMPT: &str = "Say hello in one sentence";

/// Gateway operation, as named in error messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ResolveProvider,
    GenerateResponse,
    GenerateResponseWithImage,
    Chat,
}

impl Operation {
    pub fn description(&self) -> &'static str {
        match self {
            Operation::ResolveProvider => "resolve AI provider",
            Operation::GenerateResponse => "generate AI response",
            Operation::GenerateResponseWithImage => "generate AI response with image",
            Operation::Chat => "chat with AI",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// The single error type returned by [`Gateway`]
#[derive(Debug, Error)]
#[error("Failed to {operation}: {source}")]
pub struct GatewayError {
    pub operation: Operation,
    /// Configured provider id, verbatim
    pub provider: String,
    #[source]
    pub source: ProviderError,
}

impl GatewayError {
    pub fn new(operation: Operation, provider: impl Into<String>, source: ProviderError) -> Self {
        Self {
            operation,
            provider: provider.into(),
            source,
        }
    }

    /// Whether the caller may reasonably retry the call
    pub fn is_retryable(&self) -> bool {
        self.source.is_retryable()
    }
}

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Provider-agnostic entry point
///
/// Holds no mutable state; share it behind an `Arc` for concurrent calls.
pub struct Gateway {
    adapter: Arc<dyn ProviderAdapter>,
}

impl Gateway {
    /// Build a gateway with a pooled HTTP client from `config.connection`
    pub fn new(config: GatewayConfig) -> GatewayResult<Self> {
        let provider: ProviderId = config
            .provider
            .parse()
            .map_err(|e| Self::resolve_failed(&config.provider, e))?;

        let client = HttpClient::from_config(&config.connection)
            .map_err(|e| Self::resolve_failed(&config.provider, ProviderError::transport(provider, e)))?;

        Self::with_executor(config, Arc::new(client))
    }

    /// Build a gateway over an injected transport
    pub fn with_executor(config: GatewayConfig, executor: Arc<dyn HttpExecutor>) -> GatewayResult<Self> {
        let adapter = resolve_provider(&config.provider, &config, executor)
            .map_err(|e| Self::resolve_failed(&config.provider, e))?;

        info!("AI gateway using provider {}", adapter.id());
        Ok(Self { adapter })
    }

    fn resolve_failed(provider: &str, source: ProviderError) -> GatewayError {
        error!("Failed to resolve AI provider '{}': {}", provider, source);
        GatewayError::new(Operation::ResolveProvider, provider, source)
    }

    /// Active provider
    pub fn current_provider(&self) -> ProviderId {
        self.adapter.id()
    }

    /// Every provider the gateway can be configured with
    pub fn supported_providers() -> &'static [ProviderId] {
        supported_provider_ids()
    }

    /// Fail now if the active provider's credential is missing
    pub fn check_credentials(&self) -> GatewayResult<()> {
        self.adapter
            .ensure_credentials()
            .map_err(|e| self.wrap(Operation::ResolveProvider, e))
    }

    /// Single-shot text generation; an empty `context` is ignored
    pub async fn generate_ai_response(&self, prompt: &str, context: &str) -> GatewayResult<String> {
        self.generate_ai_response_with_options(prompt, context, RequestOptions::new())
            .await
    }

    pub async fn generate_ai_response_with_options(
        &self,
        prompt: &str,
        context: &str,
        options: RequestOptions,
    ) -> GatewayResult<String> {
        let request = PromptRequest::new(prompt).with_context(context);
        self.adapter
            .generate(&request, options)
            .await
            .map_err(|e| self.wrap(Operation::GenerateResponse, e))
    }

    /// Single-shot generation over one image
    pub async fn generate_ai_response_with_image(
        &self,
        prompt: &str,
        image: &ImageAttachment,
    ) -> GatewayResult<String> {
        self.generate_ai_response_with_image_with_options(prompt, image, RequestOptions::new())
            .await
    }

    pub async fn generate_ai_response_with_image_with_options(
        &self,
        prompt: &str,
        image: &ImageAttachment,
        options: RequestOptions,
    ) -> GatewayResult<String> {
        self.adapter
            .generate_with_image(prompt, image, options)
            .await
            .map_err(|e| self.wrap(Operation::GenerateResponseWithImage, e))
    }

    /// Multi-turn chat; the last message is the new turn
    pub async fn chat_with_ai(&self, conversation: &[Message]) -> GatewayResult<String> {
        self.chat_with_ai_with_options(conversation, RequestOptions::new())
            .await
    }

    pub async fn chat_with_ai_with_options(
        &self,
        conversation: &[Message],
        options: RequestOptions,
    ) -> GatewayResult<String> {
        self.adapter
            .chat(conversation, options)
            .await
            .map_err(|e| self.wrap(Operation::Chat, e))
    }

    /// Round-trip a fixed prompt through the active provider
    pub async fn probe(&self) -> GatewayResult<String> {
        self.generate_ai_response(PROBE_PROMPT, "").await
    }

    fn wrap(&self, operation: Operation, source: ProviderError) -> GatewayError {
        let provider = self.adapter.id();
        error!("Failed to {} via {}: {}", operation, provider, source);
        GatewayError::new(operation, provider.as_str(), source)
    }
}

impl fmt::Debug for Gateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gateway")
            .field("provider", &self.adapter.id())
            .finish()
    }
}
