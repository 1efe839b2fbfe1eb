//! Provider registry and dispatch
//!
//! Maps a configured provider identifier to its adapter. Resolution never
//! touches the network.

use super::{
    AnthropicAdapter, GeminiAdapter, OpenAIAdapter, ProviderAdapter, ProviderId, ProviderResult,
};
use crate::config::GatewayConfig;
use crate::http::HttpExecutor;
use std::sync::Arc;
use tracing::debug;

/// Every supported provider, in registry order
pub fn supported_provider_ids() -> &'static [ProviderId] {
    &ProviderId::ALL
}

impl ProviderId {
    /// Create the adapter for this provider
    pub fn create_adapter(
        &self,
        config: &GatewayConfig,
        executor: Arc<dyn HttpExecutor>,
    ) -> Arc<dyn ProviderAdapter> {
        let settings = config.providers.get(*self);
        match self {
            ProviderId::Gemini => Arc::new(GeminiAdapter::new(settings, executor)),
            ProviderId::OpenAI => Arc::new(OpenAIAdapter::new(settings, executor)),
            ProviderId::Anthropic => Arc::new(AnthropicAdapter::new(settings, executor)),
        }
    }
}

/// Resolve a provider identifier to its adapter.
///
/// Fails with [`super::ProviderError::UnsupportedProvider`] listing the
/// valid identifiers when `id` is not registered.
pub fn resolve_provider(
    id: &str,
    config: &GatewayConfig,
    executor: Arc<dyn HttpExecutor>,
) -> ProviderResult<Arc<dyn ProviderAdapter>> {
    let provider: ProviderId = id.parse()?;
    debug!("Resolved AI provider {}", provider);
    Ok(provider.create_adapter(config, executor))
}
