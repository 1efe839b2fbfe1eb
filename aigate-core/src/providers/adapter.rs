//! Provider adapter trait and shared dispatch
//!
//! Defines the core abstraction every backend implements, plus the pieces
//! all adapters share: settings resolution against per-backend defaults and
//! the single request/response exchange.

use super::{ProviderError, ProviderId, ProviderResult};
use crate::config::{ProviderSettings, RoleLabels, SecretString};
use crate::http::{map_http_error, HttpExecutor, HttpRequest, RequestOptions};
use crate::protocol::{ImageAttachment, Message, PromptRequest};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

/// Core trait that all provider adapters implement
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// Identifier of the backend this adapter talks to
    fn id(&self) -> ProviderId;

    /// Fail unless the backend's credential is configured.
    ///
    /// Every operation runs this before touching the network.
    fn ensure_credentials(&self) -> ProviderResult<()>;

    /// Single-shot generation; context precedes the prompt
    async fn generate(&self, request: &PromptRequest, options: RequestOptions) -> ProviderResult<String>;

    /// Single-shot generation with one inlined image
    async fn generate_with_image(
        &self,
        prompt: &str,
        image: &ImageAttachment,
        options: RequestOptions,
    ) -> ProviderResult<String>;

    /// Multi-turn chat; the last message is the new turn, the rest is history
    async fn chat(&self, conversation: &[Message], options: RequestOptions) -> ProviderResult<String>;
}

/// Built-in defaults of one backend
#[derive(Debug, Clone, Copy)]
pub struct ProviderDefaults {
    pub base_url: &'static str,
    pub model: &'static str,
    pub vision_model: &'static str,
    pub user_label: &'static str,
    pub assistant_label: &'static str,
    pub max_tokens: Option<u32>,
}

/// Provider settings with every default filled in
#[derive(Debug, Clone)]
pub struct AdapterSettings {
    pub api_key: Option<SecretString>,
    pub model: String,
    pub vision_model: String,
    pub base_url: String,
    pub role_labels: RoleLabels,
    pub max_tokens: Option<u32>,
}

impl AdapterSettings {
    /// Merge configured settings over a backend's defaults
    pub fn resolve(settings: &ProviderSettings, defaults: &ProviderDefaults) -> Self {
        let model = settings
            .model
            .clone()
            .unwrap_or_else(|| defaults.model.to_string());

        // An explicit text model also applies to images unless a vision model is set
        let vision_model = settings
            .vision_model
            .clone()
            .or_else(|| settings.model.clone())
            .unwrap_or_else(|| defaults.vision_model.to_string());

        let base_url = settings
            .base_url
            .as_deref()
            .unwrap_or(defaults.base_url)
            .trim_end_matches('/')
            .to_string();

        Self {
            api_key: settings.credential().cloned(),
            model,
            vision_model,
            base_url,
            role_labels: settings
                .role_labels
                .clone()
                .unwrap_or_else(|| RoleLabels::new(defaults.user_label, defaults.assistant_label)),
            max_tokens: settings.max_tokens.or(defaults.max_tokens),
        }
    }

    /// The API key, or an authentication error
    pub fn api_key(&self, provider: ProviderId) -> ProviderResult<&str> {
        self.api_key
            .as_ref()
            .map(|key| key.expose_secret())
            .ok_or(ProviderError::Authentication { provider })
    }
}

/// Serialize a wire request body
pub fn encode_body<T: Serialize>(provider: ProviderId, body: &T) -> ProviderResult<Value> {
    serde_json::to_value(body).map_err(|e| ProviderError::Request {
        provider,
        status: None,
        message: format!("failed to serialize request: {}", e),
    })
}

/// Perform the single exchange of a call and decode the success body.
///
/// Non-success statuses become [`ProviderError::Request`], undecodable
/// bodies become [`ProviderError::ResponseShape`].
pub async fn dispatch<R: DeserializeOwned>(
    executor: &dyn HttpExecutor,
    provider: ProviderId,
    request: HttpRequest,
) -> ProviderResult<R> {
    let request_id = request.options.request_id;
    info!(
        "Executing HTTP request to {} [request_id: {}]",
        provider, request_id
    );

    let reply = executor
        .post_json(request)
        .await
        .map_err(|e| ProviderError::transport(provider, e))?;

    if !reply.is_success() {
        warn!(
            "Request failed with status {} for {} [request_id: {}]",
            reply.status, provider, request_id
        );
        return Err(map_http_error(provider, reply.status, &reply.body));
    }

    let decoded = serde_json::from_str(&reply.body).map_err(|e| {
        warn!(
            "Failed to parse response from {} [request_id: {}]: {}",
            provider, request_id, e
        );
        ProviderError::shape(provider, format!("invalid response body: {}", e))
    })?;

    info!(
        "Request completed successfully for {} [request_id: {}]",
        provider, request_id
    );

    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULTS: ProviderDefaults = ProviderDefaults {
        base_url: "https://api.example.com/v1",
        model: "text-default",
        vision_model: "vision-default",
        user_label: "user",
        assistant_label: "assistant",
        max_tokens: Some(4096),
    };

    #[test]
    fn test_resolve_defaults() {
        let resolved = AdapterSettings::resolve(&ProviderSettings::default(), &DEFAULTS);
        assert_eq!(resolved.model, "text-default");
        assert_eq!(resolved.vision_model, "vision-default");
        assert_eq!(resolved.base_url, "https://api.example.com/v1");
        assert_eq!(resolved.role_labels, RoleLabels::new("user", "assistant"));
        assert_eq!(resolved.max_tokens, Some(4096));
        assert!(matches!(
            resolved.api_key(ProviderId::OpenAI),
            Err(ProviderError::Authentication { provider: ProviderId::OpenAI })
        ));
    }

    #[test]
    fn test_model_override_applies_to_vision() {
        let settings = ProviderSettings::default().with_model("custom");
        let resolved = AdapterSettings::resolve(&settings, &DEFAULTS);
        assert_eq!(resolved.model, "custom");
        assert_eq!(resolved.vision_model, "custom");
    }

    #[test]
    fn test_vision_model_override_wins() {
        let mut settings = ProviderSettings::default().with_model("custom");
        settings.vision_model = Some("eyes".to_string());
        let resolved = AdapterSettings::resolve(&settings, &DEFAULTS);
        assert_eq!(resolved.model, "custom");
        assert_eq!(resolved.vision_model, "eyes");
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let settings = ProviderSettings::default()
            .with_base_url("http://localhost:8080/")
            .with_api_key("k");
        let resolved = AdapterSettings::resolve(&settings, &DEFAULTS);
        assert_eq!(resolved.base_url, "http://localhost:8080");
        assert_eq!(resolved.api_key(ProviderId::Gemini).unwrap(), "k");
    }
}
