//! Anthropic adapter implementation

use super::converter::{extract_text, to_chat_request, to_generate_request, to_image_request};
use super::types::{AnthropicRequest, AnthropicResponse};
use crate::config::ProviderSettings;
use crate::http::{HttpExecutor, HttpRequest, RequestOptions};
use crate::protocol::{split_conversation, ImageAttachment, Message, PromptRequest};
use crate::providers::adapter::{dispatch, encode_body, AdapterSettings, ProviderAdapter, ProviderDefaults};
use crate::providers::{ProviderError, ProviderId, ProviderResult};
use async_trait::async_trait;
use std::sync::Arc;

/// Messages API version header value
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// The Messages API requires an explicit output budget
const DEFAULT_MAX_TOKENS: u32 = 4096;

pub(crate) const DEFAULTS: ProviderDefaults = ProviderDefaults {
    base_url: "https://api.anthropic.com/v1",
    model: "claude-3-opus-20240229",
    vision_model: "claude-3-opus-20240229",
    user_label: "user",
    assistant_label: "assistant",
    max_tokens: Some(DEFAULT_MAX_TOKENS),
};

/// Anthropic adapter
pub struct AnthropicAdapter {
    settings: AdapterSettings,
    executor: Arc<dyn HttpExecutor>,
}

impl AnthropicAdapter {
    /// Create a new Anthropic adapter
    pub fn new(settings: &ProviderSettings, executor: Arc<dyn HttpExecutor>) -> Self {
        Self {
            settings: AdapterSettings::resolve(settings, &DEFAULTS),
            executor,
        }
    }

    fn max_tokens(&self) -> u32 {
        self.settings.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS)
    }

    async fn send(&self, body: AnthropicRequest, options: RequestOptions) -> ProviderResult<String> {
        let api_key = self.settings.api_key(ProviderId::Anthropic)?;

        let url = format!("{}/messages", self.settings.base_url);
        let request = HttpRequest::new(url, encode_body(ProviderId::Anthropic, &body)?, options)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION);

        let response: AnthropicResponse =
            dispatch(self.executor.as_ref(), ProviderId::Anthropic, request).await?;
        extract_text(response)
    }
}

#[async_trait]
impl ProviderAdapter for AnthropicAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::Anthropic
    }

    fn ensure_credentials(&self) -> ProviderResult<()> {
        self.settings.api_key(ProviderId::Anthropic).map(|_| ())
    }

    async fn generate(&self, request: &PromptRequest, options: RequestOptions) -> ProviderResult<String> {
        self.ensure_credentials()?;
        let body = to_generate_request(
            &self.settings.model,
            self.max_tokens(),
            request.full_prompt(),
            &self.settings.role_labels,
        );
        self.send(body, options).await
    }

    async fn generate_with_image(
        &self,
        prompt: &str,
        image: &ImageAttachment,
        options: RequestOptions,
    ) -> ProviderResult<String> {
        self.ensure_credentials()?;
        let body = to_image_request(
            &self.settings.vision_model,
            self.max_tokens(),
            prompt,
            image,
            &self.settings.role_labels,
        );
        self.send(body, options).await
    }

    async fn chat(&self, conversation: &[Message], options: RequestOptions) -> ProviderResult<String> {
        self.ensure_credentials()?;
        let (history, last) =
            split_conversation(conversation).ok_or(ProviderError::EmptyConversation)?;
        let body = to_chat_request(
            &self.settings.model,
            self.max_tokens(),
            history,
            last,
            &self.settings.role_labels,
        );
        self.send(body, options).await
    }
}
