//! Gemini adapter implementation

use super::converter::{extract_text, to_chat_request, to_generate_request, to_image_request};
use super::types::{GeminiGenerationConfig, GeminiRequest, GeminiResponse};
use crate::config::ProviderSettings;
use crate::http::{HttpExecutor, HttpRequest, RequestOptions};
use crate::protocol::{split_conversation, ImageAttachment, Message, PromptRequest};
use crate::providers::adapter::{dispatch, encode_body, AdapterSettings, ProviderAdapter, ProviderDefaults};
use crate::providers::{ProviderError, ProviderId, ProviderResult};
use async_trait::async_trait;
use std::sync::Arc;

pub(crate) const DEFAULTS: ProviderDefaults = ProviderDefaults {
    base_url: "https://generativelanguage.googleapis.com/v1beta",
    model: "gemini-2.0-flash-exp",
    vision_model: "gemini-2.0-flash-exp",
    user_label: "user",
    assistant_label: "model",
    max_tokens: None,
};

/// Gemini adapter
pub struct GeminiAdapter {
    settings: AdapterSettings,
    executor: Arc<dyn HttpExecutor>,
}

impl GeminiAdapter {
    /// Create a new Gemini adapter
    pub fn new(settings: &ProviderSettings, executor: Arc<dyn HttpExecutor>) -> Self {
        Self {
            settings: AdapterSettings::resolve(settings, &DEFAULTS),
            executor,
        }
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.settings.base_url, model)
    }

    async fn send(
        &self,
        model: &str,
        mut body: GeminiRequest,
        options: RequestOptions,
    ) -> ProviderResult<String> {
        let api_key = self.settings.api_key(ProviderId::Gemini)?;
        body.generation_config = self
            .settings
            .max_tokens
            .map(|max_output_tokens| GeminiGenerationConfig { max_output_tokens });

        let body = encode_body(ProviderId::Gemini, &body)?;
        let request = HttpRequest::new(self.endpoint(model), body, options)
            .header("x-goog-api-key", api_key);

        let response: GeminiResponse =
            dispatch(self.executor.as_ref(), ProviderId::Gemini, request).await?;
        extract_text(response)
    }
}

#[async_trait]
impl ProviderAdapter for GeminiAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::Gemini
    }

    fn ensure_credentials(&self) -> ProviderResult<()> {
        self.settings.api_key(ProviderId::Gemini).map(|_| ())
    }

    async fn generate(&self, request: &PromptRequest, options: RequestOptions) -> ProviderResult<String> {
        self.ensure_credentials()?;
        let body = to_generate_request(request.full_prompt(), &self.settings.role_labels);
        self.send(&self.settings.model, body, options).await
    }

    async fn generate_with_image(
        &self,
        prompt: &str,
        image: &ImageAttachment,
        options: RequestOptions,
    ) -> ProviderResult<String> {
        self.ensure_credentials()?;
        let body = to_image_request(prompt, image, &self.settings.role_labels);
        self.send(&self.settings.vision_model, body, options).await
    }

    async fn chat(&self, conversation: &[Message], options: RequestOptions) -> ProviderResult<String> {
        self.ensure_credentials()?;
        let (history, last) =
            split_conversation(conversation).ok_or(ProviderError::EmptyConversation)?;
        let body = to_chat_request(history, last, &self.settings.role_labels);
        self.send(&self.settings.model, body, options).await
    }
}
