//! OpenAI adapter implementation

use super::converter::{extract_text, to_chat_request, to_generate_request, to_image_request};
use super::types::{OpenAIRequest, OpenAIResponse};
use crate::config::ProviderSettings;
use crate::http::{HttpExecutor, HttpRequest, RequestOptions};
use crate::protocol::{split_conversation, ImageAttachment, Message, PromptRequest};
use crate::providers::adapter::{dispatch, encode_body, AdapterSettings, ProviderAdapter, ProviderDefaults};
use crate::providers::{ProviderError, ProviderId, ProviderResult};
use async_trait::async_trait;
use std::sync::Arc;

pub(crate) const DEFAULTS: ProviderDefaults = ProviderDefaults {
    base_url: "https://api.openai.com/v1",
    model: "gpt-4",
    vision_model: "gpt-4-vision-preview",
    user_label: "user",
    assistant_label: "assistant",
    max_tokens: None,
};

/// OpenAI adapter
pub struct OpenAIAdapter {
    settings: AdapterSettings,
    executor: Arc<dyn HttpExecutor>,
}

impl OpenAIAdapter {
    /// Create a new OpenAI adapter
    pub fn new(settings: &ProviderSettings, executor: Arc<dyn HttpExecutor>) -> Self {
        Self {
            settings: AdapterSettings::resolve(settings, &DEFAULTS),
            executor,
        }
    }

    async fn send(&self, mut body: OpenAIRequest, options: RequestOptions) -> ProviderResult<String> {
        let api_key = self.settings.api_key(ProviderId::OpenAI)?;
        body.max_tokens = self.settings.max_tokens;

        let url = format!("{}/chat/completions", self.settings.base_url);
        let request = HttpRequest::new(url, encode_body(ProviderId::OpenAI, &body)?, options)
            .header("Authorization", format!("Bearer {}", api_key));

        let response: OpenAIResponse =
            dispatch(self.executor.as_ref(), ProviderId::OpenAI, request).await?;
        extract_text(response)
    }
}

#[async_trait]
impl ProviderAdapter for OpenAIAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::OpenAI
    }

    fn ensure_credentials(&self) -> ProviderResult<()> {
        self.settings.api_key(ProviderId::OpenAI).map(|_| ())
    }

    async fn generate(&self, request: &PromptRequest, options: RequestOptions) -> ProviderResult<String> {
        self.ensure_credentials()?;
        let body = to_generate_request(
            &self.settings.model,
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
        let body = to_chat_request(&self.settings.model, history, last, &self.settings.role_labels);
        self.send(body, options).await
    }
}
