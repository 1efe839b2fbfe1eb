//! Conversion between the gateway protocol and OpenAI format

use super::types::*;
use crate::config::RoleLabels;
use crate::protocol::{ImageAttachment, Message};
use crate::providers::{ProviderError, ProviderId, ProviderResult};

/// Single user message carrying the full prompt
pub fn to_generate_request(model: &str, prompt: String, labels: &RoleLabels) -> OpenAIRequest {
    OpenAIRequest {
        model: model.to_string(),
        messages: vec![OpenAIMessage {
            role: labels.user.clone(),
            content: OpenAIContent::Text(prompt),
        }],
        max_tokens: None,
    }
}

/// Single user message whose content is the prompt and a data-URI image
pub fn to_image_request(
    model: &str,
    prompt: &str,
    image: &ImageAttachment,
    labels: &RoleLabels,
) -> OpenAIRequest {
    OpenAIRequest {
        model: model.to_string(),
        messages: vec![OpenAIMessage {
            role: labels.user.clone(),
            content: OpenAIContent::Parts(vec![
                OpenAIContentPart::Text {
                    text: prompt.to_string(),
                },
                OpenAIContentPart::ImageUrl {
                    image_url: OpenAIImageUrl {
                        url: image.to_data_uri(),
                    },
                },
            ]),
        }],
        max_tokens: None,
    }
}

fn text_message(role: &str, content: &str) -> OpenAIMessage {
    OpenAIMessage {
        role: role.to_string(),
        content: OpenAIContent::Text(content.to_string()),
    }
}

/// History in order with mapped roles, then the new turn as a user message
pub fn to_chat_request(
    model: &str,
    history: &[Message],
    last: &Message,
    labels: &RoleLabels,
) -> OpenAIRequest {
    let mut messages: Vec<OpenAIMessage> = history
        .iter()
        .map(|message| text_message(labels.label(message.role), &message.content))
        .collect();
    messages.push(text_message(&labels.user, &last.content));

    OpenAIRequest {
        model: model.to_string(),
        messages,
        max_tokens: None,
    }
}

/// `choices[0].message.content`
pub fn extract_text(response: OpenAIResponse) -> ProviderResult<String> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::shape(ProviderId::OpenAI, "response has no choices"))?;

    match (choice.message.content, choice.message.refusal) {
        (Some(content), _) => Ok(content),
        (None, Some(refusal)) => Err(ProviderError::shape(
            ProviderId::OpenAI,
            format!("model refused: {}", refusal),
        )),
        (None, None) => Err(ProviderError::shape(
            ProviderId::OpenAI,
            format!(
                "choices[0].message.content is missing (finish reason: {})",
                choice.finish_reason.as_deref().unwrap_or("unknown")
            ),
        )),
    }
}
