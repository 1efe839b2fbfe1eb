//! Conversion between the gateway protocol and Anthropic format

use super::types::*;
use crate::config::RoleLabels;
use crate::protocol::{ImageAttachment, Message};
use crate::providers::{ProviderError, ProviderId, ProviderResult};

pub fn to_generate_request(
    model: &str,
    max_tokens: u32,
    prompt: String,
    labels: &RoleLabels,
) -> AnthropicRequest {
    AnthropicRequest {
        model: model.to_string(),
        max_tokens,
        messages: vec![AnthropicMessage {
            role: labels.user.clone(),
            content: AnthropicContent::Text(prompt),
        }],
    }
}

pub fn to_image_request(
    model: &str,
    max_tokens: u32,
    prompt: &str,
    image: &ImageAttachment,
    labels: &RoleLabels,
) -> AnthropicRequest {
    AnthropicRequest {
        model: model.to_string(),
        max_tokens,
        messages: vec![AnthropicMessage {
            role: labels.user.clone(),
            content: AnthropicContent::Blocks(vec![
                AnthropicContentBlock::Text {
                    text: prompt.to_string(),
                },
                AnthropicContentBlock::Image {
                    source: AnthropicImageSource {
                        source_type: "base64".to_string(),
                        media_type: image.mime_type.clone(),
                        data: image.to_base64(),
                    },
                },
            ]),
        }],
    }
}

fn text_message(role: &str, content: &str) -> AnthropicMessage {
    AnthropicMessage {
        role: role.to_string(),
        content: AnthropicContent::Text(content.to_string()),
    }
}

/// The new turn goes out as a user message so the model replies to it
/// rather than continuing it
pub fn to_chat_request(
    model: &str,
    max_tokens: u32,
    history: &[Message],
    last: &Message,
    labels: &RoleLabels,
) -> AnthropicRequest {
    let mut messages: Vec<AnthropicMessage> = history
        .iter()
        .map(|message| text_message(labels.label(message.role), &message.content))
        .collect();
    messages.push(text_message(&labels.user, &last.content));

    AnthropicRequest {
        model: model.to_string(),
        max_tokens,
        messages,
    }
}

/// `content[0].text`; the first block must be a text block
pub fn extract_text(response: AnthropicResponse) -> ProviderResult<String> {
    let stop_reason = response.stop_reason;
    let Some(block) = response.content.into_iter().next() else {
        return Err(ProviderError::shape(
            ProviderId::Anthropic,
            format!(
                "response has no content blocks (stop reason: {})",
                stop_reason.as_deref().unwrap_or("unknown")
            ),
        ));
    };

    match block.text {
        Some(text) if block.block_type == "text" => Ok(text),
        _ => Err(ProviderError::shape(
            ProviderId::Anthropic,
            format!("content[0] is a '{}' block, expected text", block.block_type),
        )),
    }
}
