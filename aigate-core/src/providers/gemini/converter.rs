//! Conversion between the gateway protocol and Gemini format

use super::types::*;
use crate::config::RoleLabels;
use crate::protocol::{ImageAttachment, Message};
use crate::providers::{ProviderError, ProviderId, ProviderResult};

fn text_part(text: impl Into<String>) -> GeminiPart {
    GeminiPart::Text { text: text.into() }
}

/// Single user turn carrying the full prompt
pub fn to_generate_request(prompt: String, labels: &RoleLabels) -> GeminiRequest {
    GeminiRequest {
        contents: vec![GeminiContent {
            role: labels.user.clone(),
            parts: vec![text_part(prompt)],
        }],
        generation_config: None,
    }
}

/// Single user turn with the prompt followed by the inlined image
pub fn to_image_request(prompt: &str, image: &ImageAttachment, labels: &RoleLabels) -> GeminiRequest {
    GeminiRequest {
        contents: vec![GeminiContent {
            role: labels.user.clone(),
            parts: vec![
                text_part(prompt),
                GeminiPart::InlineData {
                    inline_data: GeminiInlineData {
                        mime_type: image.mime_type.clone(),
                        data: image.to_base64(),
                    },
                },
            ],
        }],
        generation_config: None,
    }
}

/// History turns in order, then the new turn as a user turn
pub fn to_chat_request(history: &[Message], last: &Message, labels: &RoleLabels) -> GeminiRequest {
    let mut contents: Vec<GeminiContent> = history
        .iter()
        .map(|message| GeminiContent {
            role: labels.label(message.role).to_string(),
            parts: vec![text_part(message.content.as_str())],
        })
        .collect();

    contents.push(GeminiContent {
        role: labels.user.clone(),
        parts: vec![text_part(last.content.as_str())],
    });

    GeminiRequest {
        contents,
        generation_config: None,
    }
}

/// Concatenated text of the first candidate's parts
pub fn extract_text(response: GeminiResponse) -> ProviderResult<String> {
    let Some(candidate) = response.candidates.into_iter().next() else {
        let reason = response
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .map(|r| format!(" (prompt blocked: {})", r))
            .unwrap_or_default();
        return Err(ProviderError::shape(
            ProviderId::Gemini,
            format!("response has no candidates{}", reason),
        ));
    };

    let texts: Vec<String> = candidate
        .content
        .map(|c| c.parts)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|part| part.text)
        .collect();

    if texts.is_empty() {
        let reason = candidate
            .finish_reason
            .map(|r| format!(" (finish reason: {})", r))
            .unwrap_or_default();
        return Err(ProviderError::shape(
            ProviderId::Gemini,
            format!("candidates[0].content.parts has no text{}", reason),
        ));
    }

    Ok(texts.concat())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn labels() -> RoleLabels {
        RoleLabels::new("user", "model")
    }

    #[test]
    fn test_generate_request_shape() {
        let body = serde_json::to_value(to_generate_request("hi".to_string(), &labels())).unwrap();
        assert_eq!(
            body,
            json!({ "contents": [ { "role": "user", "parts": [ { "text": "hi" } ] } ] })
        );
    }

    #[test]
    fn test_image_request_shape() {
        let image = ImageAttachment::new(b"abc".to_vec(), "image/webp");
        let body = serde_json::to_value(to_image_request("what is this?", &image, &labels())).unwrap();
        assert_eq!(
            body["contents"][0]["parts"],
            json!([
                { "text": "what is this?" },
                { "inlineData": { "mimeType": "image/webp", "data": "YWJj" } }
            ])
        );
    }

    #[test]
    fn test_chat_translates_assistant_role() {
        let history = vec![Message::user("hello"), Message::assistant("hi there")];
        let last = Message::user("how are you?");
        let body = serde_json::to_value(to_chat_request(&history, &last, &labels())).unwrap();

        let roles: Vec<&str> = body["contents"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["role"].as_str().unwrap())
            .collect();
        assert_eq!(roles, vec!["user", "model", "user"]);
        assert_eq!(body["contents"][2]["parts"][0]["text"], "how are you?");
    }

    #[test]
    fn test_extract_concatenates_text_parts() {
        let response: GeminiResponse = serde_json::from_value(json!({
            "candidates": [ { "content": { "role": "model", "parts": [
                { "text": "Hello, " }, { "functionCall": { "name": "x" } }, { "text": "world" }
            ] }, "finishReason": "STOP" } ]
        }))
        .unwrap();
        assert_eq!(extract_text(response).unwrap(), "Hello, world");
    }

    #[test]
    fn test_extract_blocked_prompt() {
        let response: GeminiResponse = serde_json::from_value(json!({
            "promptFeedback": { "blockReason": "SAFETY" }
        }))
        .unwrap();
        let err = extract_text(response).unwrap_err();
        assert!(matches!(err, ProviderError::ResponseShape { .. }));
        assert!(err.to_string().contains("SAFETY"));
    }

    #[test]
    fn test_extract_candidate_without_text() {
        let response: GeminiResponse = serde_json::from_value(json!({
            "candidates": [ { "finishReason": "MAX_TOKENS" } ]
        }))
        .unwrap();
        let err = extract_text(response).unwrap_err();
        assert!(err.to_string().contains("MAX_TOKENS"));
    }
}
