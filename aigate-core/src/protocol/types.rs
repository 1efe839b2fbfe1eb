//! Core protocol types for gateway calls
//!
//! These are the transient, provider-agnostic values a caller hands to the
//! gateway. Every value is created per call and dropped once the reply (or
//! error) is returned; nothing here is persisted.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of a message in the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Turn written by the end user
    User,
    /// Turn produced by the model
    Assistant,
}

impl MessageRole {
    /// Canonical lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single turn of a conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message sender
    pub role: MessageRole,

    /// Text content of the turn
    pub content: String,
}

impl Message {
    /// Create a message with an explicit role
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }
}

/// Split a conversation into its prior history and the newest turn.
///
/// Returns `None` for an empty conversation. The history slice keeps the
/// caller's order.
pub fn split_conversation(conversation: &[Message]) -> Option<(&[Message], &Message)> {
    conversation
        .split_last()
        .map(|(last, history)| (history, last))
}

/// Single-shot prompt with optional leading context
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptRequest {
    /// The prompt text
    pub prompt: String,

    /// Optional context placed before the prompt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl PromptRequest {
    /// Create a request without context
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            context: None,
        }
    }

    /// Attach context. An empty string clears it.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        let context = context.into();
        self.context = if context.is_empty() {
            None
        } else {
            Some(context)
        };
        self
    }

    /// The text actually transmitted: context and prompt joined by a blank line
    pub fn full_prompt(&self) -> String {
        match self.context.as_deref() {
            Some(context) if !context.is_empty() => format!("{}\n\n{}", context, self.prompt),
            _ => self.prompt.clone(),
        }
    }
}
