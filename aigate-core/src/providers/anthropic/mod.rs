//! Anthropic adapter
//!
//! Implements the adapter for Anthropic's Messages API. Handles the
//! differences in auth headers, the mandatory `max_tokens`, and the typed
//! content blocks used for images.

mod client;
pub mod converter;
pub mod types;

pub use client::AnthropicAdapter;
pub use types::{AnthropicRequest, AnthropicResponse};
