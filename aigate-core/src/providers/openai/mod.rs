//! OpenAI adapter
//!
//! This module provides an adapter for the OpenAI chat completions API,
//! translating between the gateway's protocol and OpenAI's specific format.

mod client;
pub mod converter;
pub mod types;

pub use client::OpenAIAdapter;
pub use types::{OpenAIRequest, OpenAIResponse};
