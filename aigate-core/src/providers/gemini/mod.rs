//! Google Gemini adapter
//!
//! This module provides an adapter for the Gemini `generateContent` API,
//! translating between the gateway's protocol and Gemini's content/parts
//! format.

mod client;
pub mod converter;
pub mod types;

pub use client::GeminiAdapter;
pub use types::{GeminiRequest, GeminiResponse};
