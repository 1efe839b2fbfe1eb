//! Protocol module for gateway request values
//!
//! This module defines the provider-agnostic inputs accepted by the gateway.
//! These structures are:
//! - Created per call and never persisted
//! - Free of any backend-specific shape
//! - Serializable, so callers can store conversations themselves

pub mod attachment;
pub mod types;

pub use attachment::ImageAttachment;
pub use types::{split_conversation, Message, MessageRole, PromptRequest};
