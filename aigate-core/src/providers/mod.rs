//! Provider abstraction and adapters
//!
//! This module implements the provider layer: a closed set of backend
//! identifiers, the [`ProviderAdapter`] trait every backend implements, the
//! registry that maps an identifier to its adapter, and one adapter per
//! backend wire protocol.

pub mod adapter;
pub mod anthropic;
pub mod error;
pub mod gemini;
pub mod openai;
pub mod registry;

pub use adapter::{AdapterSettings, ProviderAdapter, ProviderDefaults};
pub use error::{ProviderError, ProviderResult};
pub use registry::{resolve_provider, supported_provider_ids};

// Re-export concrete adapters
pub use anthropic::AnthropicAdapter;
pub use gemini::GeminiAdapter;
pub use openai::OpenAIAdapter;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a supported backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    Gemini,
    OpenAI,
    Anthropic,
}

impl ProviderId {
    /// Every supported provider, in registry order
    pub const ALL: [ProviderId; 3] = [ProviderId::Gemini, ProviderId::OpenAI, ProviderId::Anthropic];

    /// Lowercase identifier used in configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Gemini => "gemini",
            ProviderId::OpenAI => "openai",
            ProviderId::Anthropic => "anthropic",
        }
    }

    /// Prefix of this provider's environment variables
    pub fn env_prefix(&self) -> &'static str {
        match self {
            ProviderId::Gemini => "GEMINI",
            ProviderId::OpenAI => "OPENAI",
            ProviderId::Anthropic => "ANTHROPIC",
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ProviderId::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ProviderError::UnsupportedProvider {
                id: s.to_string(),
                supported: ProviderId::ALL.iter().map(|id| id.to_string()).collect(),
            })
    }
}
