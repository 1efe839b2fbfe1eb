//! Configuration schema structures with serde support

use super::error::{ValidationError, ValidationErrorKind};
use super::secrets::{SafeLogging, SecretString};
use crate::protocol::MessageRole;
use crate::providers::ProviderId;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Schema version understood by this crate
pub const CONFIG_VERSION: &str = "0.1";

/// Root configuration structure for the gateway
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Schema version (required - no default)
    pub version: String,

    /// Identifier of the active provider
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Per-provider settings
    #[serde(default)]
    pub providers: ProvidersConfig,

    /// Outbound connection settings
    #[serde(default)]
    pub connection: ConnectionConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION.to_string(),
            provider: default_provider(),
            providers: ProvidersConfig::default(),
            connection: ConnectionConfig::default(),
        }
    }
}

/// Settings for every known provider; only the active one is ever used
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub gemini: ProviderSettings,

    #[serde(default)]
    pub openai: ProviderSettings,

    #[serde(default)]
    pub anthropic: ProviderSettings,
}

impl ProvidersConfig {
    /// Settings for a provider
    pub fn get(&self, id: ProviderId) -> &ProviderSettings {
        match id {
            ProviderId::Gemini => &self.gemini,
            ProviderId::OpenAI => &self.openai,
            ProviderId::Anthropic => &self.anthropic,
        }
    }

    /// Mutable settings for a provider
    pub fn get_mut(&mut self, id: ProviderId) -> &mut ProviderSettings {
        match id {
            ProviderId::Gemini => &mut self.gemini,
            ProviderId::OpenAI => &mut self.openai,
            ProviderId::Anthropic => &mut self.anthropic,
        }
    }
}

/// Settings for one provider. Every field is optional; adapters fill in
/// their own defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderSettings {
    /// API key (supports environment variable interpolation)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<SecretString>,

    /// Model used for text generation and chat
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Model used for image requests; falls back to `model`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vision_model: Option<String>,

    /// Base URL for the provider API
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Wire labels for conversation roles
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_labels: Option<RoleLabels>,

    /// Upper bound on generated tokens, for backends that require one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl ProviderSettings {
    /// The credential, if present and non-blank
    pub fn credential(&self) -> Option<&SecretString> {
        self.api_key.as_ref().filter(|key| !key.is_empty())
    }

    /// Set the API key
    pub fn with_api_key(mut self, api_key: impl Into<SecretString>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the text model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the role labels
    pub fn with_role_labels(mut self, labels: RoleLabels) -> Self {
        self.role_labels = Some(labels);
        self
    }
}

impl SafeLogging for ProviderSettings {
    fn safe_for_logging(&self) -> String {
        format!(
            "api_key={}, model={}, base_url={}",
            self.api_key
                .as_ref()
                .map(|k| k.partial_redact())
                .unwrap_or_else(|| "[UNSET]".to_string()),
            self.model.as_deref().unwrap_or("[default]"),
            self.base_url.as_deref().unwrap_or("[default]"),
        )
    }
}

/// Mapping from conversation roles to a backend's role vocabulary
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RoleLabels {
    pub user: String,
    pub assistant: String,
}

impl RoleLabels {
    pub fn new(user: impl Into<String>, assistant: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            assistant: assistant.into(),
        }
    }

    /// Wire label for a role
    pub fn label(&self, role: MessageRole) -> &str {
        match role {
            MessageRole::User => &self.user,
            MessageRole::Assistant => &self.assistant,
        }
    }
}

/// Connection configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ConnectionConfig {
    /// Connection timeout in milliseconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_ms: u64,

    /// Request timeout in milliseconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,

    /// Maximum idle connections per host
    #[serde(default = "default_max_idle")]
    pub max_idle_per_host: usize,

    /// Keep-alive timeout in seconds
    #[serde(default = "default_keepalive")]
    pub keepalive_secs: u64,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            connect_timeout_ms: default_connect_timeout(),
            request_timeout_ms: default_request_timeout(),
            max_idle_per_host: default_max_idle(),
            keepalive_secs: default_keepalive(),
        }
    }
}

impl ConnectionConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn keepalive(&self) -> Duration {
        Duration::from_secs(self.keepalive_secs)
    }
}

// Default value functions for serde
fn default_provider() -> String { ProviderId::Gemini.as_str().to_string() }
fn default_connect_timeout() -> u64 { 10000 }
fn default_request_timeout() -> u64 { 60000 }
fn default_max_idle() -> usize { 10 }
fn default_keepalive() -> u64 { 90 }

impl GatewayConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.version.is_empty() {
            return Err(ValidationError::required("version"));
        }

        if self.version != CONFIG_VERSION {
            return Err(ValidationError::new(
                "version",
                ValidationErrorKind::InvalidVersion {
                    expected: CONFIG_VERSION.to_string(),
                    actual: self.version.clone(),
                },
            ));
        }

        // Unknown ids are reported by the provider registry, not here
        if self.provider.trim().is_empty() {
            return Err(ValidationError::required("provider"));
        }

        for id in ProviderId::ALL {
            self.providers
                .get(id)
                .validate(&format!("providers.{}", id))?;
        }

        Ok(())
    }
}

impl ProviderSettings {
    /// Validate provider settings
    pub fn validate(&self, path: &str) -> Result<(), ValidationError> {
        if let Some(base_url) = &self.base_url {
            match url::Url::parse(base_url) {
                Ok(url) => {
                    if url.scheme() != "http" && url.scheme() != "https" {
                        return Err(ValidationError::new(
                            format!("{}.base_url", path),
                            ValidationErrorKind::InvalidUrl {
                                message: format!(
                                    "URL scheme must be http or https, got: {}",
                                    url.scheme()
                                ),
                            },
                        ));
                    }
                }
                Err(e) => {
                    return Err(ValidationError::new(
                        format!("{}.base_url", path),
                        ValidationErrorKind::InvalidUrl {
                            message: e.to_string(),
                        },
                    ));
                }
            }
        }

        if matches!(self.model.as_deref(), Some(m) if m.trim().is_empty()) {
            return Err(ValidationError::required(format!("{}.model", path)));
        }

        if matches!(self.vision_model.as_deref(), Some(m) if m.trim().is_empty()) {
            return Err(ValidationError::required(format!("{}.vision_model", path)));
        }

        if self.max_tokens == Some(0) {
            return Err(ValidationError::out_of_range(
                format!("{}.max_tokens", path),
                "Must be greater than 0",
            ));
        }

        Ok(())
    }
}
