//! Configuration module for the gateway
//!
//! Configuration is read once, validated, and then treated as immutable. It
//! can come from a YAML or JSON file (with `${VAR}` interpolation) or
//! directly from process environment variables.

mod env;
mod error;
mod schema;
mod secrets;
mod validator;

pub use env::{config_from_env, interpolate_value, PROVIDER_ENV_VAR};
pub use error::{ConfigError, ConfigResult, ValidationError, ValidationErrorKind};
pub use schema::{
    ConnectionConfig, GatewayConfig, ProviderSettings, ProvidersConfig, RoleLabels, CONFIG_VERSION,
};
pub use secrets::{SafeLogging, SecretString};
pub use validator::ConfigValidator;

use std::fs;
use std::path::Path;

/// Load a configuration from a YAML file
pub fn load_from_yaml<P: AsRef<Path>>(path: P) -> ConfigResult<GatewayConfig> {
    let path = path.as_ref();
    let content = read_config(path)?;

    let config: GatewayConfig =
        serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_string_lossy().to_string(),
            line: e.location().map(|l| l.line()),
            column: e.location().map(|l| l.column()),
            message: e.to_string(),
        })?;

    finish(config)
}

/// Load a configuration from a JSON file
pub fn load_from_json<P: AsRef<Path>>(path: P) -> ConfigResult<GatewayConfig> {
    let path = path.as_ref();
    let content = read_config(path)?;

    let config: GatewayConfig =
        serde_json::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_string_lossy().to_string(),
            line: Some(e.line()),
            column: Some(e.column()),
            message: e.to_string(),
        })?;

    finish(config)
}

impl GatewayConfig {
    /// Build and validate a configuration from process environment variables
    pub fn from_env() -> ConfigResult<Self> {
        let config = config_from_env(env::process_env);
        ConfigValidator::new().validate(&config)?;
        Ok(config)
    }
}

fn read_config(path: &Path) -> ConfigResult<String> {
    fs::read_to_string(path).map_err(|e| ConfigError::IoError {
        path: path.to_string_lossy().to_string(),
        source: e,
    })
}

fn finish(mut config: GatewayConfig) -> ConfigResult<GatewayConfig> {
    env::interpolate_config_env_vars(&mut config, env::process_env)?;

    ConfigValidator::new().validate(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_yaml() {
        let yaml = r#"
version: "0.1"
provider: openai
providers:
  gemini:
    role_labels:
      user: user
      assistant: model
  openai:
    api_key: sk-test
    model: gpt-4o
    vision_model: gpt-4o
  anthropic:
    max_tokens: 1024
connection:
  request_timeout_ms: 30000
"#;
        let config: GatewayConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.provider, "openai");
        assert_eq!(config.providers.openai.model.as_deref(), Some("gpt-4o"));
        assert_eq!(config.providers.anthropic.max_tokens, Some(1024));
        assert_eq!(config.connection.request_timeout_ms, 30000);
        assert_eq!(config.connection.connect_timeout_ms, 10000);
    }
}
