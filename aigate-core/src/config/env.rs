//! Environment variable handling for configuration
//!
//! Two concerns live here: `${VAR}` interpolation inside loaded config
//! files, and building a whole configuration from process environment
//! variables.

use super::error::ConfigError;
use super::schema::{GatewayConfig, ProviderSettings};
use super::secrets::SecretString;
use crate::providers::ProviderId;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static ENV_VAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("valid env var pattern"));

/// Environment variable naming the active provider
pub const PROVIDER_ENV_VAR: &str = "AI_PROVIDER";

/// Interpolate `${VAR}` references in the string fields of a loaded config.
///
/// An unresolved reference in an `api_key` leaves that credential absent so
/// inactive providers never require one. Anywhere else it is an error.
pub fn interpolate_config_env_vars<F>(config: &mut GatewayConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    for id in ProviderId::ALL {
        let settings = config.providers.get_mut(id);

        if let Some(api_key) = settings.api_key.take() {
            settings.api_key = resolve_secret(api_key.expose_secret(), &lookup).map(SecretString::new);
            if settings.api_key.is_none() {
                debug!("Credential placeholder for {} is unresolved; leaving it unset", id);
            }
        }

        for field in [
            &mut settings.model,
            &mut settings.vision_model,
            &mut settings.base_url,
        ] {
            if let Some(value) = field.as_mut() {
                *value = interpolate_value(value, &lookup)?;
            }
        }
    }

    Ok(())
}

/// Interpolate every reference in a value, failing on the first missing one
pub fn interpolate_value<F>(value: &str, lookup: F) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut result = value.to_string();

    for cap in ENV_VAR_PATTERN.captures_iter(value) {
        let var_name = &cap[1];
        match lookup(var_name) {
            Some(env_value) => result = result.replace(&cap[0], &env_value),
            None => {
                return Err(ConfigError::EnvVarNotFound {
                    var: var_name.to_string(),
                })
            }
        }
    }

    Ok(result)
}

/// Interpolate a secret; any missing reference makes the secret absent
fn resolve_secret<F>(value: &str, lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    interpolate_value(value, lookup)
        .ok()
        .filter(|resolved| !resolved.trim().is_empty())
}

/// Build a configuration from environment variables.
///
/// Reads `AI_PROVIDER` and, for each provider prefix `GEMINI`, `OPENAI` and
/// `ANTHROPIC`: `<P>_API_KEY`, `<P>_MODEL`, `<P>_VISION_MODEL`, `<P>_BASE_URL`.
pub fn config_from_env<F>(lookup: F) -> GatewayConfig
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |name: String| lookup(&name).filter(|v| !v.trim().is_empty());

    let mut config = GatewayConfig::default();
    if let Some(provider) = non_empty(PROVIDER_ENV_VAR.to_string()) {
        config.provider = provider;
    }

    for id in ProviderId::ALL {
        let prefix = id.env_prefix();
        let current = config.providers.get(id).clone();
        *config.providers.get_mut(id) = ProviderSettings {
            api_key: non_empty(format!("{}_API_KEY", prefix)).map(SecretString::new),
            model: non_empty(format!("{}_MODEL", prefix)),
            vision_model: non_empty(format!("{}_VISION_MODEL", prefix)),
            base_url: non_empty(format!("{}_BASE_URL", prefix)),
            ..current
        };
    }

    config
}

/// Read a variable from the process environment
pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_interpolate_value() {
        let lookup = vars(&[("HOST", "localhost"), ("PORT", "8080")]);
        let result = interpolate_value("http://${HOST}:${PORT}/v1", lookup).unwrap();
        assert_eq!(result, "http://localhost:8080/v1");
    }

    #[test]
    fn test_missing_env_var() {
        let result = interpolate_value("${MISSING_VAR}", vars(&[]));

        if let Err(ConfigError::EnvVarNotFound { var }) = result {
            assert_eq!(var, "MISSING_VAR");
        } else {
            panic!("Expected EnvVarNotFound error");
        }
    }

    #[test]
    fn test_unresolved_api_key_becomes_absent() {
        let mut config = GatewayConfig::default();
        config.providers.openai.api_key = Some(SecretString::new("${OPENAI_API_KEY}"));
        config.providers.gemini.api_key = Some(SecretString::new("${GEMINI_API_KEY}"));

        interpolate_config_env_vars(&mut config, vars(&[("GEMINI_API_KEY", "g-key")])).unwrap();

        assert!(config.providers.openai.api_key.is_none());
        assert_eq!(
            config.providers.gemini.api_key.unwrap().expose_secret(),
            "g-key"
        );
    }

    #[test]
    fn test_unresolved_base_url_is_error() {
        let mut config = GatewayConfig::default();
        config.providers.anthropic.base_url = Some("${PROXY_URL}/v1".to_string());

        let err = interpolate_config_env_vars(&mut config, vars(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::EnvVarNotFound { var } if var == "PROXY_URL"));
    }

    #[test]
    fn test_config_from_env() {
        let lookup = vars(&[
            ("AI_PROVIDER", "anthropic"),
            ("ANTHROPIC_API_KEY", "a-key"),
            ("ANTHROPIC_MODEL", "claude-3-haiku-20240307"),
            ("OPENAI_API_KEY", ""),
        ]);
        let config = config_from_env(lookup);

        assert_eq!(config.provider, "anthropic");
        assert_eq!(
            config.providers.anthropic.model.as_deref(),
            Some("claude-3-haiku-20240307")
        );
        assert!(config.providers.anthropic.credential().is_some());
        assert!(config.providers.openai.api_key.is_none());
        assert!(config.providers.gemini.api_key.is_none());
    }

    #[test]
    fn test_config_from_env_defaults_to_gemini() {
        let config = config_from_env(vars(&[]));
        assert_eq!(config.provider, "gemini");
    }
}
