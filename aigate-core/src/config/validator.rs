//! Configuration validation utilities

use super::error::ValidationError;
use super::schema::GatewayConfig;
use crate::providers::ProviderId;
use tracing::warn;

/// Configuration validator with additional validation rules
#[derive(Debug, Default)]
pub struct ConfigValidator;

impl ConfigValidator {
    /// Create a new validator
    pub fn new() -> Self {
        Self
    }

    /// Validate a configuration with extended rules
    pub fn validate(&self, config: &GatewayConfig) -> Result<(), ValidationError> {
        // First run the built-in validation
        config.validate()?;

        self.validate_role_labels(config)?;
        self.validate_connection(config)?;
        self.check_active_credential(config);

        Ok(())
    }

    fn validate_role_labels(&self, config: &GatewayConfig) -> Result<(), ValidationError> {
        for id in ProviderId::ALL {
            let Some(labels) = &config.providers.get(id).role_labels else {
                continue;
            };

            for (field, value) in [("user", &labels.user), ("assistant", &labels.assistant)] {
                if value.trim().is_empty() {
                    return Err(ValidationError::required(format!(
                        "providers.{}.role_labels.{}",
                        id, field
                    ))
                    .with_context(format!("got {:?}", value)));
                }
            }
        }

        Ok(())
    }

    fn validate_connection(&self, config: &GatewayConfig) -> Result<(), ValidationError> {
        let connection = &config.connection;

        if connection.connect_timeout_ms == 0 {
            return Err(ValidationError::out_of_range(
                "connection.connect_timeout_ms",
                "Must be greater than 0",
            ));
        }

        if connection.request_timeout_ms == 0 {
            return Err(ValidationError::out_of_range(
                "connection.request_timeout_ms",
                "Must be greater than 0",
            ));
        }

        if connection.request_timeout_ms < connection.connect_timeout_ms {
            return Err(ValidationError::out_of_range(
                "connection.request_timeout_ms",
                "Must be >= connect_timeout_ms",
            )
            .with_context(format!(
                "request_timeout_ms={}, connect_timeout_ms={}",
                connection.request_timeout_ms, connection.connect_timeout_ms
            )));
        }

        Ok(())
    }

    /// A missing credential is reported at call time; here it is only logged
    fn check_active_credential(&self, config: &GatewayConfig) {
        if let Ok(id) = config.provider.parse::<ProviderId>() {
            if config.providers.get(id).credential().is_none() {
                warn!("No API key configured for active provider {}", id);
            }
        }
    }
}
