//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::{Config, LimitsConfig};

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "server.port must be > 0".into(),
            ));
        }
        if self.limits.max_upload_mb == 0 {
            return Err(ConfigError::ValidationError(
                "limits.max_upload_mb must be > 0".into(),
            ));
        }
        if self.limits.form_limit_mb > LimitsConfig::MAX_LIMIT_MB {
            return Err(ConfigError::ValidationError(format!(
                "limits.form_limit_mb must be <= {}",
                LimitsConfig::MAX_LIMIT_MB
            )));
        }
        if self.limits.form_limit_mb < self.limits.max_upload_mb {
            return Err(ConfigError::ValidationError(
                "limits.form_limit_mb must be >= limits.max_upload_mb".into(),
            ));
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::ValidationError(format!(
                "logging.format must be \"pretty\" or \"json\", got \"{}\"",
                self.logging.format
            )));
        }

        let openai = &self.providers.openai;
        let anthropic = &self.providers.anthropic;
        for (field, value) in [
            ("providers.openai.endpoint", &openai.endpoint),
            ("providers.openai.model", &openai.model),
            ("providers.anthropic.endpoint", &anthropic.endpoint),
            ("providers.anthropic.model", &anthropic.model),
            ("providers.anthropic.api_version", &anthropic.api_version),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "{field} must not be empty"
                )));
            }
        }
        if openai.max_tokens == 0 || anthropic.max_tokens == 0 {
            return Err(ConfigError::ValidationError(
                "providers.*.max_tokens must be > 0".into(),
            ));
        }
        Ok(())
    }
}
