//! Sub-configuration structs with defaults matching the provider wire contracts.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,

    /// Port to listen on
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Upload limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum accepted image size in megabytes
    pub max_upload_mb: u64,

    /// Maximum multipart body size in megabytes (image plus form overhead)
    pub form_limit_mb: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_upload_mb: 5,
            form_limit_mb: 6,
        }
    }
}

impl LimitsConfig {
    /// Largest limit accepted by validation, in megabytes.
    pub const MAX_LIMIT_MB: u64 = 1024;

    pub fn max_upload_bytes(&self) -> usize {
        mb_to_bytes(self.max_upload_mb)
    }

    pub fn form_limit_bytes(&self) -> usize {
        mb_to_bytes(self.form_limit_mb)
    }
}

fn mb_to_bytes(mb: u64) -> usize {
    usize::try_from(mb.saturating_mul(1024 * 1024)).unwrap_or(usize::MAX)
}

/// Location of the `KEY=VALUE` credentials file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvConfig {
    /// Path to the env file (supports `~`)
    pub file: PathBuf,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from(".env"),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: pretty or json
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// Provider endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ProvidersConfig {
    /// OpenAI configuration
    pub openai: OpenAiConfig,

    /// Anthropic configuration
    pub anthropic: AnthropicConfig,
}

/// OpenAI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAiConfig {
    /// Completions endpoint
    pub endpoint: String,

    /// Model name
    pub model: String,

    /// Maximum tokens to generate
    pub max_tokens: u32,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1/completions".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            max_tokens: 300,
        }
    }
}

/// Anthropic configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnthropicConfig {
    /// Messages endpoint
    pub endpoint: String,

    /// Model name
    pub model: String,

    /// Maximum tokens to generate
    pub max_tokens: u32,

    /// Value of the `anthropic-version` header
    pub api_version: String,
}

impl Default for AnthropicConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.anthropic.com/v1/messages".to_string(),
            model: "claude-3-opus-20240229".to_string(),
            max_tokens: 300,
            api_version: "2023-06-01".to_string(),
        }
    }
}
