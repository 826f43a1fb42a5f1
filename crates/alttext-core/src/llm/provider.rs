//! Provider selection and the generation entry point.
//!
//! The set of providers is closed, so selection is a plain enum and each
//! variant's module owns its payload building and response parsing.

use crate::config::ProvidersConfig;
use crate::credentials::Credentials;
use crate::error::{ConfigError, ProviderError};
use std::fmt;
use std::str::FromStr;
use std::time::Instant;

/// An alt-text-generating HTTP API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    OpenAi,
    Anthropic,
}

impl Provider {
    pub const ALL: [Provider; 2] = [Provider::OpenAi, Provider::Anthropic];

    /// Identifier used in CLI flags, form fields and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::Anthropic => "anthropic",
        }
    }

    /// Environment variable holding this provider's API key.
    pub fn env_var(&self) -> &'static str {
        match self {
            Provider::OpenAi => "OPEN_AI_API_KEY",
            Provider::Anthropic => "ANTHROPIC_API_KEY",
        }
    }

    /// Human-readable name.
    pub fn label(&self) -> &'static str {
        match self {
            Provider::OpenAi => "OpenAI",
            Provider::Anthropic => "Anthropic",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = ConfigError;

    /// Exact, lowercase identifiers only.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "openai" => Ok(Provider::OpenAi),
            "anthropic" => Ok(Provider::Anthropic),
            other => Err(ConfigError::ValidationError(format!(
                "Unknown provider: {other}"
            ))),
        }
    }
}

/// One image to describe, addressed to one provider.
#[derive(Clone)]
pub struct GenerationRequest {
    pub provider: Provider,
    /// Standard (padded) base64 of the raw image bytes
    pub image_base64: String,
    pub api_key: String,
}

impl fmt::Debug for GenerationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationRequest")
            .field("provider", &self.provider)
            .field("image_base64_len", &self.image_base64.len())
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Text returned by a provider, passed through unmodified.
///
/// By prompt convention this is a numbered, newline-delimited list of
/// alternative descriptions, but nothing here enforces that shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    pub raw_text: String,
}

impl GenerationResult {
    /// Non-empty trimmed lines of the raw text, in order.
    pub fn options(&self) -> impl Iterator<Item = &str> {
        self.raw_text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
    }
}

/// Issues generation calls. Holds no per-request state, so one instance is
/// shared across concurrent requests.
#[derive(Debug, Clone)]
pub struct Generator {
    client: reqwest::Client,
    providers: ProvidersConfig,
}

impl Generator {
    pub fn new(providers: ProvidersConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            providers,
        }
    }

    /// Generate alt text for one image.
    ///
    /// Performs at most one outbound request. Fails before touching the
    /// network if the key is empty or (for Anthropic) the image is not valid
    /// base64. The provider's first result is returned verbatim.
    pub async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResult, ProviderError> {
        if request.api_key.trim().is_empty() {
            tracing::warn!(provider = %request.provider, "API key is not configured");
            return Err(ProviderError::MissingCredential(request.provider));
        }

        let start = Instant::now();
        let raw_text = match request.provider {
            Provider::OpenAi => {
                super::openai::generate(
                    &self.client,
                    &self.providers.openai,
                    &request.api_key,
                    &request.image_base64,
                )
                .await?
            }
            Provider::Anthropic => {
                super::anthropic::generate(
                    &self.client,
                    &self.providers.anthropic,
                    &request.api_key,
                    &request.image_base64,
                )
                .await?
            }
        };

        tracing::info!(
            provider = %request.provider,
            latency_ms = start.elapsed().as_millis() as u64,
            "Generated alt text"
        );
        Ok(GenerationResult { raw_text })
    }

    /// Generate using the key held in `credentials` for `provider`.
    pub async fn generate_with(
        &self,
        credentials: &Credentials,
        provider: Provider,
        image_base64: &str,
    ) -> Result<GenerationResult, ProviderError> {
        let api_key = credentials
            .get(provider)
            .ok_or(ProviderError::MissingCredential(provider))?;

        let request = GenerationRequest {
            provider,
            image_base64: image_base64.to_string(),
            api_key: api_key.to_string(),
        };
        self.generate(&request).await
    }
}
