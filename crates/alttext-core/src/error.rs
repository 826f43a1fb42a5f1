//! Error types for alt text generation.
//!
//! Provider failures are classified so the web layer can decide how to
//! surface them; configuration errors carry the offending file or field.

use std::path::PathBuf;
use thiserror::Error;

use crate::llm::Provider;

/// Top-level error type for alttext operations.
#[derive(Error, Debug)]
pub enum AltTextError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Provider call failed
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),

    /// The env file could not be read or written
    #[error("Env file error for {path}: {message}")]
    EnvFile { path: PathBuf, message: String },
}

/// Classified failure of a single generation call.
///
/// Every variant is terminal for the call. Nothing is retried internally.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// No API key available for the provider
    #[error("{} API key is not configured", .0.label())]
    MissingCredential(Provider),

    /// The image payload is not valid base64
    #[error("Failed to decode base64 image: {0}")]
    InvalidImageEncoding(#[from] base64::DecodeError),

    /// Network or connection failure
    #[error("{provider} request failed: {source}")]
    Transport {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// Response body was not the expected JSON
    #[error("Failed to parse {provider} response: {source}")]
    MalformedResponse {
        provider: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Provider returned a structured error payload
    #[error("API error: {0}")]
    ApiError(String),

    /// Provider returned zero results
    #[error("No response from {0}")]
    NoContent(&'static str),
}

impl ProviderError {
    /// Short message safe to show to an end user.
    pub fn user_message(&self) -> &'static str {
        let detail = self.to_string();
        if detail.contains("image exceeds 5 MB maximum") {
            "Image size exceeds the 5MB limit. Please choose a smaller image."
        } else if detail.contains("invalid_request_error") {
            "Invalid request. Please check your image and try again."
        } else {
            "Failed to generate alt text. Please try again."
        }
    }
}

/// Convenience type alias for alttext results.
pub type Result<T> = std::result::Result<T, AltTextError>;
