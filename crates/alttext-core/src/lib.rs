//! Alttext Core - alt text generation through vision LLM providers.
//!
//! Takes a base64-encoded image, sends it to one provider (OpenAI or
//! Anthropic) together with a fixed prompt, and returns the provider's first
//! result unmodified.
//!
//! # Architecture
//!
//! ```text
//! Upload → base64 → Generator (OpenAI | Anthropic) → raw text → caller renders
//! ```
//!
//! Credentials are resolved by the caller and passed in explicitly; the
//! generator never reads the environment.
//!
//! # Usage
//!
//! ```rust,ignore
//! use alttext_core::{Config, Credentials, EnvFile, Generator, Provider};
//!
//! #[tokio::main]
//! async fn main() -> alttext_core::Result<()> {
//!     let config = Config::load()?;
//!     let generator = Generator::new(config.providers.clone());
//!     let credentials = Credentials::resolve(EnvFile::new(config.env_file()).load()?);
//!
//!     let result = generator
//!         .generate_with(&credentials, Provider::Anthropic, &image_base64)
//!         .await?;
//!     for option in result.options() {
//!         println!("{option}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod credentials;
pub mod envfile;
pub mod error;
pub mod llm;

// Re-exports for convenient access
pub use config::Config;
pub use credentials::Credentials;
pub use envfile::EnvFile;
pub use error::{AltTextError, ConfigError, ProviderError, Result};
pub use llm::{GenerationRequest, GenerationResult, Generator, Provider};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
