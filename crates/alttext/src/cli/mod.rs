//! Command implementations.

pub mod config;
pub mod generate;
pub mod serve;

use alttext_core::{Config, ConfigError, Credentials, EnvFile, Provider};
use clap::Args;
use std::path::Path;

/// Provider selection; exactly one flag is required.
#[derive(Args, Debug, Clone, Copy)]
#[group(required = true, multiple = false)]
pub struct ProviderArgs {
    /// Use the OpenAI API
    #[arg(long)]
    pub openai: bool,

    /// Use the Anthropic API
    #[arg(long)]
    pub anthropic: bool,
}

impl ProviderArgs {
    pub fn provider(&self) -> Provider {
        if self.openai {
            Provider::OpenAi
        } else {
            Provider::Anthropic
        }
    }
}

/// Load config from an explicit path, or from the default location.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

/// Resolve credentials from the process environment and the env file.
pub fn load_credentials(env_file: &EnvFile) -> Result<Credentials, ConfigError> {
    tracing::info!("Loading environment variables from {}", env_file.path().display());
    let entries = env_file.load()?;
    Ok(Credentials::resolve(entries))
}
