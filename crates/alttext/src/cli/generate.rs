//! The `alttext generate` command: describe one image and print the result.

use super::ProviderArgs;
use alttext_core::{Config, EnvFile, Generator};
use anyhow::Context;
use base64::Engine;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the `generate` command.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Image file to describe
    pub image: PathBuf,

    #[command(flatten)]
    pub provider: ProviderArgs,
}

/// Execute the generate command.
pub async fn execute(args: GenerateArgs, config: Config) -> anyhow::Result<()> {
    let provider = args.provider.provider();
    let credentials = super::load_credentials(&EnvFile::new(config.env_file()))?;
    if !credentials.has(provider) {
        anyhow::bail!(
            "{} is not set. Export it or add it to {}",
            provider.env_var(),
            config.env_file().display()
        );
    }

    let bytes = std::fs::read(&args.image)
        .with_context(|| format!("Failed to read image: {}", args.image.display()))?;
    let max_bytes = config.limits.max_upload_bytes();
    if bytes.len() > max_bytes {
        anyhow::bail!(
            "{} is {} bytes, over the {}MB limit",
            args.image.display(),
            bytes.len(),
            config.limits.max_upload_mb
        );
    }

    let encoded = base64::engine::general_purpose::STANDARD.encode(&bytes);
    tracing::info!(
        "Generating alt text for {} with {}",
        args.image.display(),
        provider.label()
    );

    let generator = Generator::new(config.providers.clone());
    let result = generator
        .generate_with(&credentials, provider, &encoded)
        .await?;

    println!("{}", result.raw_text);
    Ok(())
}
