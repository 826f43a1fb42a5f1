//! Alttext - generate alt text options for images with a vision LLM.
//!
//! Runs a small web app where an uploaded image is sent to OpenAI or
//! Anthropic and the returned descriptions are shown as selectable alt text.
//! The same generation is available as a one-shot command.
//!
//! # Usage
//!
//! ```bash
//! # Start the web app on :8080 using Anthropic
//! alttext serve --anthropic
//!
//! # Describe a single image from the command line
//! alttext generate photo.jpg --openai
//!
//! # View configuration
//! alttext config show
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;
mod logging;
mod web;

/// Alttext - alt text options for images, generated by a vision LLM.
#[derive(Parser, Debug)]
#[command(name = "alttext")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    /// Path to a config file (defaults to the platform config directory)
    #[arg(long, global = true, env = "ALTTEXT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the web app
    Serve(cli::serve::ServeArgs),

    /// Generate alt text for a single image and print it
    Generate(cli::generate::GenerateArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so config warnings go through eprintln.
    let config = match cli::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `alttext config path`."
            );
            alttext_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Alttext v{}", alttext_core::VERSION);

    match cli.command {
        Commands::Serve(args) => cli::serve::execute(args, config).await,
        Commands::Generate(args) => cli::generate::execute(args, config).await,
        Commands::Config(args) => cli::config::execute(args, cli.config).await,
    }
}
