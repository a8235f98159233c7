//! CLI entry point for the item-schema tool.

use anyhow::Result;
use clap::Parser;
use tracing::debug;

mod app_config;
mod cli;
mod commands;

use app_config::{CliOverrides, api_key_from_env, load_default_file_config, resolve_settings};
use cli::{Args, Command, ConfigCommand};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!(?args, "CLI arguments parsed");

    let mut overrides = CliOverrides {
        version: args.schema_version.clone(),
        language: args.language.clone(),
        ..CliOverrides::default()
    };

    match &args.command {
        Command::Fetch(fetch) => {
            let loaded_config = load_default_file_config()?;
            overrides.api_key.clone_from(&fetch.api_key);
            overrides.output_dir.clone_from(&fetch.output_dir);
            overrides.max_pages = fetch
                .max_pages
                .map(usize::try_from)
                .transpose()?;
            let settings =
                resolve_settings(overrides, api_key_from_env(), loaded_config.config.as_ref());
            commands::run_fetch_command(settings, &fetch.filename, !args.quiet).await
        }
        Command::Lookup(lookup) => commands::run_lookup_command(lookup).await,
        Command::Quality(quality) => commands::run_quality_command(quality).await,
        Command::Effect(effect) => commands::run_effect_command(effect).await,
        Command::Attribute(attribute) => commands::run_attribute_command(attribute).await,
        Command::Config {
            command: ConfigCommand::Show,
        } => {
            let loaded_config = load_default_file_config()?;
            commands::run_config_show_command(overrides, &loaded_config)
        }
    }
}
