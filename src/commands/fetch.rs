//! Fetch command handler: download the full schema and export it.

use std::io::{self, IsTerminal};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use indicatif::{ProgressBar, ProgressStyle};
use item_schema::SchemaClient;
use tracing::info;

use crate::app_config::{API_KEY_ENV, EffectiveSettings};

pub async fn run_fetch_command(
    settings: EffectiveSettings,
    filename: &str,
    show_spinner: bool,
) -> Result<()> {
    let Some(api_key) = settings.api_key else {
        bail!(
            "No Steam Web API key configured. Pass --api-key, set {API_KEY_ENV}, or add api_key to the config file"
        );
    };

    let client = SchemaClient::with_config(api_key, settings.options, settings.client)
        .context("Failed to build schema client")?;

    let spinner = start_spinner(
        show_spinner && io::stderr().is_terminal(),
        format!(
            "Fetching item schema ({} / {})...",
            client.language(),
            client.version()
        ),
    );
    let fetched = client.get_item_schema().await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    let schema = fetched.context("Failed to fetch the item schema")?;

    let path = schema
        .export(&settings.output_dir, filename)
        .await
        .with_context(|| {
            format!(
                "Failed to export schema to '{}'",
                settings.output_dir.display()
            )
        })?;

    info!(
        items = schema.items().len(),
        attributes = schema.attributes().len(),
        effects = schema.particle_effects().len(),
        "Item schema fetched"
    );
    println!("{}", path.display());
    Ok(())
}

fn start_spinner(enabled: bool, message: String) -> Option<ProgressBar> {
    if !enabled {
        return None;
    }
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    Some(spinner)
}
