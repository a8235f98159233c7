//! Config command handlers: show effective configuration.

use anyhow::Result;

use crate::app_config::{
    API_KEY_ENV, CliOverrides, LoadedConfig, api_key_from_env, redact_api_key, resolve_settings,
};

pub fn run_config_show_command(overrides: CliOverrides, loaded_config: &LoadedConfig) -> Result<()> {
    let effective = resolve_settings(overrides, api_key_from_env(), loaded_config.config.as_ref());

    let resolved_path = loaded_config.path.as_ref().map_or_else(
        || "<unresolved>".to_string(),
        |path| path.display().to_string(),
    );
    println!("config_path = {resolved_path}");
    println!(
        "config_file = {}",
        if loaded_config.loaded_from_file {
            "loaded"
        } else {
            "not found (using defaults)"
        }
    );
    println!(
        "api_key = {}",
        effective
            .api_key
            .as_deref()
            .map_or_else(|| format!("<unset> (set {API_KEY_ENV})"), redact_api_key)
    );
    println!("version = {}", effective.options.version);
    println!("language = {}", effective.options.language);
    println!("base_url = {}", effective.client.base_url);
    println!("output_dir = {}", effective.output_dir.display());
    println!(
        "connect_timeout_secs = {}",
        effective.client.timeouts.connect_secs
    );
    println!("read_timeout_secs = {}", effective.client.timeouts.read_secs);
    println!(
        "max_pages = {}",
        effective
            .client
            .max_pages
            .map_or_else(|| "unbounded".to_string(), |pages| pages.to_string())
    );

    Ok(())
}
