//! Configuration file loading and merging with CLI flags.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use item_schema::{ClientConfig, HttpTimeouts, SchemaOptions};

/// Environment variable consulted for the Steam Web API key.
pub const API_KEY_ENV: &str = "STEAM_WEB_API_KEY";

const APP_DIR: &str = "item-schema";
const CONFIG_FILE: &str = "config.toml";

/// Values read from `config.toml`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileConfig {
    pub api_key: Option<String>,
    pub version: Option<String>,
    pub language: Option<String>,
    pub base_url: Option<String>,
    /// Default directory for `fetch` exports.
    pub output_dir: Option<PathBuf>,
    pub connect_timeout_secs: Option<u64>,
    pub read_timeout_secs: Option<u64>,
    /// Upper bound on item pages per fetch.
    pub max_pages: Option<usize>,
}

impl FileConfig {
    /// Validates values against the ranges the CLI accepts.
    pub fn validate(&self) -> Result<()> {
        validate_timeout_secs("connect_timeout_secs", self.connect_timeout_secs)?;
        validate_timeout_secs("read_timeout_secs", self.read_timeout_secs)?;

        if let Some(max_pages) = self.max_pages
            && !(1..=10_000).contains(&max_pages)
        {
            bail!("Invalid config value for `max_pages`: {max_pages}. Expected range: 1..=10000");
        }
        if let Some(base_url) = &self.base_url
            && url::Url::parse(base_url).is_err()
        {
            bail!("Invalid config value for `base_url`: '{base_url}' is not a valid URL");
        }
        for (field, value) in [("version", &self.version), ("language", &self.language)] {
            if value.as_deref().is_some_and(str::is_empty) {
                bail!("Invalid config value for `{field}`: must not be empty");
            }
        }
        Ok(())
    }
}

fn validate_timeout_secs(field: &str, value: Option<u64>) -> Result<()> {
    let Some(value) = value else {
        return Ok(());
    };
    if !(1..=3600).contains(&value) {
        bail!("Invalid config value for `{field}`: {value}. Expected range: 1..=3600");
    }
    Ok(())
}

/// Loaded config metadata.
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    /// Resolved config path if a base directory is known.
    pub path: Option<PathBuf>,
    pub config: Option<FileConfig>,
    pub loaded_from_file: bool,
}

/// Resolves the default config path.
///
/// Priority:
/// 1. `$XDG_CONFIG_HOME/item-schema/config.toml`
/// 2. `$HOME/.config/item-schema/config.toml`
#[must_use]
pub fn resolve_default_config_path() -> Option<PathBuf> {
    if let Some(xdg_config_home) = env_var_non_empty_os("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(xdg_config_home).join(APP_DIR).join(CONFIG_FILE));
    }

    let home = env_var_non_empty_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join(APP_DIR)
            .join(CONFIG_FILE),
    )
}

fn env_var_non_empty_os(name: &str) -> Option<std::ffi::OsString> {
    let value = env::var_os(name)?;
    if value.is_empty() { None } else { Some(value) }
}

/// Loads config from the default path if present.
pub fn load_default_file_config() -> Result<LoadedConfig> {
    let path = resolve_default_config_path();
    let Some(path_ref) = path.as_deref() else {
        return Ok(LoadedConfig::default());
    };

    if !path_ref.exists() {
        return Ok(LoadedConfig {
            path,
            config: None,
            loaded_from_file: false,
        });
    }

    let config = load_file_config(path_ref)?;
    Ok(LoadedConfig {
        path,
        config: Some(config),
        loaded_from_file: true,
    })
}

fn load_file_config(path: &Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    parse_config_str(&raw)
        .with_context(|| format!("Failed to parse config file '{}'", path.display()))
}

fn parse_config_str(raw: &str) -> Result<FileConfig> {
    let mut cfg = FileConfig::default();
    for (line_index, raw_line) in raw.lines().enumerate() {
        let line_number = line_index + 1;
        let line = strip_inline_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }

        let Some((raw_key, raw_value)) = line.split_once('=') else {
            bail!("Invalid config syntax on line {line_number}: expected key = value");
        };

        let key = raw_key.trim();
        let value = raw_value.trim();
        let invalid = || format!("Invalid `{key}` value on line {line_number}");

        match key {
            "api_key" => cfg.api_key = Some(parse_string_literal(value).with_context(invalid)?),
            "version" => cfg.version = Some(parse_string_literal(value).with_context(invalid)?),
            "language" => cfg.language = Some(parse_string_literal(value).with_context(invalid)?),
            "base_url" => cfg.base_url = Some(parse_string_literal(value).with_context(invalid)?),
            "output_dir" => {
                let parsed = parse_string_literal(value).with_context(invalid)?;
                cfg.output_dir = Some(PathBuf::from(parsed));
            }
            "connect_timeout_secs" => {
                cfg.connect_timeout_secs = Some(parse_integer_u64(value).with_context(invalid)?);
            }
            "read_timeout_secs" => {
                cfg.read_timeout_secs = Some(parse_integer_u64(value).with_context(invalid)?);
            }
            "max_pages" => {
                let parsed = parse_integer_u64(value).with_context(invalid)?;
                let pages = usize::try_from(parsed)
                    .map_err(|_| anyhow::anyhow!("max_pages out of range for usize"))?;
                cfg.max_pages = Some(pages);
            }
            unknown => {
                bail!("Unknown configuration key: '{unknown}' on line {line_number}");
            }
        }
    }
    cfg.validate()?;
    Ok(cfg)
}

fn strip_inline_comment(line: &str) -> &str {
    let mut in_string = false;
    for (index, ch) in line.char_indices() {
        match ch {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..index],
            _ => {}
        }
    }
    line
}

fn parse_string_literal(raw_value: &str) -> Result<String> {
    if raw_value.len() < 2 || !raw_value.starts_with('"') || !raw_value.ends_with('"') {
        bail!("Expected double-quoted string");
    }
    Ok(raw_value[1..raw_value.len() - 1].to_string())
}

fn parse_integer_u64(raw_value: &str) -> Result<u64> {
    let token = raw_value.trim();
    if token.is_empty() {
        bail!("Expected integer value");
    }
    let value = token.parse::<i128>()?;
    if value < 0 {
        bail!("Expected non-negative integer");
    }
    u64::try_from(value).map_err(|_| anyhow::anyhow!("Integer value out of range for u64"))
}

// ==================== Effective Settings ====================

/// Flag values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub api_key: Option<String>,
    pub version: Option<String>,
    pub language: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub max_pages: Option<usize>,
}

/// Settings after merging flags, environment, file and defaults.
#[derive(Debug, Clone)]
pub struct EffectiveSettings {
    pub api_key: Option<String>,
    pub options: SchemaOptions,
    pub client: ClientConfig,
    pub output_dir: PathBuf,
}

/// Merges settings with priority flag > environment (API key only) > file > default.
#[must_use]
pub fn resolve_settings(
    overrides: CliOverrides,
    env_api_key: Option<String>,
    file: Option<&FileConfig>,
) -> EffectiveSettings {
    let file = file.cloned().unwrap_or_default();

    let api_key = overrides
        .api_key
        .or(env_api_key)
        .or(file.api_key)
        .filter(|key| !key.is_empty());

    let options = SchemaOptions::new(
        overrides.version.or(file.version).unwrap_or_default(),
        overrides.language.or(file.language).unwrap_or_default(),
    );

    let defaults = HttpTimeouts::default();
    let mut client = ClientConfig::default()
        .with_max_pages(overrides.max_pages.or(file.max_pages))
        .with_timeouts(HttpTimeouts {
            connect_secs: file.connect_timeout_secs.unwrap_or(defaults.connect_secs),
            read_secs: file.read_timeout_secs.unwrap_or(defaults.read_secs),
        });
    if let Some(base_url) = file.base_url {
        client = client.with_base_url(base_url);
    }

    EffectiveSettings {
        api_key,
        options,
        client,
        output_dir: overrides
            .output_dir
            .or(file.output_dir)
            .unwrap_or_else(|| PathBuf::from(".")),
    }
}

/// Reads the API key from the environment, ignoring empty values.
#[must_use]
pub fn api_key_from_env() -> Option<String> {
    env::var(API_KEY_ENV).ok().filter(|key| !key.is_empty())
}

/// Masks all but the last four characters of an API key.
#[must_use]
pub fn redact_api_key(key: &str) -> String {
    let count = key.chars().count();
    if count <= 4 {
        return "****".to_string();
    }
    let tail: String = key.chars().skip(count - 4).collect();
    format!("****{tail}")
}
