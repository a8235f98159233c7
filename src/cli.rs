//! CLI argument definitions using clap derive macros.

use std::fmt;
use std::path::PathBuf;

use clap::{ArgGroup, Args as ClapArgs, Parser, Subcommand};

/// Fetch, query and snapshot the TF2 item schema.
///
/// Downloads the complete item schema from the Steam Web API, saves it as a
/// JSON snapshot, and answers item, quality, effect and attribute lookups
/// against saved snapshots.
#[derive(Parser, Debug)]
#[command(name = "item-schema")]
#[command(author, version, about)]
pub struct Args {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// ISO 639-1 language code for localized names
    #[arg(long, global = true)]
    pub language: Option<String>,

    /// Steam Web API method version
    #[arg(long = "schema-version", global = true)]
    pub schema_version: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch the full schema and export it as JSON
    Fetch(FetchArgs),
    /// Look up an item by defindex or name in a saved schema
    Lookup(LookupArgs),
    /// Translate between quality ids and names
    Quality(QualityArgs),
    /// Translate between particle effect ids and names
    Effect(EffectArgs),
    /// Show an attribute definition by defindex
    Attribute(AttributeArgs),
    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigCommand {
    /// Print the effective configuration
    Show,
}

#[derive(ClapArgs, Clone)]
pub struct FetchArgs {
    /// Steam Web API key (defaults to STEAM_WEB_API_KEY or the config file)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Directory to write the schema to
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Output file name; `.json` is appended when missing
    #[arg(short, long, default_value = "schema")]
    pub filename: String,

    /// Stop with an error after this many item pages (1-10000)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..=10_000))]
    pub max_pages: Option<u64>,
}

impl fmt::Debug for FetchArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchArgs")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("output_dir", &self.output_dir)
            .field("filename", &self.filename)
            .field("max_pages", &self.max_pages)
            .finish()
    }
}

#[derive(ClapArgs, Debug, Clone)]
#[command(group(ArgGroup::new("target").required(true).args(["defindex", "name"])))]
pub struct LookupArgs {
    /// Schema JSON file written by `fetch`
    #[arg(short, long)]
    pub schema: PathBuf,

    /// Item definition index
    #[arg(short, long)]
    pub defindex: Option<u32>,

    /// Item name (case-insensitive)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Match the localized display name instead of the internal name
    #[arg(short, long, requires = "name")]
    pub localized: bool,
}

#[derive(ClapArgs, Debug, Clone)]
#[command(group(ArgGroup::new("target").required(true).args(["id", "name"])))]
pub struct QualityArgs {
    /// Schema JSON file written by `fetch`
    #[arg(short, long)]
    pub schema: PathBuf,

    /// Numeric quality id
    #[arg(long)]
    pub id: Option<u32>,

    /// Localized quality name (case-insensitive)
    #[arg(short, long)]
    pub name: Option<String>,
}

#[derive(ClapArgs, Debug, Clone)]
#[command(group(ArgGroup::new("target").required(true).args(["id", "name"])))]
pub struct EffectArgs {
    /// Schema JSON file written by `fetch`
    #[arg(short, long)]
    pub schema: PathBuf,

    /// Numeric particle effect id
    #[arg(long)]
    pub id: Option<u32>,

    /// Effect name (case-insensitive)
    #[arg(short, long)]
    pub name: Option<String>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct AttributeArgs {
    /// Schema JSON file written by `fetch`
    #[arg(short, long)]
    pub schema: PathBuf,

    /// Attribute definition index
    #[arg(short, long)]
    pub defindex: u32,
}
