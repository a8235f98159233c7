//! CLI command handlers.

mod config;
mod fetch;
mod lookup;

pub use config::run_config_show_command;
pub use fetch::run_fetch_command;
pub use lookup::{
    run_attribute_command, run_effect_command, run_lookup_command, run_quality_command,
};
