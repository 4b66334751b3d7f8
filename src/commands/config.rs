//! Configuration commands.
//!
//! - `config show`: Display current configuration
//! - `config get`: Print one value
//! - `config set`: Validate and store one value

use owo_colors::OwoColorize;
use serde_json::json;

use super::CommandOutput;
use crate::config::{CONFIG_KEYS, Config};
use crate::error::Result;

pub fn cmd_config_show(output_json: bool) -> Result<()> {
    let config = Config::load()?;

    let mut lines = vec![format!(
        "{} {}",
        "Configuration".bold(),
        Config::config_path().display().dimmed()
    )];
    for key in CONFIG_KEYS {
        lines.push(format!("  {}: {}", key.cyan(), config.get(key)?));
    }

    CommandOutput::new(serde_json::to_value(&config)?)
        .with_text(lines.join("\n"))
        .print(output_json)
}

pub fn cmd_config_get(key: &str, output_json: bool) -> Result<()> {
    let value = Config::load()?.get(key)?;

    CommandOutput::new(json!({ "key": key, "value": value }))
        .with_text(value.clone())
        .print(output_json)
}

pub fn cmd_config_set(key: &str, value: &str, output_json: bool) -> Result<()> {
    let mut config = Config::load()?;
    config.set(key, value)?;
    config.save()?;
    let stored = config.get(key)?;

    CommandOutput::new(json!({
        "action": "config_set",
        "key": key,
        "value": stored,
        "success": true,
    }))
    .with_text(format!("Set {} = {}", key.cyan(), stored))
    .print(output_json)
}
