//! Desk configuration.
//!
//! Stored in `.helpdesk/config.yaml`. Every field has a default, so a missing
//! file or a partial file is fine.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use jiff::SignedDuration;
use serde::{Deserialize, Serialize};

use crate::error::{HelpdeskError, Result};
use crate::paths::helpdesk_root;
use crate::query::DEFAULT_PAGE_SIZE;
use crate::query::sort::SortOrder;

/// Keys accepted by `config get` and `config set`.
pub const CONFIG_KEYS: &[&str] = &["page_size", "sla_hours", "assistant_delay_ms", "default_sort"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Tickets per list page (default: 6)
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// SLA window applied to new tickets, in hours (default: 24)
    #[serde(default = "default_sla_hours")]
    pub sla_hours: u32,

    /// Simulated assistant latency (default: 1500)
    #[serde(default = "default_assistant_delay_ms")]
    pub assistant_delay_ms: u64,

    /// Sort order used by `ls` when none is given
    #[serde(default)]
    pub default_sort: SortOrder,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_sla_hours() -> u32 {
    24
}

fn default_assistant_delay_ms() -> u64 {
    1500
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            sla_hours: default_sla_hours(),
            assistant_delay_ms: default_assistant_delay_ms(),
            default_sort: SortOrder::default(),
        }
    }
}

impl Config {
    pub fn config_path() -> PathBuf {
        helpdesk_root().join("config.yaml")
    }

    /// Load configuration from file, or return default if not found
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path).map_err(|e| {
            HelpdeskError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read config at {}: {}", path.display(), e),
            ))
        })?;
        let config: Config = serde_yaml_ng::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.validate()?;
        let path = Self::config_path();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_yaml_ng::to_string(self)?;
        fs::write(&path, content).map_err(|e| {
            HelpdeskError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to write config at {}: {}", path.display(), e),
            ))
        })?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(HelpdeskError::Config("page_size must be at least 1".to_string()));
        }
        if self.sla_hours == 0 {
            return Err(HelpdeskError::Config("sla_hours must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn sla_window(&self) -> SignedDuration {
        SignedDuration::from_hours(i64::from(self.sla_hours))
    }

    pub fn assistant_delay(&self) -> Duration {
        Duration::from_millis(self.assistant_delay_ms)
    }

    /// Read a single key as text.
    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "page_size" => Ok(self.page_size.to_string()),
            "sla_hours" => Ok(self.sla_hours.to_string()),
            "assistant_delay_ms" => Ok(self.assistant_delay_ms.to_string()),
            "default_sort" => Ok(self.default_sort.to_string()),
            _ => Err(unknown_key(key)),
        }
    }

    /// Parse `value` and store it under `key`. The config is left untouched
    /// when the value is rejected.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut updated = self.clone();
        match key {
            "page_size" => updated.page_size = parse_number(key, value)?,
            "sla_hours" => updated.sla_hours = parse_number(key, value)?,
            "assistant_delay_ms" => updated.assistant_delay_ms = parse_number(key, value)?,
            "default_sort" => updated.default_sort = value.parse()?,
            _ => return Err(unknown_key(key)),
        }
        updated.validate()?;
        *self = updated;
        Ok(())
    }
}

fn unknown_key(key: &str) -> HelpdeskError {
    HelpdeskError::Config(format!(
        "unknown key '{}' (valid keys: {})",
        key,
        CONFIG_KEYS.join(", ")
    ))
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        HelpdeskError::Config(format!("'{value}' is not a valid number for {key}"))
    })
}
