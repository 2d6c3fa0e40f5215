//! # Configuration Persistence
//!
//! Manages user configuration stored in `~/.config/caniuse-tui/config.json`.
//!
//! ## Overview
//!
//! The [`Config`] struct is serialized to / deserialized from a JSON file in
//! the user's XDG config directory. Every field has a default, so a partial
//! file (or no file at all) is valid.
//!
//! ## File Location
//!
//! ```text
//! ~/.config/caniuse-tui/config.json
//! ```
//!
//! The `directories` crate is used to resolve the platform-appropriate config
//! directory.

use crate::input::DEFAULT_ESCAPE_TIMEOUT;
use crate::ui::state::DEFAULT_TAB_PAGE_LINES;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Persisted user configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// The name of the selected theme (must match a built-in theme name).
    #[serde(default = "default_theme_name")]
    pub theme: String,

    /// How long to wait for the rest of an escape sequence before treating a
    /// lone `Esc` as quit. Slow SSH links may need a larger value.
    #[serde(default = "default_escape_timeout_ms")]
    pub escape_timeout_ms: u64,

    /// Lines the details tab scrolls per PageUp/PageDown.
    #[serde(default = "default_tab_page_lines")]
    pub tab_page_lines: usize,
}

fn default_theme_name() -> String {
    "Catppuccin Mocha".to_string()
}

fn default_escape_timeout_ms() -> u64 {
    DEFAULT_ESCAPE_TIMEOUT.as_millis() as u64
}

fn default_tab_page_lines() -> usize {
    DEFAULT_TAB_PAGE_LINES
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme_name(),
            escape_timeout_ms: default_escape_timeout_ms(),
            tab_page_lines: default_tab_page_lines(),
        }
    }
}

impl Config {
    /// Load configuration from disk. Returns `Config::default()` if the file
    /// does not exist or cannot be parsed.
    pub fn load() -> Self {
        match Self::try_load() {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(error = %err, "could not load config, using defaults");
                Self::default()
            }
        }
    }

    /// Try to load configuration, returning an error on failure.
    fn try_load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load configuration from a specific path. Returns `Config::default()` if
    /// the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Save the current configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    pub fn escape_timeout(&self) -> Duration {
        Duration::from_millis(self.escape_timeout_ms.max(1))
    }

    /// Return the path to the config file.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "caniuse-tui")
            .context("Could not determine config directory")?;
        Ok(dirs.config_dir().join("config.json"))
    }
}
