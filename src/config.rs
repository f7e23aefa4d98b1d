//! Configuration management for the overlay store demo
//!
//! This module handles loading, parsing, and validation of configuration files,
//! including the static chrome configuration declared per overlay identifier.

use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, CONFIG_GENERATED, OVERLAY_MAX_WIDTH, OVERLAY_MIN_HEIGHT, OVERLAY_MIN_WIDTH,
    TICK_RATE_MAX_MS, TICK_RATE_MIN_MS,
};
use crate::ui::chrome::ChromeConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub ui: UiConfig,
    pub logging: LoggingConfig,
    /// Map of overlay id -> static chrome configuration
    pub overlays: BTreeMap<String, ChromeConfig>,
}

/// UI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Event loop tick rate in milliseconds
    pub tick_rate_ms: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Write logs to a file in the data directory
    pub enabled: bool,
    /// Minimum level: "error", "warn", "info", "debug" or "trace"
    pub level: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { tick_rate_ms: 100 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Parsed log level
    pub fn level_filter(&self) -> Result<log::LevelFilter> {
        log::LevelFilter::from_str(&self.level).map_err(|_| anyhow::anyhow!("Invalid log level '{}'", self.level))
    }
}

impl Config {
    /// Load configuration from file or return defaults
    pub fn load() -> Result<Self> {
        let config_path = Self::find_config_file()?;

        if let Some(path) = config_path {
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Find configuration file in order of precedence
    fn find_config_file() -> Result<Option<PathBuf>> {
        // 1. Check current directory
        let current_dir_config = PathBuf::from(CONFIG_FILE_NAME);
        if current_dir_config.exists() {
            return Ok(Some(current_dir_config));
        }

        // 2. Check XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join(CONFIG_DIR_NAME).join("config.toml");
            if xdg_config.exists() {
                return Ok(Some(xdg_config));
            }
        }

        Ok(None)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if !(TICK_RATE_MIN_MS..=TICK_RATE_MAX_MS).contains(&self.ui.tick_rate_ms) {
            anyhow::bail!(
                "tick_rate_ms must be between {} and {}, got {}",
                TICK_RATE_MIN_MS,
                TICK_RATE_MAX_MS,
                self.ui.tick_rate_ms
            );
        }

        self.logging.level_filter()?;

        for (id, chrome) in &self.overlays {
            Self::validate_overlay(id, chrome)?;
        }

        Ok(())
    }

    /// Validate the static chrome of a single overlay
    fn validate_overlay(id: &str, chrome: &ChromeConfig) -> Result<()> {
        if id.trim().is_empty() {
            anyhow::bail!("Overlay ids cannot be empty");
        }

        if let Some(width) = chrome.width {
            if !(OVERLAY_MIN_WIDTH..=OVERLAY_MAX_WIDTH).contains(&width) {
                anyhow::bail!(
                    "Overlay '{}': width must be between {} and {} percent, got {}",
                    id,
                    OVERLAY_MIN_WIDTH,
                    OVERLAY_MAX_WIDTH,
                    width
                );
            }
        }

        if let Some(height) = chrome.height {
            if height < OVERLAY_MIN_HEIGHT {
                anyhow::bail!(
                    "Overlay '{}': height must be at least {} lines, got {}",
                    id,
                    OVERLAY_MIN_HEIGHT,
                    height
                );
            }
        }

        Ok(())
    }

    /// Static chrome declared for `id`, layered over `base`
    pub fn chrome_for(&self, id: &str, base: ChromeConfig) -> ChromeConfig {
        match self.overlays.get(id) {
            Some(declared) => base.overlay(declared),
            None => base,
        }
    }

    /// Generate default configuration file
    pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let config = Self::default();
        let toml_content = toml::to_string_pretty(&config).context("Failed to serialize default config")?;

        let header = format!(
            "# overlay-store configuration file\n# Generated on {}\n#\n# Declare static chrome per overlay, e.g.\n# [overlays.user-edit]\n# title = \"Edit user\"\n# width = 50\n\n",
            chrono::Local::now().format("%Y-%m-%d")
        );

        let full_content = header + &toml_content;

        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        std::fs::write(&path, full_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        println!("{}: {}", CONFIG_GENERATED, path.as_ref().display());
        Ok(())
    }

    /// Get the XDG config directory path
    pub fn get_xdg_config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
            .map(|dir| dir.join(CONFIG_DIR_NAME))
    }

    /// Get the default config file path
    pub fn get_default_config_path() -> Result<PathBuf> {
        Ok(Self::get_xdg_config_dir()?.join("config.toml"))
    }
}
