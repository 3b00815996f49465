// src/config.rs

//! Defines the configuration structures for the screen driver.
//!
//! The configuration is read from a JSON file named by `$SDL_SCREEN_CONFIG`.
//! Every field has a default, so a missing file or a partial one is fine.

use anyhow::{Context, Result};
use log::{debug, info, warn};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Environment variable naming the configuration file.
pub const CONFIG_ENV_VAR: &str = "SDL_SCREEN_CONFIG";

/// Process-wide configuration, loaded on first use. The outcome is logged, so
/// force it only once a logger is installed.
pub static CONFIG: Lazy<Config> = Lazy::new(|| match std::env::var_os(CONFIG_ENV_VAR) {
    Some(path) => Config::load_or_default(path),
    None => {
        debug!("{} not set; using default configuration", CONFIG_ENV_VAR);
        Config::default()
    }
});

// --- Top-Level Configuration Structure ---

/// The complete configuration for the driver and its demo binary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub logging: LoggingConfig,
}

impl Config {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse configuration JSON")
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file {}", path.display()))?;
        let config = Self::from_json_str(&text)
            .with_context(|| format!("Invalid configuration in {}", path.display()))?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Loads `path` if given, else returns the defaults.
    pub fn load_optional(path: Option<impl AsRef<Path>>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Like [`Config::load`], but logs the failure and falls back to defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            warn!("{:#}; using default configuration", e);
            Self::default()
        })
    }
}

// --- Window Configuration ---

/// Defaults applied to new windows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Width used when `NewWindowOptions` asks for zero.
    pub width: u32,
    /// Height used when `NewWindowOptions` asks for zero.
    pub height: u32,
    /// Request a high-DPI drawable where the platform supports one.
    pub high_dpi: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            width: 640,
            height: 480,
            high_dpi: true,
        }
    }
}

// --- Logging Configuration ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `env_logger` filter used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            filter: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn it_should_default_to_a_640_by_480_window() {
        let config = Config::default();
        assert_eq!(config.window.width, 640);
        assert_eq!(config.window.height, 480);
        assert!(config.window.high_dpi);
        assert_eq!(config.logging.filter, "info");
    }

    #[test]
    fn it_should_fill_missing_fields_with_defaults() -> Result<()> {
        let config = Config::from_json_str(r#"{ "window": { "width": 800 } }"#)?;
        assert_eq!(config.window.width, 800);
        assert_eq!(config.window.height, 480);
        assert_eq!(config.logging, LoggingConfig::default());
        Ok(())
    }

    #[test]
    fn it_should_reject_malformed_json() {
        assert!(Config::from_json_str("{ window: ").is_err());
    }

    #[test_log::test]
    fn it_should_fall_back_when_the_file_is_missing() {
        let path = std::env::temp_dir().join("sdl-screen-config-does-not-exist.json");
        assert_eq!(Config::load_or_default(&path), Config::default());
    }

    #[test]
    fn it_should_report_a_bad_optional_file_but_default_when_absent() -> Result<()> {
        assert_eq!(Config::load_optional(None::<&Path>)?, Config::default());
        let path = std::env::temp_dir().join("sdl-screen-config-absent.json");
        let err = Config::load_optional(Some(&path)).unwrap_err();
        assert!(format!("{:#}", err).contains("sdl-screen-config-absent.json"));
        Ok(())
    }

    #[test]
    fn it_should_load_a_file() -> Result<()> {
        let path = std::env::temp_dir().join(format!("sdl-screen-config-{}.json", std::process::id()));
        let mut file = fs::File::create(&path)?;
        writeln!(file, r#"{{ "window": {{ "high_dpi": false }}, "logging": {{ "filter": "debug" }} }}"#)?;
        drop(file);
        let config = Config::load(&path);
        fs::remove_file(&path)?;
        let config = config?;
        assert!(!config.window.high_dpi);
        assert_eq!(config.logging.filter, "debug");
        Ok(())
    }
}
