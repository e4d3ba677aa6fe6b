//! Tool configuration
//!
//! A small `themecraft.toml` under the data directory. Every field has a
//! default so a missing or partial file never blocks startup.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// How long the "copied" flash stays visible, in milliseconds
    #[serde(default = "default_flash_duration_ms")]
    pub flash_duration_ms: u64,

    /// Session file used when no --session is given
    #[serde(default = "default_session_name")]
    pub session_name: String,
}

fn default_flash_duration_ms() -> u64 {
    1500
}

fn default_session_name() -> String {
    "default".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            flash_duration_ms: default_flash_duration_ms(),
            session_name: default_session_name(),
        }
    }
}

impl Config {
    /// Load configuration from themecraft.toml, falling back to
    /// defaults when the file does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path).context("Failed to read themecraft.toml")?;
            toml::from_str(&contents).context("Failed to parse themecraft.toml")
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, contents).context("Failed to write themecraft.toml")?;
        Ok(())
    }

    pub fn flash_duration(&self) -> Duration {
        Duration::from_millis(self.flash_duration_ms)
    }
}

/// Path of the config file under the data directory
pub fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join("themecraft.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.flash_duration_ms, 1500);
        assert_eq!(config.session_name, "default");
        assert_eq!(config.flash_duration(), Duration::from_millis(1500));
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str("flash_duration_ms = 500").unwrap();
        assert_eq!(config.flash_duration_ms, 500);
        assert_eq!(config.session_name, "default");
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let config = Config::load(Path::new("/nonexistent/themecraft.toml")).unwrap();
        assert_eq!(config.session_name, "default");
    }

    #[test]
    fn test_toml_round_trip() {
        let config = Config {
            flash_duration_ms: 800,
            session_name: "work".to_string(),
        };
        let rendered = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.flash_duration_ms, 800);
        assert_eq!(parsed.session_name, "work");
    }
}
