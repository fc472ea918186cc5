//! Configuration management for carrent
//!
//! Config stored at: ~/.config/carrent/config.json

use carrent_types::{
    ConfigError, OutputFormat, RentalPeriod, Result, DEFAULT_RENTAL_PERIOD_SECS,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Length of one rental-period unit in seconds (86400 = one day)
    #[serde(default = "default_rental_period_secs")]
    pub rental_period_secs: i64,

    /// Default output format (json, table)
    #[serde(default = "default_output_format")]
    pub output_format: OutputFormat,

    /// TOML file with the startup fleet and accounts (built-in sample if unset)
    #[serde(default)]
    pub seed_file: Option<PathBuf>,
}

fn default_rental_period_secs() -> i64 {
    DEFAULT_RENTAL_PERIOD_SECS
}

fn default_output_format() -> OutputFormat {
    OutputFormat::Table
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rental_period_secs: default_rental_period_secs(),
            output_format: default_output_format(),
            seed_file: None,
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join("carrent");
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load config from the default location, or fall back to defaults
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load config from `path`, or fall back to defaults if it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save config to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// The configured rental-period unit
    pub fn rental_period(&self) -> Result<RentalPeriod> {
        RentalPeriod::from_secs(self.rental_period_secs).ok_or_else(|| {
            ConfigError::InvalidValue(format!(
                "rental_period_secs must be positive, got {}",
                self.rental_period_secs
            ))
            .into()
        })
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Carrent Configuration")?;
        writeln!(f, "=====================")?;
        writeln!(f)?;
        writeln!(f, "Rental period:  {} s", self.rental_period_secs)?;
        writeln!(f, "Output format:  {}", self.output_format)?;
        writeln!(
            f,
            "Seed file:      {}",
            self.seed_file
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(built-in sample)".to_string())
        )?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:    {}", path.display())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.rental_period().unwrap().secs(), 86_400);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            rental_period_secs: 30,
            output_format: OutputFormat::Json,
            seed_file: Some(PathBuf::from("fleet.toml")),
        };

        config.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"rental_period_secs": 30}"#).unwrap();

        let config = Config::load_from(&path).unwrap();

        assert_eq!(config.rental_period_secs, 30);
        assert_eq!(config.output_format, OutputFormat::Table);
        assert!(config.seed_file.is_none());
    }

    #[test]
    fn test_invalid_period_is_rejected() {
        let config = Config {
            rental_period_secs: 0,
            ..Config::default()
        };
        assert!(config.rental_period().is_err());
    }

    #[test]
    fn test_corrupt_file_is_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse configuration"));
    }
}
