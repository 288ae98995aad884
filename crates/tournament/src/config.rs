//! Tournament configuration, read from a TOML file

use bracket_core::FieldSize;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Default config file looked up by the CLI
pub const DEFAULT_CONFIG_PATH: &str = "tournament.toml";

/// Settings shared by every command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentConfig {
    /// Seed slots per bracket, a power of two
    pub field_size: FieldSize,
    /// Directory holding one standings file per tournament
    pub data_dir: PathBuf,
    /// Log filter used when `RUST_LOG` is not set
    pub log_filter: String,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            field_size: FieldSize::EIGHT,
            data_dir: PathBuf::from("standings"),
            log_filter: "info".to_string(),
        }
    }
}

impl TournamentConfig {
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Load config from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Load config, or the defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_keys() {
        let config = TournamentConfig::from_toml("field_size = 16").unwrap();
        assert_eq!(config.field_size.get(), 16);
        assert_eq!(config.data_dir, PathBuf::from("standings"));
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_rejects_field_size_not_power_of_two() {
        assert!(TournamentConfig::from_toml("field_size = 12").is_err());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("tournament_config_that_does_not_exist.toml");
        let config = TournamentConfig::load_or_default(&path).unwrap();
        assert_eq!(config, TournamentConfig::default());
    }
}
