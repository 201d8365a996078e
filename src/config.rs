use anyhow::{Context, Result};
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::identify::MockIdentifier;

const APP_NAME: &str = "plantcare";
const CONFIG_FILE: &str = "config.json";

/// Overrides the storage location (file for SQLite, directory for JSON).
pub const DATA_ENV: &str = "PLANTCARE_DATA";
/// Overrides the HTTP port.
pub const PORT_ENV: &str = "PLANTCARE_PORT";

/// Which storage backend holds the collection.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StorageKind {
    #[default]
    Sqlite,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    pub storage: StorageKind,
    /// Database file (sqlite) or directory (json). Defaults to the platform
    /// data directory.
    pub data_path: Option<PathBuf>,
    /// Port for `plantcare serve`.
    pub port: u16,
    /// How long the simulated identification takes, in milliseconds.
    pub identify_delay_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage: StorageKind::Sqlite,
            data_path: None,
            port: 3000,
            identify_delay_ms: MockIdentifier::DEFAULT_DELAY.as_millis() as u64,
        }
    }
}

impl AppConfig {
    /// Load configuration from the user's config directory, then apply
    /// environment overrides.
    /// Returns default config if file doesn't exist or fails to parse.
    pub fn load() -> Self {
        let mut config = match Self::try_load() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load config, using defaults: {:#}", e);
                Self::default()
            }
        };
        config.apply_env(|key| std::env::var(key).ok());
        config
    }

    fn try_load() -> Result<Self> {
        let config_path = get_config_path()?;
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).context("Failed to read config file")?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Failed to parse config file")
    }

    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(path) = var(DATA_ENV).filter(|p| !p.is_empty()) {
            self.data_path = Some(PathBuf::from(path));
        }
        if let Some(port) = var(PORT_ENV) {
            match port.parse() {
                Ok(port) => self.port = port,
                Err(_) => tracing::warn!("Ignoring invalid {}: {}", PORT_ENV, port),
            }
        }
    }

    pub fn identify_delay(&self) -> Duration {
        Duration::from_millis(self.identify_delay_ms)
    }

    /// Save the current configuration to disk, returning where it was written.
    pub fn save(&self) -> Result<PathBuf> {
        let config_path = get_config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&config_path, content).context("Failed to write config file")?;

        Ok(config_path)
    }
}

pub fn get_config_path() -> Result<PathBuf> {
    let mut path =
        config_dir().ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    path.push(APP_NAME);
    path.push(CONFIG_FILE);
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config = AppConfig::parse(r#"{"storage": "json"}"#).unwrap();
        assert_eq!(config.storage, StorageKind::Json);
        assert_eq!(config.port, 3000);
        assert_eq!(config.identify_delay(), Duration::from_secs(2));
    }

    #[test]
    fn rejects_unknown_storage_kind() {
        assert!(AppConfig::parse(r#"{"storage": "redis"}"#).is_err());
    }

    #[test]
    fn environment_overrides_file_values() {
        let mut config = AppConfig::default();
        config.apply_env(|key| match key {
            DATA_ENV => Some("/tmp/plants.db".to_string()),
            PORT_ENV => Some("8080".to_string()),
            _ => None,
        });
        assert_eq!(config.data_path, Some(PathBuf::from("/tmp/plants.db")));
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn invalid_port_override_is_ignored() {
        let mut config = AppConfig::default();
        config.apply_env(|key| (key == PORT_ENV).then(|| "not-a-port".to_string()));
        assert_eq!(config.port, 3000);
    }
}
