//! Application configuration.

use crate::consts::{http, refresh};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU64;
use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{fs, io};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Refresh interval must be at least one second")]
    ZeroInterval,

    #[error("Refresh interval of {0} seconds is too large")]
    IntervalOverflow(u64),

    #[error("Could not determine home directory")]
    NoHomeDir,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Returns the path of the configuration file, `~/.quote-dashboard/config.json`.
pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let home = home::home_dir().ok_or(ConfigError::NoHomeDir)?;
    Ok(home.join(".quote-dashboard").join("config.json"))
}

/// Converts a user-facing interval in seconds to a non-zero millisecond count.
pub fn interval_from_secs(secs: u64) -> Result<NonZeroU64, ConfigError> {
    let ms = secs
        .checked_mul(1000)
        .ok_or(ConfigError::IntervalOverflow(secs))?;
    NonZeroU64::new(ms).ok_or(ConfigError::ZeroInterval)
}

/// Runtime refresh settings read by the refresh controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshConfig {
    pub interval_ms: NonZeroU64,
    pub auto_enabled: bool,
}

impl RefreshConfig {
    pub fn new(interval_ms: NonZeroU64, auto_enabled: bool) -> Self {
        Self {
            interval_ms,
            auto_enabled,
        }
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.get())
    }
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_ms: NonZeroU64::new(refresh::DEFAULT_INTERVAL_MS)
                .unwrap_or(NonZeroU64::MIN),
            auto_enabled: refresh::DEFAULT_AUTO_REFRESH,
        }
    }
}

fn default_endpoint() -> String {
    http::DEFAULT_ENDPOINT.to_string()
}

fn default_interval_secs() -> u64 {
    refresh::DEFAULT_INTERVAL_MS / 1000
}

fn default_auto_refresh() -> bool {
    refresh::DEFAULT_AUTO_REFRESH
}

/// Persisted dashboard settings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Config {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    #[serde(default = "default_auto_refresh")]
    pub auto_refresh: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            interval_secs: default_interval_secs(),
            auto_refresh: default_auto_refresh(),
        }
    }
}

impl Config {
    /// Create Config with the given values.
    pub fn new(endpoint: String, interval_secs: u64, auto_refresh: bool) -> Self {
        Config {
            endpoint,
            interval_secs,
            auto_refresh,
        }
    }

    /// Loads configuration from a JSON file at the given path.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if reading from file fails or JSON is invalid.
    pub fn load_from_file(path: &Path) -> Result<Self, io::Error> {
        let buf = fs::read(path)?;
        let config: Config = serde_json::from_slice(&buf)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(config)
    }

    /// Loads the configuration if the file exists, otherwise returns defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, io::Error> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Saves the configuration to a JSON file at the given path.
    ///
    /// Directories will be created if they don't exist. This method overwrites existing files.
    pub fn save(&self, path: &Path) -> Result<(), io::Error> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Serialization failed: {}", e),
            )
        })?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Removes the configuration file. Missing files are not an error.
    pub fn clear(path: &Path) -> Result<(), io::Error> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Replaces the endpoint when `endpoint` is present and non-empty.
    pub fn override_endpoint(&mut self, endpoint: Option<String>) {
        if let Some(endpoint) = endpoint.filter(|e| !e.trim().is_empty()) {
            self.endpoint = endpoint;
        }
    }

    /// Applies `QUOTE_DASHBOARD_URL` from the environment, if set.
    pub fn with_env_overrides(mut self) -> Self {
        self.override_endpoint(std::env::var(http::ENDPOINT_ENV_VAR).ok());
        self
    }

    pub fn refresh_config(&self) -> Result<RefreshConfig, ConfigError> {
        Ok(RefreshConfig::new(
            interval_from_secs(self.interval_secs)?,
            self.auto_refresh,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    // Loading a saved configuration file should return the same configuration.
    fn test_load_recovers_saved_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        let config = Config::new("http://example.test/api/stocks".to_string(), 30, false);
        config.save(&path).unwrap();

        let loaded_config = Config::load_from_file(&path).unwrap();
        assert_eq!(config, loaded_config);
    }

    #[test]
    // Saving a configuration should create directories if they don't exist.
    fn test_save_creates_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nonexistent_dir").join("config.json");

        let result = Config::default().save(&path);

        assert!(result.is_ok(), "Failed to save config");
        assert!(
            path.parent().unwrap().exists(),
            "Parent directory does not exist"
        );
    }

    #[test]
    // Missing fields fall back to defaults.
    fn test_load_fills_missing_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"interval_secs": 30}"#).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.interval_secs, 30);
        assert_eq!(loaded.endpoint, http::DEFAULT_ENDPOINT);
        assert!(loaded.auto_refresh);
    }

    #[test]
    // Loading an invalid JSON file should return an error.
    fn test_load_rejects_invalid_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("invalid_config.json");

        let mut file = File::create(&path).unwrap();
        writeln!(file, "invalid json").unwrap();

        assert!(Config::load_from_file(&path).is_err());
    }

    #[test]
    fn test_clear_tolerates_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        assert!(Config::clear(&path).is_ok());

        Config::default().save(&path).unwrap();
        Config::clear(&path).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_interval_from_secs() {
        assert_eq!(interval_from_secs(10).unwrap().get(), 10_000);
        assert!(matches!(interval_from_secs(0), Err(ConfigError::ZeroInterval)));
        assert!(matches!(
            interval_from_secs(u64::MAX),
            Err(ConfigError::IntervalOverflow(_))
        ));
    }

    #[test]
    fn test_default_refresh_config() {
        let refresh = Config::default().refresh_config().unwrap();
        assert_eq!(refresh, RefreshConfig::default());
        assert_eq!(refresh.interval(), Duration::from_secs(10));
        assert!(refresh.auto_enabled);
    }

    #[test]
    fn test_override_endpoint_ignores_blank_values() {
        let mut config = Config::default();
        config.override_endpoint(None);
        config.override_endpoint(Some("  ".to_string()));
        assert_eq!(config.endpoint, http::DEFAULT_ENDPOINT);

        config.override_endpoint(Some("http://example.test/quotes".to_string()));
        assert_eq!(config.endpoint, "http://example.test/quotes");
    }
}
