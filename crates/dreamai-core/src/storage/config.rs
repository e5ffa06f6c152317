//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Streak evaluation policy
//! - Log verbosity
//! - Entry database location
//!
//! Configuration is stored at `~/.config/dreamai/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::data_dir;
use crate::error::{ConfigError, Result};
use crate::streak::{FutureEntryPolicy, StreakCalculator, SystemClock};

/// Streak-specific configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StreakConfig {
    /// Whether entries dated after today count toward streaks.
    #[serde(default)]
    pub future_entries: FutureEntryPolicy,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// `EnvFilter` directive, e.g. `info` or `dreamai_core=debug`.
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Entry store configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Database file; defaults to `entries.db` in the data directory.
    #[serde(default)]
    pub path: Option<String>,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/dreamai/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub streak: StreakConfig,
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

fn default_log_level() -> String {
    "warn".into()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let (parent_path, leaf) = match key.rsplit_once('.') {
            Some((parent, leaf)) => (Some(parent), leaf),
            None => (None, key),
        };
        if leaf.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        if let Some(parent_path) = parent_path {
            for part in parent_path.split('.') {
                current = current.get_mut(part).ok_or_else(unknown)?;
            }
        }

        let obj = current.as_object_mut().ok_or_else(unknown)?;
        let existing = obj.get(leaf).ok_or_else(unknown)?;

        // Every leaf is a string or an unset optional string.
        if !matches!(existing, serde_json::Value::String(_) | serde_json::Value::Null) {
            return Err(invalid(format!("'{key}' is a section, not a value")));
        }
        let new_value = serde_json::Value::String(value.into());

        obj.insert(leaf.to_string(), new_value);
        Ok(())
    }

    /// Default config file location.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there if the file is missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "config missing, writing defaults");
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
            .into()),
        }
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Persist to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Overwrite the default location with defaults.
    pub fn reset() -> Result<Self> {
        Self::reset_to(&Self::path()?)
    }

    /// Overwrite `path` with defaults.
    pub fn reset_to(path: &Path) -> Result<Self> {
        let cfg = Self::default();
        cfg.save_to(path)?;
        info!(path = %path.display(), "config reset to defaults");
        Ok(cfg)
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Update a value by dot-separated key, in memory only.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not fit
    /// the key's type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| {
            warn!(key, value, "rejected config value");
            ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            }
        })?;
        Ok(())
    }

    /// Entry database file, honouring `store.path`.
    pub fn store_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.store.path {
            Some(path) => Ok(PathBuf::from(path)),
            None => Ok(data_dir()?.join("entries.db")),
        }
    }

    /// Calculator on the wall clock with the configured future-entry policy.
    pub fn streak_calculator(&self) -> StreakCalculator<SystemClock> {
        StreakCalculator::new().with_future_policy(self.streak.future_entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.streak.future_entries, FutureEntryPolicy::Include);
        assert_eq!(parsed.log.level, "warn");
        assert!(parsed.store.path.is_none());
    }

    #[test]
    fn empty_file_uses_defaults() {
        let parsed: Config = toml::from_str("").unwrap();
        assert_eq!(parsed.log.level, "warn");
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("streak.future_entries").as_deref(), Some("include"));
        assert_eq!(cfg.get("log.level").as_deref(), Some("warn"));
        assert!(cfg.get("log.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_updates_enum_value() {
        let mut cfg = Config::default();
        cfg.set("streak.future_entries", "exclude").unwrap();
        assert_eq!(cfg.streak.future_entries, FutureEntryPolicy::Exclude);
        assert_eq!(
            cfg.streak_calculator().future_policy(),
            FutureEntryPolicy::Exclude
        );
    }

    #[test]
    fn set_rejects_unknown_enum_variant() {
        let mut cfg = Config::default();
        let err = cfg.set("streak.future_entries", "sometimes").unwrap_err();
        assert!(err.to_string().contains("streak.future_entries"));
        assert_eq!(cfg.streak.future_entries, FutureEntryPolicy::Include);
    }

    #[test]
    fn set_json_value_by_path_rejects_unknown_key() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        let result = Config::set_json_value_by_path(&mut json, "log.nonexistent_key", "value");
        assert!(matches!(result, Err(ConfigError::UnknownKey(_))));
        let result = Config::set_json_value_by_path(&mut json, "nope.level", "value");
        assert!(matches!(result, Err(ConfigError::UnknownKey(_))));
    }

    #[test]
    fn set_rejects_whole_section() {
        let mut cfg = Config::default();
        let err = cfg.set("streak", "{}").unwrap_err();
        assert!(err.to_string().contains("is a section"));
    }

    #[test]
    fn reset_to_restores_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.set("streak.future_entries", "exclude").unwrap();
        cfg.save_to(&path).unwrap();

        let reset = Config::reset_to(&path).unwrap();
        assert_eq!(reset.streak.future_entries, FutureEntryPolicy::Include);
        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.streak.future_entries, FutureEntryPolicy::Include);
    }

    #[test]
    fn set_store_path_from_null() {
        let mut cfg = Config::default();
        cfg.set("store.path", "/tmp/dreams.db").unwrap();
        assert_eq!(cfg.store_path().unwrap(), PathBuf::from("/tmp/dreams.db"));
    }

    #[test]
    fn load_from_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.log.level, "warn");
        assert!(path.exists());
    }

    #[test]
    fn save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.set("log.level", "debug").unwrap();
        cfg.save_to(&path).unwrap();

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.log.level, "debug");
    }

    #[test]
    fn load_from_malformed_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[streak\nfuture_entries = ").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to load configuration"));
    }
}
