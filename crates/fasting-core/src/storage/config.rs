//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Default fasting target and quick-pick presets
//! - Widget snapshot location
//! - History display limits
//!
//! Configuration is stored at `~/.config/fasting/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::ConfigError;
use crate::fast::TargetInterval;

/// Fast defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FastConfig {
    #[serde(default = "default_target_hours")]
    pub default_target_hours: u32,
    #[serde(default = "default_presets")]
    pub presets: Vec<u32>,
}

/// Widget snapshot configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetConfig {
    /// File name (relative to the data directory) or absolute path.
    #[serde(default = "default_snapshot_file")]
    pub snapshot_file: String,
}

/// History display configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HistoryConfig {
    /// Maximum number of fasts to list. `None` lists all.
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/fasting/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub fast: FastConfig,
    #[serde(default)]
    pub widget: WidgetConfig,
    #[serde(default)]
    pub history: HistoryConfig,
}

fn default_target_hours() -> u32 {
    16
}
fn default_presets() -> Vec<u32> {
    vec![12, 14, 16, 18, 20, 24]
}
fn default_snapshot_file() -> String {
    "SharedData.json".into()
}

impl Default for FastConfig {
    fn default() -> Self {
        Self {
            default_target_hours: default_target_hours(),
            presets: default_presets(),
        }
    }
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            snapshot_file: default_snapshot_file(),
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
        let unknown = || ConfigError::InvalidValue {
            key: key.to_string(),
            message: "unknown config key".into(),
        };
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() || key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    // Optional numeric settings are cleared with "none"; a
                    // required one rejects the resulting null on deserialize.
                    serde_json::Value::Number(_) | serde_json::Value::Null if value == "none" => {
                        serde_json::Value::Null
                    }
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|e| invalid(format!("cannot parse '{value}': {e}")))?,
                    ),
                    serde_json::Value::Number(_) => value
                        .parse::<u64>()
                        .map(|n| serde_json::Value::Number(n.into()))
                        .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?,
                    serde_json::Value::Null => value
                        .parse::<u64>()
                        .map(|n| serde_json::Value::Number(n.into()))
                        .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?,
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value)
                            .map_err(|e| invalid(format!("cannot parse '{value}': {e}")))?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf, ConfigError> {
        data_dir()
            .map(|dir| dir.join("config.toml"))
            .map_err(|e| ConfigError::LoadFailed {
                path: PathBuf::from("config.toml"),
                message: e.to_string(),
            })
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                toml::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string()))
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
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

    /// Set a config value by key without saving. Returns error if key is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Set a config value by key and save.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.apply(key, value)?;
        self.save()
    }

    /// The default fasting target.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured hours are zero or out of range.
    pub fn default_target(&self) -> Result<TargetInterval, ConfigError> {
        TargetInterval::from_hours(self.fast.default_target_hours).map_err(|e| {
            ConfigError::InvalidValue {
                key: "fast.default_target_hours".into(),
                message: e.to_string(),
            }
        })
    }

    /// Absolute path of the widget snapshot file.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created.
    pub fn snapshot_path(&self) -> Result<PathBuf, ConfigError> {
        let file = PathBuf::from(&self.widget.snapshot_file);
        if file.is_absolute() {
            return Ok(file);
        }
        data_dir()
            .map(|dir| dir.join(file))
            .map_err(|e| ConfigError::LoadFailed {
                path: PathBuf::from(&self.widget.snapshot_file),
                message: e.to_string(),
            })
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
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
        assert_eq!(parsed.fast.default_target_hours, 16);
        assert_eq!(parsed.fast.presets, vec![12, 14, 16, 18, 20, 24]);
        assert_eq!(parsed.widget.snapshot_file, "SharedData.json");
    }

    #[test]
    fn missing_sections_use_defaults() {
        let parsed: Config = toml::from_str("[fast]\ndefault_target_hours = 18\n").unwrap();
        assert_eq!(parsed.fast.default_target_hours, 18);
        assert_eq!(parsed.fast.presets.len(), 6);
        assert!(parsed.history.limit.is_none());
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("fast.default_target_hours").as_deref(), Some("16"));
        assert_eq!(cfg.get("widget.snapshot_file").as_deref(), Some("SharedData.json"));
        assert_eq!(cfg.get("history.limit").as_deref(), Some("null"));
        assert!(cfg.get("fast.missing_key").is_none());
    }

    #[test]
    fn apply_updates_number() {
        let mut cfg = Config::default();
        cfg.apply("fast.default_target_hours", "20").unwrap();
        assert_eq!(cfg.fast.default_target_hours, 20);
    }

    #[test]
    fn apply_updates_optional_limit() {
        let mut cfg = Config::default();
        cfg.apply("history.limit", "10").unwrap();
        assert_eq!(cfg.history.limit, Some(10));
        cfg.apply("history.limit", "none").unwrap();
        assert_eq!(cfg.history.limit, None);
    }

    #[test]
    fn apply_none_to_required_number_is_rejected() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.apply("fast.default_target_hours", "none"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert_eq!(cfg.fast.default_target_hours, 16);
    }

    #[test]
    fn apply_updates_array() {
        let mut cfg = Config::default();
        cfg.apply("fast.presets", "[13, 36]").unwrap();
        assert_eq!(cfg.fast.presets, vec![13, 36]);
    }

    #[test]
    fn apply_rejects_unknown_key() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.apply("fast.nonexistent_key", "1"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(cfg.apply("", "1").is_err());
    }

    #[test]
    fn apply_rejects_invalid_type() {
        let mut cfg = Config::default();
        assert!(cfg.apply("fast.default_target_hours", "sixteen").is_err());
        assert_eq!(cfg.fast.default_target_hours, 16);
    }

    #[test]
    fn default_target_rejects_zero_hours() {
        let mut cfg = Config::default();
        assert_eq!(cfg.default_target().unwrap().as_secs(), 16 * 3600);
        cfg.fast.default_target_hours = 0;
        assert!(cfg.default_target().is_err());
    }

    #[test]
    fn absolute_snapshot_path_is_kept() {
        let mut cfg = Config::default();
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("widget.json");
        cfg.widget.snapshot_file = file.to_string_lossy().into_owned();
        assert_eq!(cfg.snapshot_path().unwrap(), file);
    }
}
