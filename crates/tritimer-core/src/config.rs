//! TOML-based application configuration.
//!
//! Stores the last-used settings for each timer mode plus notification
//! preferences. This is presentation-layer persistence of [`ModeConfig`]
//! values only -- live timer state is never written to disk.
//!
//! Configuration is stored at `~/.config/tritimer/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::timer::{Duration, ModeConfig};

/// Last-used interval (work/break) mode settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntervalConfig {
    #[serde(default = "default_interval_work")]
    pub work: Duration,
    #[serde(default = "default_interval_rest")]
    pub rest: Duration,
    #[serde(default = "default_interval_rounds")]
    pub rounds: u32,
}

/// Last-used HIIT mode settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HiitConfig {
    #[serde(default = "default_hiit_work")]
    pub work: Duration,
    #[serde(default = "default_hiit_rest")]
    pub rest: Duration,
    #[serde(default = "default_hiit_rounds")]
    pub rounds: u32,
}

/// Last-used plain countdown settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CountdownConfig {
    #[serde(default)]
    pub target: Duration,
}

/// Notification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Ring the terminal bell for audio cues.
    #[serde(default = "default_true")]
    pub bell: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/tritimer/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub interval: IntervalConfig,
    #[serde(default)]
    pub hiit: HiitConfig,
    #[serde(default)]
    pub countdown: CountdownConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
}

// Default functions
fn default_interval_work() -> Duration {
    Duration::from_parts(0, 25, 0)
}
fn default_interval_rest() -> Duration {
    Duration::from_parts(0, 5, 0)
}
fn default_interval_rounds() -> u32 {
    4
}
fn default_hiit_work() -> Duration {
    Duration::from_secs(20)
}
fn default_hiit_rest() -> Duration {
    Duration::from_secs(10)
}
fn default_hiit_rounds() -> u32 {
    8
}
fn default_true() -> bool {
    true
}

impl Default for IntervalConfig {
    fn default() -> Self {
        Self {
            work: default_interval_work(),
            rest: default_interval_rest(),
            rounds: default_interval_rounds(),
        }
    }
}

impl Default for HiitConfig {
    fn default() -> Self {
        Self {
            work: default_hiit_work(),
            rest: default_hiit_rest(),
            rounds: default_hiit_rounds(),
        }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            bell: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            interval: IntervalConfig::default(),
            hiit: HiitConfig::default(),
            countdown: CountdownConfig::default(),
            notifications: NotificationsConfig::default(),
        }
    }
}

/// Returns `~/.config/tritimer[-dev]/` based on TRITIMER_ENV.
///
/// Set TRITIMER_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("TRITIMER_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("tritimer-dev")
    } else {
        base_dir.join("tritimer")
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::LoadFailed {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
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
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() {
            return Err(ConfigError::UnknownKey(key.to_string()));
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current
                    .as_object_mut()
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
                let existing = obj
                    .get(part)
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        // Durations are stored as whole seconds but accept
                        // [HH:]MM:SS on the command line.
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(d) = value.parse::<Duration>() {
                            serde_json::Value::Number(d.as_secs().into())
                        } else {
                            return Err(invalid(format!("cannot parse '{value}' as a number")));
                        }
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current
                .get_mut(part)
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        }

        Err(ConfigError::UnknownKey(key.to_string()))
    }

    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
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

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
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

    /// Set a config value by key and persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self =
            serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        self.save()?;
        Ok(())
    }

    /// Last-used interval mode as an engine configuration.
    pub fn interval_mode(&self) -> ModeConfig {
        ModeConfig::Interval {
            work: self.interval.work,
            rest: self.interval.rest,
            rounds: self.interval.rounds,
        }
    }

    /// Last-used HIIT mode as an engine configuration.
    pub fn hiit_mode(&self) -> ModeConfig {
        ModeConfig::Hiit {
            work: self.hiit.work,
            rest: self.hiit.rest,
            rounds: self.hiit.rounds,
        }
    }

    /// Last-used countdown as an engine configuration.
    pub fn countdown_mode(&self) -> ModeConfig {
        ModeConfig::Countdown {
            target: self.countdown.target,
        }
    }

    /// Store a mode configuration back as the mode's last-used settings.
    pub fn remember_mode(&mut self, mode: &ModeConfig) {
        match *mode {
            ModeConfig::Interval { work, rest, rounds } => {
                self.interval = IntervalConfig { work, rest, rounds };
            }
            ModeConfig::Hiit { work, rest, rounds } => {
                self.hiit = HiitConfig { work, rest, rounds };
            }
            ModeConfig::Countdown { target } => {
                self.countdown = CountdownConfig { target };
            }
        }
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
        assert_eq!(parsed.interval.work.as_secs(), 25 * 60);
        assert_eq!(parsed.hiit.rounds, 8);
        assert!(parsed.notifications.bell);
    }

    #[test]
    fn get_by_dot_path() {
        let cfg = Config::default();
        assert_eq!(cfg.get("interval.rounds").as_deref(), Some("4"));
        assert_eq!(cfg.get("hiit.work").as_deref(), Some("20"));
        assert_eq!(cfg.get("notifications.enabled").as_deref(), Some("true"));
        assert!(cfg.get("no.such.key").is_none());
    }

    #[test]
    fn set_parses_durations_and_numbers() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        Config::set_json_value_by_path(&mut json, "interval.work", "30:00").unwrap();
        Config::set_json_value_by_path(&mut json, "hiit.rounds", "12").unwrap();
        let cfg: Config = serde_json::from_value(json).unwrap();
        assert_eq!(cfg.interval.work.as_secs(), 1800);
        assert_eq!(cfg.hiit.rounds, 12);
    }

    #[test]
    fn set_unknown_key_fails() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        let err = Config::set_json_value_by_path(&mut json, "interval.bogus", "1");
        assert!(matches!(err, Err(ConfigError::UnknownKey(_))));
    }

    #[test]
    fn remember_mode_updates_section() {
        let mut cfg = Config::default();
        cfg.remember_mode(&ModeConfig::Countdown {
            target: Duration::from_secs(90),
        });
        assert_eq!(cfg.countdown.target.as_secs(), 90);
    }
}
