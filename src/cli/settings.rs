//! `quickreply set` / `quickreply unset`.

use std::fmt;

use crate::core::config::data::{path_display, Config, ConfigKey};

/// Errors that can occur when modifying configuration settings.
#[derive(Debug)]
pub enum SettingError {
    /// The provided setting key is not recognized.
    UnknownKey(String),
    /// The value could not be stored under the key.
    InvalidValue(String),
    /// An error occurred while loading or persisting the configuration.
    ConfigError(String),
}

impl SettingError {
    /// Print the error message to stderr with appropriate formatting.
    pub fn print(&self) {
        match self {
            SettingError::UnknownKey(key) => {
                eprintln!("❌ Unknown config key: {key}");
                eprintln!("   Available keys: {}", available_keys());
            }
            SettingError::InvalidValue(msg) => {
                eprintln!("❌ {msg}");
            }
            SettingError::ConfigError(msg) => {
                eprintln!("❌ Failed to save configuration: {msg}");
            }
        }
    }
}

impl fmt::Display for SettingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingError::UnknownKey(key) => write!(f, "Unknown config key: {key}"),
            SettingError::InvalidValue(msg) => write!(f, "{msg}"),
            SettingError::ConfigError(msg) => write!(f, "Config error: {msg}"),
        }
    }
}

impl std::error::Error for SettingError {}

fn available_keys() -> String {
    ConfigKey::ALL
        .iter()
        .map(|key| key.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn parse_key(key: &str) -> Result<ConfigKey, SettingError> {
    ConfigKey::parse(key).ok_or_else(|| SettingError::UnknownKey(key.to_string()))
}

/// Store the joined `value` words under `key`.
///
/// Returns `Ok(None)` when no value was given, meaning the caller should
/// list the current settings instead.
pub fn apply_set(
    config: &mut Config,
    key: &str,
    value: &[String],
) -> Result<Option<String>, SettingError> {
    let key = parse_key(key)?;
    let value = value.join(" ");
    if value.trim().is_empty() {
        return Ok(None);
    }

    config
        .set(key, value.clone())
        .map_err(SettingError::InvalidValue)?;
    Ok(Some(format!("✅ Set {} to: {}", key.as_str(), value)))
}

pub fn apply_unset(config: &mut Config, key: &str) -> Result<String, SettingError> {
    let key = parse_key(key)?;
    config.unset(key);
    Ok(format!("✅ Unset {}", key.as_str()))
}

fn print_settings(config: &Config) {
    match Config::config_path() {
        Ok(path) => println!("quickreply settings ({}):", path_display(path)),
        Err(_) => println!("quickreply settings:"),
    }
    config.print_all();
}

pub fn run_set(key: &str, value: &[String]) -> Result<(), SettingError> {
    let mut config = Config::load().map_err(|e| SettingError::ConfigError(e.to_string()))?;
    match apply_set(&mut config, key, value)? {
        Some(message) => {
            config
                .save()
                .map_err(|e| SettingError::ConfigError(e.to_string()))?;
            println!("{message}");
        }
        None => print_settings(&config),
    }
    Ok(())
}

pub fn run_unset(key: &str) -> Result<(), SettingError> {
    let mut config = Config::load().map_err(|e| SettingError::ConfigError(e.to_string()))?;
    let message = apply_unset(&mut config, key)?;
    config
        .save()
        .map_err(|e| SettingError::ConfigError(e.to_string()))?;
    println!("{message}");
    Ok(())
}
