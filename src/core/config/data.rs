use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Optional on-disk settings. Every field falls back to a built-in default.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Config {
    /// Persona loaded into the persona editor at startup
    pub persona: Option<String>,
    /// Gemini model identifier (e.g., "gemini-1.5-flash-latest")
    pub model: Option<String>,
    /// API base URL, without the `/models/...` suffix
    pub base_url: Option<String>,
    /// Name of the environment variable holding the API key
    pub api_key_env: Option<String>,
    /// Send only this many of the most recent turns with each request
    pub history_window: Option<usize>,
}

/// Keys accepted by `quickreply set` / `quickreply unset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    Persona,
    Model,
    BaseUrl,
    ApiKeyEnv,
    HistoryWindow,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 5] = [
        ConfigKey::Persona,
        ConfigKey::Model,
        ConfigKey::BaseUrl,
        ConfigKey::ApiKeyEnv,
        ConfigKey::HistoryWindow,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ConfigKey::Persona => "persona",
            ConfigKey::Model => "model",
            ConfigKey::BaseUrl => "base-url",
            ConfigKey::ApiKeyEnv => "api-key-env",
            ConfigKey::HistoryWindow => "history-window",
        }
    }

    pub fn parse(input: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == input)
    }
}

impl Config {
    pub fn get(&self, key: ConfigKey) -> Option<String> {
        match key {
            ConfigKey::Persona => self.persona.clone(),
            ConfigKey::Model => self.model.clone(),
            ConfigKey::BaseUrl => self.base_url.clone(),
            ConfigKey::ApiKeyEnv => self.api_key_env.clone(),
            ConfigKey::HistoryWindow => self.history_window.map(|n| n.to_string()),
        }
    }

    /// Store `value` under `key`. Only `history-window` can reject input.
    pub fn set(&mut self, key: ConfigKey, value: String) -> Result<(), String> {
        match key {
            ConfigKey::Persona => self.persona = Some(value),
            ConfigKey::Model => self.model = Some(value),
            ConfigKey::BaseUrl => self.base_url = Some(value),
            ConfigKey::ApiKeyEnv => self.api_key_env = Some(value),
            ConfigKey::HistoryWindow => {
                let turns = value
                    .trim()
                    .parse::<usize>()
                    .ok()
                    .filter(|n| *n > 0)
                    .ok_or_else(|| format!("history-window must be a positive number, got '{value}'"))?;
                self.history_window = Some(turns);
            }
        }
        Ok(())
    }

    pub fn unset(&mut self, key: ConfigKey) {
        match key {
            ConfigKey::Persona => self.persona = None,
            ConfigKey::Model => self.model = None,
            ConfigKey::BaseUrl => self.base_url = None,
            ConfigKey::ApiKeyEnv => self.api_key_env = None,
            ConfigKey::HistoryWindow => self.history_window = None,
        }
    }

    pub fn print_all(&self) {
        for key in ConfigKey::ALL {
            match self.get(key) {
                Some(value) => println!("  {}: {}", key.as_str(), value),
                None => println!("  {}: (unset)", key.as_str()),
            }
        }
    }
}

pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    #[cfg(unix)]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let home_path = PathBuf::from(home);
            if let Ok(relative) = path.strip_prefix(&home_path) {
                return format!("~/{}", relative.display());
            }
        }
    }

    path.display().to_string()
}
