//! Configuration for the confab client.
//!
//! Settings live in a JSON file under the user config directory. The API
//! key is deliberately not part of the file; it comes from the environment
//! at startup.

use crate::chat::DEFAULT_GREETING;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration for confab.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Completions endpoint URL.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Model identifier sent with every request.
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature sent with every request.
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Assistant greeting that opens every conversation.
    #[serde(default = "default_greeting")]
    pub greeting: String,
}

fn default_api_url() -> String {
    "https://api.openai.com/v1/chat/completions".into()
}

fn default_model() -> String {
    "gpt-4o-mini".into()
}

fn default_temperature() -> f32 {
    0.8
}

fn default_greeting() -> String {
    DEFAULT_GREETING.into()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            model: default_model(),
            temperature: default_temperature(),
            greeting: default_greeting(),
        }
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        serde_json::from_str(&content).map_err(ConfigError::Parse)
    }

    /// Save configuration to a file, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::Io)?;
        }
        std::fs::write(path, content).map_err(ConfigError::Io)
    }

    /// Load from the default path, falling back to defaults when the file
    /// is absent or unreadable.
    pub fn load_or_default() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        Self::load(&path).unwrap_or_else(|err| {
            tracing::warn!(path = %path.display(), error = %err, "ignoring unreadable config");
            Self::default()
        })
    }

    /// Default config file location (`~/.config/confab/config.json`).
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("confab").join("config.json"))
    }

    /// Default diagnostic log location (`~/.config/confab/confab.log`).
    pub fn default_log_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("confab").join("confab.log"))
    }

    /// Read the API key from the environment.
    ///
    /// `CONFAB_API_KEY` wins over `OPENAI_API_KEY`.
    pub fn api_key_from_env() -> Option<String> {
        std::env::var("CONFAB_API_KEY")
            .or_else(|_| std::env::var("OPENAI_API_KEY"))
            .ok()
            .filter(|key| !key.is_empty())
    }
}

/// Errors that can occur loading or saving configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[source] std::io::Error),

    /// JSON parse error.
    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// JSON serialization error.
    #[error("Serialization error: {0}")]
    Serialize(#[source] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.model, "gpt-4o-mini");
        assert!((config.temperature - 0.8).abs() < f32::EPSILON);
        assert!(config.api_url.contains("chat/completions"));
        assert_eq!(config.greeting, DEFAULT_GREETING);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = Config {
            model: "gpt-4o".into(),
            temperature: 0.2,
            ..Config::default()
        };
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.model, "gpt-4o");
        assert!((loaded.temperature - 0.2).abs() < f32::EPSILON);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"model": "local-llm"}"#).unwrap();
        assert_eq!(config.model, "local-llm");
        assert_eq!(config.api_url, default_api_url());
        assert_eq!(config.greeting, DEFAULT_GREETING);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
