//! Runtime configuration, read from `factory-floor.toml`.
//!
//! ```toml
//! data_dir = "./data"
//! channel_buffer = 32
//!
//! [ai]
//! api_key = "..."
//! model = "gemini-2.5-flash"
//! endpoint = "https://generativelanguage.googleapis.com"
//! timeout_secs = 30
//! ```
//!
//! Every field is optional. The environment then overrides the file:
//! `FACTORY_FLOOR_DATA_DIR`, `GEMINI_API_KEY` (or `API_KEY`),
//! `FACTORY_FLOOR_MODEL` and `FACTORY_FLOOR_AI_ENDPOINT`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "factory-floor.toml";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("channel_buffer must be at least 1")]
    InvalidChannelBuffer,
}

/// Settings of the generative-AI summarizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiConfig {
    /// Without a key the analysis answers with its fallback message.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantConfig {
    /// Directory holding one JSON file per collection.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Capacity of each actor's request channel. Must be at least 1.
    #[serde(default = "default_channel_buffer")]
    pub channel_buffer: usize,
    #[serde(default)]
    pub ai: AiConfig,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_channel_buffer() -> usize {
    32
}

impl Default for PlantConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            channel_buffer: default_channel_buffer(),
            ai: AiConfig::default(),
        }
    }
}

impl PlantConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.channel_buffer == 0 {
            return Err(ConfigError::InvalidChannelBuffer);
        }
        Ok(())
    }

    /// Loads `path` if it exists, the defaults otherwise.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Applies the process environment on top of the loaded values.
    pub fn with_env(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides looked up by variable name. Empty values are ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(dir) = var("FACTORY_FLOOR_DATA_DIR") {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(key) = var("GEMINI_API_KEY").or_else(|| var("API_KEY")) {
            self.ai.api_key = Some(key);
        }
        if let Some(model) = var("FACTORY_FLOOR_MODEL") {
            self.ai.model = model;
        }
        if let Some(endpoint) = var("FACTORY_FLOOR_AI_ENDPOINT") {
            self.ai.endpoint = endpoint;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn empty_file_gives_defaults() {
        let config = PlantConfig::parse("").unwrap();
        assert_eq!(config, PlantConfig::default());
        assert_eq!(config.channel_buffer, 32);
        assert_eq!(config.ai.model, DEFAULT_MODEL);
        assert_eq!(config.ai.timeout_secs, 30);
        assert!(config.ai.api_key.is_none());
    }

    #[test]
    fn file_values_are_read() {
        let config = PlantConfig::parse(
            r#"
data_dir = "/var/lib/plant"

[ai]
model = "gemini-pro"
timeout_secs = 5
"#,
        )
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/var/lib/plant"));
        assert_eq!(config.channel_buffer, 32);
        assert_eq!(config.ai.model, "gemini-pro");
        assert_eq!(config.ai.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.ai.timeout_secs, 5);
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let err = PlantConfig::parse("channel_buffer = \"many\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn zero_channel_buffer_is_rejected() {
        let err = PlantConfig::parse("channel_buffer = 0").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidChannelBuffer));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, "channel_buffer = 0\n").unwrap();
        assert!(matches!(
            PlantConfig::load_or_default(&path),
            Err(ConfigError::InvalidChannelBuffer)
        ));

        assert_eq!(PlantConfig::parse("channel_buffer = 1").unwrap().channel_buffer, 1);
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = PlantConfig::load_or_default(&dir.path().join(DEFAULT_CONFIG_FILE)).unwrap();
        assert_eq!(config, PlantConfig::default());
    }

    #[test]
    fn environment_overrides_the_file() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("FACTORY_FLOOR_DATA_DIR", "/tmp/plant"),
            ("API_KEY", "fallback-key"),
            ("FACTORY_FLOOR_MODEL", ""),
        ]);
        let config = PlantConfig::default().with_overrides(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.data_dir, PathBuf::from("/tmp/plant"));
        assert_eq!(config.ai.api_key.as_deref(), Some("fallback-key"));
        assert_eq!(config.ai.model, DEFAULT_MODEL);
    }

    #[test]
    fn gemini_key_wins_over_generic_key() {
        let env: HashMap<&str, &str> =
            HashMap::from([("GEMINI_API_KEY", "gemini"), ("API_KEY", "generic")]);
        let config = PlantConfig::default().with_overrides(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(config.ai.api_key.as_deref(), Some("gemini"));
    }
}
