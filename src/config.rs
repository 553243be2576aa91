//! Application configuration
//!
//! Read from `config.toml` in the data directory. A missing file means
//! defaults; a file that fails to parse is an error, not silently
//! ignored, so typos do not turn the suggester off behind the user's
//! back.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub suggest: SuggestConfig,
}

/// Settings for the meaning suggestion client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestConfig {
    /// Whether `--ai` adds consult the suggester at all
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Base URL of an OpenAI-compatible API
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_enabled() -> bool {
    true
}
fn default_base_url() -> String {
    "https://api.openai.com".to_string()
}
fn default_model() -> String {
    "gpt-4.1-mini".to_string()
}
fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}
fn default_timeout_secs() -> u64 {
    20
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            base_url: default_base_url(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl AppConfig {
    /// Load `config.toml` from `data_dir`, falling back to defaults
    /// when the file does not exist
    pub fn load(data_dir: &Path) -> Result<Self, ConfigError> {
        let path = data_dir.join("config.toml");
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }
}
