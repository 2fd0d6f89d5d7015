//! Configuration management for promptline

use crate::error::{AppError, Result};
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File in the working directory holding the system prompt.
pub const SYSTEM_PROMPT_FILE: &str = "prompts.txt";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// OpenAI API key
    pub api_key: Option<String>,

    /// Model to use for completions
    #[serde(default = "default_model")]
    pub model: String,

    /// Maximum tokens for response
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Base URL for the API (e.g., "https://api.openai.com" or custom endpoint)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API endpoint path
    #[serde(default = "default_api_path")]
    pub api_path: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            max_tokens: default_max_tokens(),
            base_url: default_base_url(),
            api_path: default_api_path(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Config {
    /// Load configuration from the config file and environment.
    ///
    /// A missing API key is not an error here; the completion client
    /// demands the credential only when a request is actually sent.
    pub async fn load() -> Result<Self> {
        let mut config = Self::load_from_file().await.unwrap_or_default();

        // Override with environment variables
        if let Ok(api_key) = std::env::var("OPENAI_API_KEY") {
            config.api_key = Some(api_key);
        }

        if let Ok(model) = std::env::var("OPENAI_MODEL") {
            config.model = model;
        }

        if let Ok(max_tokens) = std::env::var("OPENAI_MAX_TOKENS") {
            config.max_tokens = max_tokens
                .parse()
                .map_err(|_| AppError::ConfigError("Invalid max_tokens value".to_string()))?;
        }

        if let Ok(base_url) = std::env::var("OPENAI_BASE_URL") {
            config.base_url = base_url;
        }

        if let Ok(api_path) = std::env::var("OPENAI_API_PATH") {
            config.api_path = api_path;
        }

        Ok(config)
    }

    /// Load configuration from file
    async fn load_from_file() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = tokio::fs::read_to_string(&config_path).await?;
        let config: Self =
            toml::from_str(&content).map_err(|e| AppError::ConfigError(e.to_string()))?;

        Ok(config)
    }

    /// Get the configuration file path
    fn config_path() -> Result<PathBuf> {
        let mut path = config_dir()
            .ok_or_else(|| AppError::ConfigError("Could not find config directory".to_string()))?;
        path.push("promptline");
        path.push("config.toml");
        Ok(path)
    }

    /// Get the API key
    pub fn api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or(AppError::ApiKeyNotFound)
    }

    /// Get the full API URL
    pub fn api_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.api_path)
    }
}

/// Read the system prompt from `prompts.txt` in the working directory.
///
/// An absent file yields an empty prompt; only a file that exists but
/// cannot be read is an error.
pub async fn load_system_prompt() -> Result<String> {
    load_system_prompt_from(Path::new(SYSTEM_PROMPT_FILE)).await
}

/// Read the system prompt from an explicit path (used by tests).
pub async fn load_system_prompt_from(path: &Path) -> Result<String> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => Ok(content.trim().to_string()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(AppError::ConfigError(e.to_string())),
    }
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_max_tokens() -> u32 {
    4096
}

fn default_base_url() -> String {
    "https://api.openai.com".to_string()
}

fn default_api_path() -> String {
    "/v1/chat/completions".to_string()
}

fn default_timeout() -> u64 {
    30
}
