//! dealcoach configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Read `.env` into the process environment, returning the file used
///
/// Variables already set are kept. Runs before logging is set up so that
/// `RUST_LOG` can come from the file too.
pub fn load_dotenv() -> Option<PathBuf> {
    dotenvy::dotenv().ok()
}

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// LLM provider configuration
    pub llm: LlmConfig,

    /// Per-request generation parameters
    pub generation: GenerationConfig,

    /// HTTP server configuration
    pub server: ServerConfig,

    /// Prompt template overrides
    pub prompts: PromptsConfig,
}

impl Config {
    /// Validate configuration before use
    ///
    /// Call this early in startup to fail fast with clear error messages.
    pub fn validate(&self) -> Result<()> {
        if std::env::var(&self.llm.api_key_env).is_err() {
            return Err(eyre::eyre!(
                "LLM API key not found. Set the {} environment variable.",
                self.llm.api_key_env
            ));
        }
        if self.generation.max_tokens == 0 || self.generation.inference_max_tokens == 0 {
            return Err(eyre::eyre!("generation token budgets must be greater than zero"));
        }
        Ok(())
    }

    /// Load configuration with fallback chain
    ///
    /// Call `load_dotenv` first so the API key and `PORT` can come from `.env`.
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        let mut config = Self::resolve(config_path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    fn resolve(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .dealcoach.yml
        let local_config = PathBuf::from(".dealcoach.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/dealcoach/dealcoach.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("dealcoach").join("dealcoach.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// `PORT` wins over the configured port, as hosting platforms expect
    fn apply_env_overrides(&mut self) {
        if let Ok(port) = std::env::var("PORT") {
            match port.parse::<u16>() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!("Ignoring invalid PORT value: {}", port),
            }
        }
    }
}

/// LLM provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider name (currently only "anthropic" supported)
    pub provider: String,

    /// Model identifier
    pub model: String,

    /// Environment variable containing the API key
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    /// API base URL
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// HTTP request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl LlmConfig {
    /// Read the API key from the configured environment variable
    pub fn get_api_key(&self) -> Result<String> {
        let key = std::env::var(&self.api_key_env)
            .map_err(|_| eyre::eyre!("Environment variable {} is not set", self.api_key_env))?;
        if key.trim().is_empty() {
            return Err(eyre::eyre!("Environment variable {} is empty", self.api_key_env));
        }
        Ok(key)
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "anthropic".to_string(),
            model: "claude-opus-4-1-20250805".to_string(),
            api_key_env: "CLAUDE_API_KEY".to_string(),
            base_url: "https://api.anthropic.com".to_string(),
            timeout_ms: 120_000,
        }
    }
}

/// Token budgets and the completion deadline
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Budget for plans, battlecards, reports and chat turns
    #[serde(rename = "max-tokens")]
    pub max_tokens: u32,

    /// Budget for the competitor-name inference request
    #[serde(rename = "inference-max-tokens")]
    pub inference_max_tokens: u32,

    /// Upper bound on one completion call, in milliseconds
    #[serde(rename = "completion-timeout-ms")]
    pub completion_timeout_ms: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_tokens: 8000,
            inference_max_tokens: 50,
            completion_timeout_ms: 60_000,
        }
    }
}

impl GenerationConfig {
    pub fn completion_timeout(&self) -> Duration {
        Duration::from_millis(self.completion_timeout_ms)
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,

    pub port: u16,

    /// Directory served at `/` (the browser front end)
    #[serde(rename = "static-dir")]
    pub static_dir: PathBuf,

    /// Sessions untouched for this long are dropped
    #[serde(rename = "session-idle-ttl-secs")]
    pub session_idle_ttl_secs: u64,

    /// Upper bound on live sessions; the least recently used goes first
    #[serde(rename = "max-sessions")]
    pub max_sessions: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            static_dir: PathBuf::from("public"),
            session_idle_ttl_secs: 3600,
            max_sessions: 1000,
        }
    }
}

impl ServerConfig {
    pub fn session_idle_ttl(&self) -> Duration {
        Duration::from_secs(self.session_idle_ttl_secs)
    }
}

/// Prompt template configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptsConfig {
    /// Directory with `<template>.pmt` overrides
    pub dir: Option<PathBuf>,
}

impl PromptsConfig {
    /// Expand a leading `~/` in the override directory
    pub fn expanded_dir(&self) -> Option<PathBuf> {
        self.dir.as_ref().and_then(|p| match p.strip_prefix("~") {
            Ok(rest) => dirs::home_dir().map(|home| home.join(rest)),
            Err(_) => Some(p.clone()),
        })
    }
}
