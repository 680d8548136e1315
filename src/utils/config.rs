//! TOML + environment configuration.
//!
//! Every section of `hackrx.toml` is optional and falls back to defaults, so
//! the service runs with no file at all. Secrets never live in the file: the
//! file names the environment variables that hold them.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use tracing::warn;

/// Bearer token used when the configured token variable is unset.
pub const DEFAULT_BEARER_TOKEN: &str = "secret";

/// Configuration file read when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "hackrx.toml";

/// Root configuration structure loaded from hackrx.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub gemini: GeminiConfig,

    #[serde(default)]
    pub rag: RagConfig,
}

// ============= Server Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Maximum accepted request body, in bytes
    #[serde(default = "default_body_limit")]
    pub body_limit: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_body_limit() -> usize {
    1024 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            body_limit: default_body_limit(),
        }
    }
}

// ============= Authentication Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Environment variable name containing the bearer token
    #[serde(default = "default_token_env")]
    pub token_env: String,
}

fn default_token_env() -> String {
    "API_KEY".to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_env: default_token_env(),
        }
    }
}

// ============= Gemini Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// Environment variable name containing the Google API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_api_base")]
    pub api_base: String,

    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,

    #[serde(default = "default_task_type")]
    pub task_type: String,

    #[serde(default = "default_generation_model")]
    pub generation_model: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_key_env() -> String {
    "GOOGLE_API_KEY".to_string()
}

fn default_api_base() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_embedding_model() -> String {
    "models/embedding-001".to_string()
}

fn default_task_type() -> String {
    "RETRIEVAL_QUERY".to_string()
}

fn default_generation_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key_env: default_api_key_env(),
            api_base: default_api_base(),
            embedding_model: default_embedding_model(),
            task_type: default_task_type(),
            generation_model: default_generation_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

// ============= RAG Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RagConfig {
    /// Maximum chunk length in characters
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Nearest neighbors retrieved per question
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Concurrent embedding requests; 0 means available parallelism
    #[serde(default)]
    pub embed_workers: usize,

    /// Base name shared by the persisted index and texts files
    #[serde(default = "default_index_base_name")]
    pub index_base_name: String,
}

fn default_chunk_size() -> usize {
    500
}

fn default_top_k() -> usize {
    3
}

fn default_index_base_name() -> String {
    "policy_index".to_string()
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            top_k: default_top_k(),
            embed_workers: 0,
            index_base_name: default_index_base_name(),
        }
    }
}

impl RagConfig {
    /// Resolved embedding concurrency.
    pub fn workers(&self) -> usize {
        if self.embed_workers > 0 {
            return self.embed_workers;
        }
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    }
}

// ============= Configuration Loading & Validation =============

/// Errors that can occur during configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Environment variable '{0}' is not set")]
    MissingEnvVar(String),
}

impl Config {
    /// Load configuration from an optional TOML file plus the environment.
    ///
    /// A `.env` file is honoured. A missing TOML file is not an error; the
    /// defaults are used instead. `HOST` and `PORT` override the server
    /// section.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let mut config = match path {
            Some(path) if path.exists() => Self::from_file(path)?,
            _ => Config::default(),
        };

        config.apply_env_overrides(|name| env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML file without touching the environment.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| ConfigError::ValidationError(format!("Invalid PORT: {}", port)))?;
        }
        Ok(())
    }

    /// Validate the configuration for internal consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rag.chunk_size == 0 {
            return Err(ConfigError::ValidationError(
                "rag.chunk_size must be greater than 0".to_string(),
            ));
        }
        if self.rag.top_k == 0 {
            return Err(ConfigError::ValidationError(
                "rag.top_k must be greater than 0".to_string(),
            ));
        }
        if self.rag.index_base_name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "rag.index_base_name must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Get the Google API key from the environment. Required at startup.
    pub fn google_api_key(&self) -> Result<String, ConfigError> {
        self.google_api_key_with(|name| env::var(name).ok())
    }

    fn google_api_key_with<F>(&self, lookup: F) -> Result<String, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        lookup(&self.gemini.api_key_env)
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(self.gemini.api_key_env.clone()))
    }

    /// Get the bearer token from the environment, or the built-in default.
    pub fn bearer_token(&self) -> String {
        self.bearer_token_with(|name| env::var(name).ok())
    }

    fn bearer_token_with<F>(&self, lookup: F) -> String
    where
        F: Fn(&str) -> Option<String>,
    {
        lookup(&self.auth.token_env).unwrap_or_else(|| {
            warn!(
                env = %self.auth.token_env,
                "Bearer token variable not set, falling back to the built-in default token"
            );
            DEFAULT_BEARER_TOKEN.to_string()
        })
    }

    /// Socket address string the server binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
