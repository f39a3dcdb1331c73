use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct HubConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub generator: GeneratorConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    pub db_path: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Base URL of the Ollama-compatible service, without the `/api/...` suffix.
    pub base_url: String,
    pub model: String,
    pub backup_models: Vec<String>,
    /// Attempts against the primary model before the backups are tried.
    pub max_attempts: u32,
    pub timeout_secs: u64,
    pub health_timeout_secs: u64,
    /// Natural language the mentors are told to answer in.
    pub language: String,
    pub options: SamplingOptions,
}

/// Sampling options forwarded verbatim in the `options` object of a generate call.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct SamplingOptions {
    pub temperature: f32,
    pub top_p: f32,
    pub num_predict: u32,
    pub repeat_penalty: f32,
    pub num_ctx: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 5002,
            log_level: "info".into(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        let db_path = default_hub_dir()
            .join("mentors.db")
            .to_string_lossy()
            .into_owned();
        Self { db_path }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".into(),
            model: "llama3.2:latest".into(),
            backup_models: vec!["llama2:latest".into()],
            max_attempts: 3,
            timeout_secs: 30,
            health_timeout_secs: 5,
            language: "Polish".into(),
            options: SamplingOptions::default(),
        }
    }
}

impl Default for SamplingOptions {
    fn default() -> Self {
        // A small context window keeps every request free of prior turns.
        Self {
            temperature: 0.7,
            top_p: 0.9,
            num_predict: 200,
            repeat_penalty: 1.1,
            num_ctx: 1024,
        }
    }
}

impl GeneratorConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn health_timeout(&self) -> Duration {
        Duration::from_secs(self.health_timeout_secs)
    }
}

/// Returns `~/.mentor-hub/`, or `./.mentor-hub/` when no home directory is known.
pub fn default_hub_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".mentor-hub")
}

/// Returns the default config file path: `~/.mentor-hub/config.toml`
pub fn default_config_path() -> PathBuf {
    default_hub_dir().join("config.toml")
}

impl HubConfig {
    /// Load config from TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            HubConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides (MENTOR_DB, MENTOR_LOG_LEVEL, MENTOR_HOST,
    /// MENTOR_PORT, MENTOR_OLLAMA_URL, MENTOR_MODEL).
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("MENTOR_DB") {
            self.storage.db_path = val;
        }
        if let Ok(val) = std::env::var("MENTOR_LOG_LEVEL") {
            self.server.log_level = val;
        }
        if let Ok(val) = std::env::var("MENTOR_HOST") {
            self.server.host = val;
        }
        if let Ok(val) = std::env::var("MENTOR_PORT") {
            match val.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!(value = %val, "ignoring invalid MENTOR_PORT"),
            }
        }
        if let Ok(val) = std::env::var("MENTOR_OLLAMA_URL") {
            self.generator.base_url = val;
        }
        if let Ok(val) = std::env::var("MENTOR_MODEL") {
            self.generator.model = val;
        }
    }

    /// Resolve the database path, expanding `~` if needed.
    pub fn resolved_db_path(&self) -> PathBuf {
        expand_tilde(&self.storage.db_path)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
