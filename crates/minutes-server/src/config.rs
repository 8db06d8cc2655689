//! Configuration file parsing for the server.
//!
//! Loads the bind address, the Ollama connection, the document output
//! directory, CORS origins and an embedded `[extractor]` table from TOML.

use minutes_extractor::ExtractorConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Server configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A value is present but unusable
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

/// Server configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1")
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Bind port
    #[serde(default = "default_bind_port")]
    pub bind_port: u16,

    /// Ollama API base URL
    #[serde(default = "default_ollama_endpoint")]
    pub ollama_endpoint: String,

    /// Model used for the secondary pass
    #[serde(default = "default_ollama_model")]
    pub ollama_model: String,

    /// Directory generated documents are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Allowed browser origins; empty allows any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Extraction settings
    #[serde(default)]
    pub extractor: ExtractorConfig,
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_bind_port() -> u16 {
    5000
}

fn default_ollama_endpoint() -> String {
    "http://localhost:11434".to_string()
}

fn default_ollama_model() -> String {
    "llama3".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            bind_port: default_bind_port(),
            ollama_endpoint: default_ollama_endpoint(),
            ollama_model: default_ollama_model(),
            output_dir: default_output_dir(),
            cors_origins: Vec::new(),
            extractor: ExtractorConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: ServerConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.ollama_model.trim().is_empty() {
            return Err(ConfigError::InvalidValue("ollama_model is empty".to_string()));
        }
        self.extractor
            .validate()
            .map_err(|e| ConfigError::InvalidValue(e.to_string()))
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }
}
