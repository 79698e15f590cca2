//! Configuration management for the CLI.
//!
//! The configuration file is TOML with four tables:
//!
//! ```toml
//! [comparison]   # thresholds, time window, worker pool
//! core_threshold = 0.85
//!
//! [services]     # scoring providers
//! provider = "ollama"
//!
//! [paths]        # default input and output locations
//! inputs = ["data/claims"]
//! output = "data/events/events_clusters.json"
//!
//! [settings]     # output rendering
//! color = true
//! ```
//!
//! Every table and key is optional.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use veritas_comparator::ComparatorConfig;

/// CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Comparison run settings
    #[serde(default)]
    pub comparison: ComparatorConfig,

    /// Scoring service settings
    #[serde(default)]
    pub services: ServicesConfig,

    /// Input and output locations
    #[serde(default)]
    pub paths: PathsConfig,

    /// Rendering settings
    #[serde(default)]
    pub settings: Settings,
}

/// Which scoring services to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Local hashed embeddings and neutral sentiment
    Hashed,
    /// Ollama server for both services
    Ollama,
}

/// Scoring service settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServicesConfig {
    /// Provider for embeddings and sentiment
    pub provider: ProviderKind,

    /// Ollama API endpoint
    pub ollama_endpoint: String,

    /// Ollama embedding model
    pub embedding_model: String,

    /// Ollama model used for polarity
    pub sentiment_model: String,

    /// Attempts per Ollama request
    pub max_retries: u32,

    /// Vector size of the hashed embedding model
    pub hashed_dimension: usize,
}

/// Input and output locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Claim batch files or directories
    pub inputs: Vec<PathBuf>,

    /// Event artifact path
    pub output: PathBuf,
}

/// Rendering settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Enable colored output
    pub color: bool,

    /// Default output format
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the default configuration file path (`~/.veritas/config.toml`).
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".veritas").join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, the default path is used if
    /// it exists, and built-in defaults otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Ok(path) if path.exists() => path,
                _ => {
                    tracing::debug!("No configuration file, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        let contents = fs::read_to_string(&path).map_err(|e| {
            CliError::Config(format!("Cannot read {}: {}", path.display(), e))
        })?;
        let config = Self::from_toml(&contents)?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        self.comparison.validate().map_err(CliError::Config)?;
        if self.services.hashed_dimension == 0 {
            return Err(CliError::Config(
                "services.hashed_dimension must be greater than 0".into(),
            ));
        }
        if self.services.max_retries == 0 {
            return Err(CliError::Config(
                "services.max_retries must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Hashed,
            ollama_endpoint: veritas_llm::ollama::DEFAULT_ENDPOINT.to_string(),
            embedding_model: veritas_llm::ollama::DEFAULT_EMBEDDING_MODEL.to_string(),
            sentiment_model: veritas_llm::ollama::DEFAULT_SENTIMENT_MODEL.to_string(),
            max_retries: veritas_llm::ollama::DEFAULT_MAX_RETRIES,
            hashed_dimension: 384,
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            inputs: vec![PathBuf::from("data/claims")],
            output: PathBuf::from("data/events/events_clusters.json"),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}
