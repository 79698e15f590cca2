//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Claim loading or artifact writing failed
    #[error("Storage error: {0}")]
    Store(#[from] veritas_store::StoreError),

    /// The comparison run could not start
    #[error("Comparison error: {0}")]
    Comparator(#[from] veritas_comparator::ComparatorError),

    /// A model provider could not be set up
    #[error("Provider error: {0}")]
    Provider(#[from] veritas_llm::LlmError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
