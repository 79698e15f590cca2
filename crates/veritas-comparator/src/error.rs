//! Error types for comparison runs

use thiserror::Error;

/// Errors that abort a comparison run
#[derive(Error, Debug)]
pub enum ComparatorError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The worker pool could not be started
    #[error("Worker pool error: {0}")]
    WorkerPool(String),
}
