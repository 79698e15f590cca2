//! Veritas Model Provider Layer
//!
//! Implementations of the scoring-service traits from `veritas-domain`.
//!
//! # Providers
//!
//! - `MockSentiment`: deterministic polarity labels for testing
//! - `MockEmbedding`: scripted vectors for testing
//! - `OllamaProvider`: local Ollama API integration (embeddings and polarity)
//!
//! # Examples
//!
//! ```
//! use veritas_llm::MockSentiment;
//! use veritas_domain::{Polarity, SentimentService};
//!
//! let service = MockSentiment::new(Polarity::Neutral);
//! assert_eq!(service.classify("any sentence").unwrap(), Polarity::Neutral);
//! ```

#![warn(missing_docs)]

pub mod ollama;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use veritas_domain::{EmbeddingService, Polarity, SentimentService};

pub use ollama::OllamaProvider;

/// Errors that can occur when calling a model service
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from the service
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("Model error: {0}")]
    Other(String),
}

impl LlmError {
    /// Whether the error concerns the service rather than the request
    pub fn is_unavailable(&self) -> bool {
        matches!(self, LlmError::Communication(_) | LlmError::ModelNotAvailable(_))
    }
}

#[derive(Debug, Clone)]
enum Scripted<T> {
    Value(T),
    Fail,
}

/// Mock sentiment service for deterministic testing
///
/// Returns a default polarity for every sentence unless a specific label or
/// an error has been registered for it. Clones share state.
///
/// # Examples
///
/// ```
/// use veritas_llm::MockSentiment;
/// use veritas_domain::{Polarity, SentimentService};
///
/// let mut service = MockSentiment::default();
/// service.add_response("Talks failed.", Polarity::Negative);
/// service.add_error("Broken input.");
///
/// assert_eq!(service.classify("Talks failed.").unwrap(), Polarity::Negative);
/// assert_eq!(service.classify("Other.").unwrap(), Polarity::Neutral);
/// assert!(service.classify("Broken input.").is_err());
/// assert_eq!(service.call_count(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct MockSentiment {
    default_label: Polarity,
    responses: Arc<Mutex<HashMap<String, Scripted<Polarity>>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockSentiment {
    /// Create a mock that labels every sentence with `label`
    pub fn new(label: Polarity) -> Self {
        Self {
            default_label: label,
            responses: Arc::new(Mutex::new(HashMap::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Register a label for a specific sentence
    pub fn add_response(&mut self, sentence: impl Into<String>, label: Polarity) {
        self.responses
            .lock()
            .unwrap()
            .insert(sentence.into(), Scripted::Value(label));
    }

    /// Configure to fail for a specific sentence
    pub fn add_error(&mut self, sentence: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .insert(sentence.into(), Scripted::Fail);
    }

    /// Get the number of times classify was called
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        *self.call_count.lock().unwrap() = 0;
    }
}

impl Default for MockSentiment {
    fn default() -> Self {
        Self::new(Polarity::Neutral)
    }
}

impl SentimentService for MockSentiment {
    type Error = LlmError;

    fn classify(&self, sentence: &str) -> Result<Polarity, Self::Error> {
        *self.call_count.lock().unwrap() += 1;

        match self.responses.lock().unwrap().get(sentence) {
            Some(Scripted::Value(label)) => Ok(*label),
            Some(Scripted::Fail) => Err(LlmError::Other("Mock error".to_string())),
            None => Ok(self.default_label),
        }
    }
}

/// Mock embedding service with scripted vectors
///
/// Sentences without a registered vector are encoded as `default_vector`.
/// A sentence registered with `add_error` fails both on its own and inside
/// any batch that contains it, mirroring a remote service that rejects the
/// whole request.
#[derive(Debug, Clone)]
pub struct MockEmbedding {
    default_vector: Vec<f32>,
    vectors: Arc<Mutex<HashMap<String, Scripted<Vec<f32>>>>>,
    encoded: Arc<Mutex<Vec<String>>>,
    batch_calls: Arc<Mutex<usize>>,
    single_calls: Arc<Mutex<usize>>,
    offline: Arc<Mutex<bool>>,
}

impl MockEmbedding {
    /// Create a mock returning `default_vector` for unknown sentences
    pub fn new(default_vector: Vec<f32>) -> Self {
        Self {
            default_vector,
            vectors: Arc::new(Mutex::new(HashMap::new())),
            encoded: Arc::new(Mutex::new(Vec::new())),
            batch_calls: Arc::new(Mutex::new(0)),
            single_calls: Arc::new(Mutex::new(0)),
            offline: Arc::new(Mutex::new(false)),
        }
    }

    /// Register the vector for a specific sentence
    pub fn add_vector(&mut self, sentence: impl Into<String>, vector: Vec<f32>) {
        self.vectors
            .lock()
            .unwrap()
            .insert(sentence.into(), Scripted::Value(vector));
    }

    /// Configure to fail for a specific sentence
    pub fn add_error(&mut self, sentence: impl Into<String>) {
        self.vectors
            .lock()
            .unwrap()
            .insert(sentence.into(), Scripted::Fail);
    }

    /// Every sentence successfully encoded so far, in call order
    pub fn encoded(&self) -> Vec<String> {
        self.encoded.lock().unwrap().clone()
    }

    /// Number of `encode_batch` calls made
    pub fn batch_calls(&self) -> usize {
        *self.batch_calls.lock().unwrap()
    }

    /// Number of `encode` calls made, failed ones included
    pub fn single_calls(&self) -> usize {
        *self.single_calls.lock().unwrap()
    }

    /// Fail every request with a communication error
    pub fn set_offline(&mut self, offline: bool) {
        *self.offline.lock().unwrap() = offline;
    }

    fn lookup(&self, sentence: &str) -> Result<Vec<f32>, LlmError> {
        if *self.offline.lock().unwrap() {
            return Err(LlmError::Communication("Mock embedding service offline".to_string()));
        }
        match self.vectors.lock().unwrap().get(sentence) {
            Some(Scripted::Value(vector)) => Ok(vector.clone()),
            Some(Scripted::Fail) => Err(LlmError::Other(format!(
                "Mock embedding error for '{}'",
                sentence
            ))),
            None => Ok(self.default_vector.clone()),
        }
    }
}

impl EmbeddingService for MockEmbedding {
    type Error = LlmError;

    fn encode(&self, sentence: &str) -> Result<Vec<f32>, Self::Error> {
        *self.single_calls.lock().unwrap() += 1;
        let vector = self.lookup(sentence)?;
        self.encoded.lock().unwrap().push(sentence.to_string());
        Ok(vector)
    }

    fn encode_batch(&self, sentences: &[&str]) -> Result<Vec<Vec<f32>>, Self::Error> {
        *self.batch_calls.lock().unwrap() += 1;
        let vectors = sentences
            .iter()
            .map(|s| self.lookup(s))
            .collect::<Result<Vec<_>, _>>()?;
        self.encoded
            .lock()
            .unwrap()
            .extend(sentences.iter().map(|s| s.to_string()));
        Ok(vectors)
    }

    fn is_unavailable(&self, error: &Self::Error) -> bool {
        error.is_unavailable()
    }
}
