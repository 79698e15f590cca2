//! Local embedding model and vector similarity
//!
//! `HashedEmbeddingModel` is a deterministic feature-hashing model: each
//! lower-cased word token is hashed into one of `dimension` buckets with a
//! hashed sign, and the result is normalized to unit length. Sentences that
//! share most of their words land close together, which is enough for offline
//! runs and tests without a model server.
//!
//! # Examples
//!
//! ```rust
//! use veritas_store::embedding::{cosine_similarity, HashedEmbeddingModel};
//! use veritas_domain::EmbeddingService;
//!
//! let model = HashedEmbeddingModel::new(256);
//! let a = model.encode("The president signed the law in Paris").unwrap();
//! let b = model.encode("The president signed the new law in Paris").unwrap();
//! assert_eq!(a.len(), 256);
//! assert!(cosine_similarity(&a, &b).unwrap() > 0.8);
//! ```

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use thiserror::Error;
use veritas_domain::EmbeddingService;

/// Errors that can occur during embedding generation
#[derive(Error, Debug)]
pub enum EmbeddingError {
    /// Invalid input text
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Vectors of different lengths were compared
    #[error("Invalid embedding dimension: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimension
        expected: usize,
        /// Actual dimension provided
        actual: usize,
    },
}

/// Deterministic bag-of-words hashing model
pub struct HashedEmbeddingModel {
    dimension: usize,
}

impl HashedEmbeddingModel {
    /// Create a new model
    ///
    /// # Parameters
    ///
    /// - `dimension`: number of hash buckets (e.g. 384)
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension: dimension.max(1),
        }
    }

    /// Get the dimension of embeddings produced by this model
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    fn hash_with_seed(token: &str, seed: u64) -> u64 {
        let mut hasher = DefaultHasher::new();
        token.hash(&mut hasher);
        seed.hash(&mut hasher);
        hasher.finish()
    }
}

impl EmbeddingService for HashedEmbeddingModel {
    type Error = EmbeddingError;

    fn encode(&self, sentence: &str) -> Result<Vec<f32>, Self::Error> {
        let lowered = sentence.to_lowercase();
        let tokens: Vec<&str> = lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .collect();

        if tokens.is_empty() {
            return Err(EmbeddingError::InvalidInput(
                "Text has no word tokens to embed".to_string(),
            ));
        }

        let mut embedding = vec![0.0f32; self.dimension];
        for token in tokens {
            let bucket = (Self::hash_with_seed(token, 0) % self.dimension as u64) as usize;
            let sign = if Self::hash_with_seed(token, 1) & 1 == 0 { 1.0 } else { -1.0 };
            embedding[bucket] += sign;
        }

        // Normalize to unit length for cosine similarity
        let magnitude: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        if magnitude > 0.0 {
            for value in &mut embedding {
                *value /= magnitude;
            }
        }

        Ok(embedding)
    }
}

/// Calculate cosine similarity between two embedding vectors
///
/// Returns a value clamped to [-1, 1]; zero-magnitude vectors score 0.
///
/// # Errors
///
/// Returns `DimensionMismatch` if the vectors have different lengths.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32, EmbeddingError> {
    if a.len() != b.len() {
        return Err(EmbeddingError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let magnitude_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let magnitude_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        return Ok(0.0);
    }

    Ok((dot_product / (magnitude_a * magnitude_b)).clamp(-1.0, 1.0))
}
