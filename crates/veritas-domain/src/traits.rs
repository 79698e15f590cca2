//! Trait definitions for the external scoring services
//!
//! These traits define the boundary between the comparison engine and the
//! model-serving infrastructure. Implementations live in other crates
//! (veritas-store, veritas-llm). Handles are created once at startup and
//! passed explicitly to the comparator.

use std::fmt;

/// Sentence-embedding service
pub trait EmbeddingService {
    /// Error type for embedding operations
    type Error;

    /// Encode one sentence into a fixed-length vector
    fn encode(&self, sentence: &str) -> Result<Vec<f32>, Self::Error>;

    /// Encode many sentences in one request
    ///
    /// The default implementation encodes one at a time. Implementations
    /// backed by a remote service should override it with a true batch call.
    /// On success the output has one vector per input, in input order.
    fn encode_batch(&self, sentences: &[&str]) -> Result<Vec<Vec<f32>>, Self::Error> {
        sentences.iter().map(|s| self.encode(s)).collect()
    }

    /// Whether an error means the whole service is unreachable
    ///
    /// Callers do not retry sentence by sentence after such an error.
    fn is_unavailable(&self, _error: &Self::Error) -> bool {
        false
    }
}

/// Polarity label of a sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarity {
    /// Positive sentiment
    Positive,

    /// Negative sentiment
    Negative,

    /// Neutral, or unknown
    Neutral,
}

impl Polarity {
    /// Get the polarity name as reported by sentiment services
    pub fn as_str(&self) -> &'static str {
        match self {
            Polarity::Positive => "POSITIVE",
            Polarity::Negative => "NEGATIVE",
            Polarity::Neutral => "NEUTRAL",
        }
    }

    /// Parse a service label (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "POSITIVE" | "POS" => Some(Polarity::Positive),
            "NEGATIVE" | "NEG" => Some(Polarity::Negative),
            "NEUTRAL" | "NEU" => Some(Polarity::Neutral),
            _ => None,
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sentence polarity service
pub trait SentimentService {
    /// Error type for classification
    type Error;

    /// Classify the polarity of a sentence
    ///
    /// Callers are responsible for truncating input to the service's bound.
    fn classify(&self, sentence: &str) -> Result<Polarity, Self::Error>;
}
