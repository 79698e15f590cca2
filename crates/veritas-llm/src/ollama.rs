//! Ollama Provider Implementation
//!
//! Integration with a local Ollama server for both scoring services:
//!
//! - embeddings through `/api/embed`, one request per batch
//! - polarity through `/api/generate`, asking the model for a one-word label
//!
//! Requests are blocking, with a per-request timeout and retry with
//! exponential backoff on transport and server errors.
//!
//! # Examples
//!
//! ```no_run
//! use veritas_llm::OllamaProvider;
//! use veritas_domain::EmbeddingService;
//!
//! let provider = OllamaProvider::new("http://localhost:11434", "nomic-embed-text", "llama3.2")?;
//! let vectors = provider.encode_batch(&["The law was signed."])?;
//! # Ok::<(), veritas_llm::LlmError>(())
//! ```

use crate::LlmError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use veritas_domain::{EmbeddingService, Polarity, SentimentService};

/// Default Ollama API endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Default embedding model
pub const DEFAULT_EMBEDDING_MODEL: &str = "nomic-embed-text";

/// Default model used for polarity classification
pub const DEFAULT_SENTIMENT_MODEL: &str = "llama3.2";

/// Default timeout for a single request (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of attempts per request
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Ollama API provider
pub struct OllamaProvider {
    endpoint: String,
    embedding_model: String,
    sentiment_model: String,
    client: reqwest::blocking::Client,
    max_retries: u32,
    backoff: Duration,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a [&'a str],
}

#[derive(Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: String,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Serialize)]
struct GenerateOptions {
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

impl OllamaProvider {
    /// Create a new Ollama provider
    ///
    /// # Parameters
    ///
    /// - `endpoint`: Ollama API endpoint (e.g., "http://localhost:11434")
    /// - `embedding_model`: model for `/api/embed` (e.g., "nomic-embed-text")
    /// - `sentiment_model`: model for `/api/generate` (e.g., "llama3.2")
    ///
    /// # Errors
    ///
    /// Returns `LlmError::Other` if the HTTP client cannot be built.
    pub fn new(
        endpoint: impl Into<String>,
        embedding_model: impl Into<String>,
        sentiment_model: impl Into<String>,
    ) -> Result<Self, LlmError> {
        Self::with_timeout(
            endpoint,
            embedding_model,
            sentiment_model,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
    }

    /// Create a provider with an explicit request timeout
    pub fn with_timeout(
        endpoint: impl Into<String>,
        embedding_model: impl Into<String>,
        sentiment_model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            embedding_model: embedding_model.into(),
            sentiment_model: sentiment_model.into(),
            client,
            max_retries: DEFAULT_MAX_RETRIES,
            backoff: Duration::from_secs(1),
        })
    }

    /// Set the maximum number of attempts per request
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// Set the delay before the first retry; later retries double it
    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    /// POST `body` to `path`, retrying transport and server errors
    fn post<Req, Resp>(&self, path: &str, model: &str, body: &Req) -> Result<Resp, LlmError>
    where
        Req: Serialize,
        Resp: DeserializeOwned,
    {
        let url = format!("{}{}", self.endpoint, path);
        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            match self.client.post(&url).json(body).send() {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return response.json::<Resp>().map_err(|e| {
                            LlmError::InvalidResponse(format!("Failed to parse response: {}", e))
                        });
                    } else if status == reqwest::StatusCode::NOT_FOUND {
                        return Err(LlmError::ModelNotAvailable(model.to_string()));
                    } else {
                        let error_text = response
                            .text()
                            .unwrap_or_else(|_| "Unknown error".to_string());
                        last_error = Some(LlmError::Communication(format!(
                            "HTTP {}: {}",
                            status, error_text
                        )));
                    }
                }
                Err(e) => {
                    last_error = Some(LlmError::Communication(format!("Request failed: {}", e)));
                }
            }

            attempts += 1;
            if attempts < self.max_retries {
                // Exponential backoff: 1x, 2x, 4x, ...
                let delay = self.backoff * 2u32.pow(attempts - 1);
                tracing::debug!("Retrying {} in {:?} (attempt {})", url, delay, attempts + 1);
                std::thread::sleep(delay);
            }
        }

        Err(last_error
            .unwrap_or_else(|| LlmError::Communication("Max retries exceeded".to_string())))
    }
}

/// Prompt asking for a single polarity word
fn sentiment_prompt(sentence: &str) -> String {
    format!(
        "Classify the sentiment of the following news sentence. \
         Answer with exactly one word: POSITIVE, NEGATIVE or NEUTRAL.\n\n\
         Sentence: {}\n\nAnswer:",
        sentence
    )
}

/// Read the first word of a model answer as a polarity label
fn parse_polarity(answer: &str) -> Result<Polarity, LlmError> {
    answer
        .split(|c: char| !c.is_alphabetic())
        .find(|word| !word.is_empty())
        .and_then(Polarity::parse)
        .ok_or_else(|| LlmError::InvalidResponse(format!("Unrecognized polarity: '{}'", answer.trim())))
}

impl EmbeddingService for OllamaProvider {
    type Error = LlmError;

    fn encode(&self, sentence: &str) -> Result<Vec<f32>, Self::Error> {
        self.encode_batch(&[sentence])?
            .pop()
            .ok_or_else(|| LlmError::InvalidResponse("Empty embedding response".to_string()))
    }

    fn encode_batch(&self, sentences: &[&str]) -> Result<Vec<Vec<f32>>, Self::Error> {
        if sentences.is_empty() {
            return Ok(Vec::new());
        }

        let request = EmbedRequest {
            model: &self.embedding_model,
            input: sentences,
        };
        let response: EmbedResponse = self.post("/api/embed", &self.embedding_model, &request)?;

        if response.embeddings.len() != sentences.len() {
            return Err(LlmError::InvalidResponse(format!(
                "Expected {} embeddings, got {}",
                sentences.len(),
                response.embeddings.len()
            )));
        }
        Ok(response.embeddings)
    }

    fn is_unavailable(&self, error: &Self::Error) -> bool {
        error.is_unavailable()
    }
}

impl SentimentService for OllamaProvider {
    type Error = LlmError;

    fn classify(&self, sentence: &str) -> Result<Polarity, Self::Error> {
        let request = GenerateRequest {
            model: &self.sentiment_model,
            prompt: sentiment_prompt(sentence),
            stream: false,
            options: GenerateOptions { temperature: 0.0 },
        };
        let response: GenerateResponse =
            self.post("/api/generate", &self.sentiment_model, &request)?;
        parse_polarity(&response.response)
    }
}
