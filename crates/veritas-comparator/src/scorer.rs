//! Relation Scorer
//!
//! Turns candidate pairs into `(similarity, contradictory)` scores.
//!
//! Scoring runs in three passes over the current rayon pool:
//!
//! 1. Every claim that appears in a pair is embedded once, in batches of
//!    `embedding_batch_size`. A failed batch is retried one sentence at a
//!    time; a sentence that still fails leaves its claim unscorable. When the
//!    service reports itself unreachable the whole batch is left unscorable
//!    without retries.
//! 2. Cosine similarity is computed per pair from the cached vectors.
//! 3. Polarity is requested only for claims in a pair whose similarity is
//!    above `contradiction_similarity` and whose negation flags agree. Each
//!    such claim is classified once; a failed call counts as NEUTRAL.
//!
//! A pair is contradictory iff its similarity is above
//! `contradiction_similarity` and either the negation flags or the
//! polarities differ.

use crate::config::ComparatorConfig;
use rayon::prelude::*;
use std::fmt::Display;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use veritas_domain::{Claim, EmbeddingService, Polarity, SentimentService};
use veritas_store::{cosine_similarity, ClaimCache};

/// Scores for one candidate pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredPair {
    /// Load position of the first claim
    pub a: usize,

    /// Load position of the second claim
    pub b: usize,

    /// Cosine similarity in [-1, 1]
    pub similarity: f64,

    /// Whether the contradiction heuristic fired
    pub contradictory: bool,
}

/// Result of scoring a batch of candidate pairs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreReport {
    /// Scored pairs, in input order
    pub scored: Vec<ScoredPair>,

    /// Claims that could not be embedded
    pub unscorable_claims: usize,

    /// Pairs skipped because a claim could not be embedded
    pub skipped_pairs: usize,

    /// Polarity requests made
    pub sentiment_calls: usize,

    /// Polarity requests that fell back to NEUTRAL
    pub sentiment_fallbacks: usize,
}

/// Whether a sentence contains any negation marker
///
/// `words` must already be lower-cased. Matching is by substring, so "no"
/// also matches "note" or "Beirut's northern suburbs".
pub fn contains_negation(sentence: &str, words: &[String]) -> bool {
    let lowered = sentence.to_lowercase();
    words.iter().any(|word| lowered.contains(word.as_str()))
}

/// Truncate to at most `max_chars` characters
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// Scores candidate pairs against the embedding and sentiment services
///
/// Vectors and polarity labels are cached per claim for the lifetime of the
/// scorer.
pub struct RelationScorer<'a, E, S> {
    embedder: &'a E,
    sentiment: &'a S,
    config: &'a ComparatorConfig,
    negation_words: Vec<String>,
    embeddings: ClaimCache<Arc<[f32]>>,
    polarities: ClaimCache<Polarity>,
    sentiment_calls: AtomicUsize,
    sentiment_fallbacks: AtomicUsize,
}

impl<'a, E, S> RelationScorer<'a, E, S>
where
    E: EmbeddingService + Sync,
    E::Error: Display,
    S: SentimentService + Sync,
    S::Error: Display,
{
    /// Create a scorer over the given services
    pub fn new(embedder: &'a E, sentiment: &'a S, config: &'a ComparatorConfig) -> Self {
        Self {
            embedder,
            sentiment,
            config,
            negation_words: config
                .negation_words
                .iter()
                .map(|w| w.trim().to_lowercase())
                .collect(),
            embeddings: ClaimCache::new(),
            polarities: ClaimCache::new(),
            sentiment_calls: AtomicUsize::new(0),
            sentiment_fallbacks: AtomicUsize::new(0),
        }
    }

    /// Score every pair of load positions into `claims`
    pub fn score_all(&self, claims: &[Claim], pairs: &[(usize, usize)]) -> ScoreReport {
        let mut involved: Vec<usize> = pairs.iter().flat_map(|&(a, b)| [a, b]).collect();
        involved.sort_unstable();
        involved.dedup();
        let unscorable_claims = self.embed_claims(claims, &involved);

        let measured: Vec<Option<(usize, usize, f64)>> = pairs
            .par_iter()
            .map(|&(a, b)| self.similarity(&claims[a], &claims[b]).map(|sim| (a, b, sim)))
            .collect();
        let skipped_pairs = measured.iter().filter(|m| m.is_none()).count();
        if skipped_pairs > 0 {
            tracing::warn!(
                "Skipped {} pair(s) involving {} unscorable claim(s)",
                skipped_pairs,
                unscorable_claims
            );
        }

        let mut needs_polarity: Vec<usize> = measured
            .iter()
            .flatten()
            .filter(|&&(a, b, sim)| {
                sim > self.config.contradiction_similarity
                    && self.is_negated(&claims[a]) == self.is_negated(&claims[b])
            })
            .flat_map(|&(a, b, _)| [a, b])
            .collect();
        needs_polarity.sort_unstable();
        needs_polarity.dedup();
        needs_polarity.retain(|&p| !self.polarities.contains(claims[p].id));
        needs_polarity.par_iter().for_each(|&p| {
            self.polarity(&claims[p]);
        });

        let scored = measured
            .into_iter()
            .flatten()
            .map(|(a, b, similarity)| ScoredPair {
                a,
                b,
                similarity,
                contradictory: self.contradictory(&claims[a], &claims[b], similarity),
            })
            .collect();

        ScoreReport {
            scored,
            unscorable_claims,
            skipped_pairs,
            sentiment_calls: self.sentiment_calls.load(Ordering::Relaxed),
            sentiment_fallbacks: self.sentiment_fallbacks.load(Ordering::Relaxed),
        }
    }

    /// Cosine similarity of two claims, if both could be embedded
    pub fn similarity(&self, a: &Claim, b: &Claim) -> Option<f64> {
        let (Some(va), Some(vb)) = (self.embeddings.get(a.id), self.embeddings.get(b.id)) else {
            tracing::debug!("Skipping pair {} / {}: missing embedding", a.id, b.id);
            return None;
        };
        match cosine_similarity(&va, &vb) {
            Ok(similarity) => Some(similarity as f64),
            Err(e) => {
                tracing::warn!("Skipping pair {} / {}: {}", a.id, b.id, e);
                None
            }
        }
    }

    /// Contradiction heuristic for a scored pair
    pub fn contradictory(&self, a: &Claim, b: &Claim, similarity: f64) -> bool {
        if similarity <= self.config.contradiction_similarity {
            return false;
        }
        self.is_negated(a) != self.is_negated(b) || self.polarity(a) != self.polarity(b)
    }

    /// Whether the claim's sentence contains a negation marker
    pub fn is_negated(&self, claim: &Claim) -> bool {
        contains_negation(&claim.sentence, &self.negation_words)
    }

    /// Polarity of a claim, classified on first use
    pub fn polarity(&self, claim: &Claim) -> Polarity {
        if let Some(label) = self.polarities.get(claim.id) {
            return label;
        }

        self.sentiment_calls.fetch_add(1, Ordering::Relaxed);
        let text = truncate_chars(&claim.sentence, self.config.sentiment_max_chars);
        let label = match self.sentiment.classify(text) {
            Ok(label) => label,
            Err(e) => {
                self.sentiment_fallbacks.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(
                    "Sentiment failed for claim {} ({}), using NEUTRAL: {}",
                    claim.id,
                    claim.source,
                    e
                );
                Polarity::Neutral
            }
        };
        self.polarities.insert_once(claim.id, label);
        label
    }

    /// Number of claims with a cached vector
    pub fn embedded_count(&self) -> usize {
        self.embeddings.len()
    }

    /// Embed the claims at `positions` that are not cached yet
    ///
    /// Returns the number of claims that could not be embedded.
    fn embed_claims(&self, claims: &[Claim], positions: &[usize]) -> usize {
        let pending: Vec<usize> = positions
            .iter()
            .copied()
            .filter(|&p| !self.embeddings.contains(claims[p].id))
            .collect();
        if pending.is_empty() {
            return 0;
        }

        tracing::debug!(
            "Embedding {} claim(s) in batches of {}",
            pending.len(),
            self.config.embedding_batch_size
        );
        pending
            .par_chunks(self.config.embedding_batch_size)
            .map(|chunk| self.embed_batch(claims, chunk))
            .sum()
    }

    fn embed_batch(&self, claims: &[Claim], chunk: &[usize]) -> usize {
        let sentences: Vec<&str> = chunk.iter().map(|&p| claims[p].sentence.as_str()).collect();
        match self.embedder.encode_batch(&sentences) {
            Ok(vectors) if vectors.len() == chunk.len() => {
                for (&p, vector) in chunk.iter().zip(vectors) {
                    self.embeddings.insert_once(claims[p].id, Arc::from(vector));
                }
                0
            }
            Ok(vectors) => {
                tracing::warn!(
                    "Embedding batch returned {} vector(s) for {} sentence(s), retrying one by one",
                    vectors.len(),
                    chunk.len()
                );
                self.embed_individually(claims, chunk)
            }
            Err(e) if self.embedder.is_unavailable(&e) => {
                tracing::warn!(
                    "Embedding service unavailable, {} claim(s) left unscorable: {}",
                    chunk.len(),
                    e
                );
                chunk.len()
            }
            Err(e) => {
                tracing::warn!(
                    "Embedding batch of {} sentence(s) failed, retrying one by one: {}",
                    chunk.len(),
                    e
                );
                self.embed_individually(claims, chunk)
            }
        }
    }

    fn embed_individually(&self, claims: &[Claim], chunk: &[usize]) -> usize {
        let mut failures = 0;
        for &p in chunk {
            let claim = &claims[p];
            match self.embedder.encode(&claim.sentence) {
                Ok(vector) => {
                    self.embeddings.insert_once(claim.id, Arc::from(vector));
                }
                Err(e) => {
                    failures += 1;
                    tracing::warn!(
                        "Claim {} ({}) cannot be embedded, its pairs will be skipped: {}",
                        claim.id,
                        claim.source,
                        e
                    );
                }
            }
        }
        failures
    }
}
