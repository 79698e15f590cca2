//! Comparison run orchestration

use crate::classifier::LabelClassifier;
use crate::cluster::EventClusterer;
use crate::filter::CandidateFilter;
use crate::graph::RelationGraph;
use crate::index::EntityIndex;
use crate::scorer::RelationScorer;
use crate::{ComparatorConfig, ComparatorError, RunMetrics};
use std::fmt::Display;
use std::time::Instant;
use veritas_domain::{
    round_similarity, Claim, ComparisonResult, EmbeddingService, EventCluster, SentimentService,
};
use veritas_store::ClaimSet;

/// Everything a run produces
#[derive(Debug, Clone, Default)]
pub struct ComparisonOutcome {
    /// Retained comparisons in canonical pair order
    ///
    /// Similarities are rounded to 3 decimals once labeled; event averages
    /// are taken over these rounded edge weights.
    pub results: Vec<ComparisonResult>,

    /// Event clusters in canonical order
    pub events: Vec<EventCluster>,

    /// Run counters
    pub metrics: RunMetrics,
}

/// Cross-source claim comparator
///
/// Holds the two scoring services, created once by the caller, and the run
/// configuration. Each call to `run` starts from scratch: no caches or graphs
/// survive between runs.
///
/// # Examples
///
/// ```
/// use veritas_comparator::{Comparator, ComparatorConfig};
/// use veritas_llm::MockSentiment;
/// use veritas_store::{ClaimSet, HashedEmbeddingModel};
///
/// let mut claims = ClaimSet::new();
/// claims.add("LBC", "", "The president signed the law in Paris.", vec!["Paris".into()], "2024-01-01");
/// claims.add("MTV", "", "The president signed the law in Paris.", vec!["paris".into()], "2024-01-02");
///
/// let comparator = Comparator::new(
///     HashedEmbeddingModel::new(256),
///     MockSentiment::default(),
///     ComparatorConfig::default(),
/// )?;
/// let outcome = comparator.run(&claims)?;
/// assert_eq!(outcome.events.len(), 1);
/// println!("{}", outcome.metrics.summary());
/// # Ok::<(), veritas_comparator::ComparatorError>(())
/// ```
pub struct Comparator<E, S> {
    embedder: E,
    sentiment: S,
    config: ComparatorConfig,
}

impl<E, S> Comparator<E, S>
where
    E: EmbeddingService + Sync,
    E::Error: Display,
    S: SentimentService + Sync,
    S::Error: Display,
{
    /// Create a comparator
    ///
    /// # Errors
    ///
    /// Returns `ComparatorError::Config` if the configuration is invalid.
    pub fn new(embedder: E, sentiment: S, config: ComparatorConfig) -> Result<Self, ComparatorError> {
        config.validate().map_err(ComparatorError::Config)?;
        Ok(Self {
            embedder,
            sentiment,
            config,
        })
    }

    /// Get the run configuration
    pub fn config(&self) -> &ComparatorConfig {
        &self.config
    }

    /// Compare every cross-source pair and cluster the results into events
    ///
    /// Candidate generation and scoring run on a pool of `workers` threads;
    /// graph construction and clustering run afterwards on the caller's
    /// thread.
    ///
    /// # Errors
    ///
    /// Returns `ComparatorError::WorkerPool` if the pool cannot be started.
    /// Per-claim service failures are absorbed and counted in the metrics.
    pub fn run(&self, claims: &ClaimSet) -> Result<ComparisonOutcome, ComparatorError> {
        let started = Instant::now();

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.workers)
            .thread_name(|i| format!("veritas-worker-{}", i))
            .build()
            .map_err(|e| ComparatorError::WorkerPool(e.to_string()))?;

        let (results, mut metrics) = pool.install(|| self.compare(claims.as_slice()));

        let graph = RelationGraph::from_results(&results);
        let events = EventClusterer::new().cluster(&graph, |id| claims.position(id));
        metrics.events = events.len();
        metrics.runtime_ms = started.elapsed().as_millis() as u64;

        tracing::info!(
            "Formed {} event(s) from {} comparison(s) over {} claim(s)",
            metrics.events,
            metrics.comparisons,
            metrics.claims_loaded
        );

        Ok(ComparisonOutcome {
            results,
            events,
            metrics,
        })
    }

    /// Filter, score and label; runs inside the worker pool
    fn compare(&self, claims: &[Claim]) -> (Vec<ComparisonResult>, RunMetrics) {
        let mut metrics = RunMetrics::new();
        metrics.claims_loaded = claims.len();

        let index = EntityIndex::build(claims);
        let filter = CandidateFilter::new(self.config.time_window_days);
        let pairs = filter.candidates(claims, &index);
        metrics.candidate_pairs = pairs.len();
        tracing::info!(
            "{} candidate pair(s) from {} claim(s) over {} distinct entities",
            pairs.len(),
            claims.len(),
            index.len()
        );

        let scorer = RelationScorer::new(&self.embedder, &self.sentiment, &self.config);
        let report = scorer.score_all(claims, &pairs);
        metrics.unscorable_claims = report.unscorable_claims;
        metrics.skipped_pairs = report.skipped_pairs;
        metrics.sentiment_calls = report.sentiment_calls;
        metrics.sentiment_fallbacks = report.sentiment_fallbacks;

        let classifier = LabelClassifier::from_config(&self.config);
        let mut results = Vec::new();
        for pair in report.scored {
            if let Some(label) = classifier.classify(pair.similarity, pair.contradictory) {
                metrics.record_label(label);
                results.push(ComparisonResult::new(
                    claims[pair.a].id,
                    claims[pair.b].id,
                    round_similarity(pair.similarity),
                    label,
                ));
            }
        }
        tracing::info!(
            "Retained {} of {} scored pair(s)",
            results.len(),
            pairs.len() - report.skipped_pairs
        );

        (results, metrics)
    }
}
