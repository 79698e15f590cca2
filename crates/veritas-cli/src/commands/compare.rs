//! Compare command implementation.

use crate::cli::CompareArgs;
use crate::config::{Config, ProviderKind};
use crate::error::Result;
use crate::output::Formatter;
use std::fmt::Display;
use std::path::PathBuf;
use veritas_comparator::{Comparator, ComparatorConfig, ComparisonOutcome, RunMetrics};
use veritas_domain::{EmbeddingService, SentimentService};
use veritas_llm::{MockSentiment, OllamaProvider};
use veritas_store::{artifact, ClaimLoader, ClaimSet, EventRecord, HashedEmbeddingModel, LoadSummary};

/// Result of a compare run.
#[derive(Debug, Clone)]
pub struct CompareReport {
    /// Events as written to the artifact
    pub records: Vec<EventRecord>,

    /// Run counters
    pub metrics: RunMetrics,

    /// Input statistics
    pub load: LoadSummary,

    /// Artifact path
    pub output: PathBuf,
}

/// Execute the compare command and print the result.
pub fn execute_compare(args: CompareArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let report = run_compare(args, config)?;

    println!("{}", formatter.format_events(&report.records)?);
    let summary = formatter.format_summary(&report.metrics, &report.load, &report.output)?;
    if !summary.is_empty() {
        println!("{}", summary);
    }

    Ok(())
}

/// Load claims, compare them and write the event artifact.
///
/// Command-line arguments take precedence over the configuration file. A
/// preset replaces the whole `[comparison]` table; `--workers` applies on top.
pub fn run_compare(args: CompareArgs, config: &Config) -> Result<CompareReport> {
    let mut comparison = args
        .preset
        .map(|preset| preset.config())
        .unwrap_or_else(|| config.comparison.clone());
    if let Some(workers) = args.workers {
        comparison.workers = workers;
    }

    let inputs = if args.inputs.is_empty() {
        config.paths.inputs.clone()
    } else {
        args.inputs
    };
    let output = args.output.unwrap_or_else(|| config.paths.output.clone());
    let provider = args
        .provider
        .map(Into::into)
        .unwrap_or(config.services.provider);

    let (claims, load) = ClaimLoader::new(inputs).load()?;

    let outcome = match provider {
        ProviderKind::Hashed => {
            tracing::info!(
                "Using hashed embeddings ({} dimensions) with neutral sentiment",
                config.services.hashed_dimension
            );
            compare_with(
                HashedEmbeddingModel::new(config.services.hashed_dimension),
                MockSentiment::default(),
                comparison,
                &claims,
            )?
        }
        ProviderKind::Ollama => {
            let services = &config.services;
            tracing::info!(
                "Using Ollama at {} (embeddings: {}, sentiment: {})",
                services.ollama_endpoint,
                services.embedding_model,
                services.sentiment_model
            );
            let connect = || {
                OllamaProvider::with_timeout(
                    services.ollama_endpoint.as_str(),
                    services.embedding_model.as_str(),
                    services.sentiment_model.as_str(),
                    comparison.request_timeout(),
                )
                .map(|p| p.with_max_retries(services.max_retries))
            };
            let embedder = connect()?;
            let sentiment = connect()?;
            compare_with(embedder, sentiment, comparison, &claims)?
        }
    };

    let records: Vec<EventRecord> = outcome
        .events
        .iter()
        .map(|event| EventRecord::from_cluster(event, &claims))
        .collect();

    artifact::write_events(&output, &records)?;

    Ok(CompareReport {
        records,
        metrics: outcome.metrics,
        load,
        output,
    })
}

fn compare_with<E, S>(
    embedder: E,
    sentiment: S,
    comparison: ComparatorConfig,
    claims: &ClaimSet,
) -> Result<ComparisonOutcome>
where
    E: EmbeddingService + Sync,
    E::Error: Display,
    S: SentimentService + Sync,
    S::Error: Display,
{
    let comparator = Comparator::new(embedder, sentiment, comparison)?;
    let outcome = comparator.run(claims)?;
    tracing::info!("{}", outcome.metrics.summary());
    Ok(outcome)
}
