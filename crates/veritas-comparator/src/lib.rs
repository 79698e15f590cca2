//! Veritas Comparator
//!
//! Cross-source claim comparison and event clustering.
//!
//! # Overview
//!
//! Given claims extracted from several news outlets, the comparator decides
//! which claims from different outlets describe the same event and whether
//! they agree, partially overlap, or contradict each other.
//!
//! # Pipeline
//!
//! | Stage | Module | Runs on |
//! |-------|--------|---------|
//! | Candidate generation | `index`, `filter` | worker pool |
//! | Relation scoring | `scorer` | worker pool |
//! | Labeling | `classifier` | worker pool |
//! | Graph construction | `graph` | caller |
//! | Clustering | `cluster` | caller |
//!
//! Pairs flow in canonical order `(i, j)`, `i < j` by load position, so the
//! same input always yields the same events with the same IDs.

#![warn(missing_docs)]

pub mod classifier;
pub mod cluster;
pub mod comparator;
pub mod config;
pub mod error;
pub mod filter;
pub mod graph;
pub mod index;
pub mod metrics;
pub mod scorer;

pub use classifier::LabelClassifier;
pub use cluster::{EventClusterer, UnionFind};
pub use comparator::{Comparator, ComparisonOutcome};
pub use config::ComparatorConfig;
pub use error::ComparatorError;
pub use filter::{CandidateFilter, FilterOutcome};
pub use graph::{Edge, RelationGraph};
pub use index::EntityIndex;
pub use metrics::RunMetrics;
pub use scorer::{RelationScorer, ScoreReport, ScoredPair};
