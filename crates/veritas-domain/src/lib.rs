//! Veritas Domain Layer
//!
//! Core vocabulary for cross-source claim comparison. This crate defines the
//! value objects the comparison engine works on and the trait interfaces for
//! the external scoring services. It performs no I/O.
//!
//! ## Key Concepts
//!
//! - **Claim**: a single factual statement extracted from an article, tagged
//!   with its outlet, entities and publication date
//! - **ClaimId**: stable synthetic identity, never the sentence text
//! - **ClaimDate**: tagged publication date (`Parsed`, `Unparsed`, `Absent`)
//! - **RelationLabel**: Core / Partial / Disputed classification of a pair
//! - **EventCluster**: a connected group of related claims
//!
//! ## Architecture
//!
//! - Only primitive dependencies (`uuid`, `chrono`)
//! - Infrastructure implementations of the service traits live in other crates

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod claim;
pub mod date;
pub mod event;
pub mod relation;
pub mod traits;

// Re-exports for convenience
pub use claim::{normalize_entity, Claim, ClaimId};
pub use date::ClaimDate;
pub use event::EventCluster;
pub use relation::{round_similarity, ComparisonResult, RelationLabel};
pub use traits::{EmbeddingService, Polarity, SentimentService};
