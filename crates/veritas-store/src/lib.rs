//! Veritas Storage Layer
//!
//! Everything the comparison engine reads from or writes to disk, plus the
//! in-memory stores it shares across worker threads.
//!
//! # Architecture
//!
//! - `ClaimSet`: the loaded claims, in load order, indexed by `ClaimId`
//! - `ClaimLoader`: reads upstream JSON batches (article or flat-claim layout)
//! - `artifact`: writes the event-cluster artifact atomically
//! - `embedding`: deterministic local embedding model and cosine similarity
//! - `ClaimCache`: compute-once, read-many cache keyed by `ClaimId`
//!
//! # Examples
//!
//! ```
//! use veritas_store::ClaimSet;
//!
//! let mut claims = ClaimSet::new();
//! let id = claims.add("LBC", "Title", "The president signed the law.", vec!["President".into()], "2024-01-01");
//! assert_eq!(claims.get(id).unwrap().source, "LBC");
//! ```

#![warn(missing_docs)]

pub mod artifact;
pub mod cache;
pub mod embedding;
pub mod loader;
pub mod records;

use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;
use veritas_domain::{Claim, ClaimDate, ClaimId};

pub use cache::ClaimCache;
pub use embedding::{cosine_similarity, EmbeddingError, HashedEmbeddingModel};
pub use loader::{ClaimLoader, LoadSummary};
pub use records::{ClaimRef, EventRecord};

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading an input or artifact failed
    #[error("Failed to read {path}: {source}")]
    Read {
        /// Offending path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// An input batch is not valid JSON in a supported layout
    #[error("Failed to parse {path}: {source}")]
    Parse {
        /// Offending path
        path: PathBuf,
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// Writing the artifact failed
    #[error("Failed to write {path}: {source}")]
    Write {
        /// Offending path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Serialization of the artifact failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// No inputs were given, or none of them could be read
    #[error("No readable claim batches among: {0}")]
    NoInput(String),
}

/// Loaded claims in load order
///
/// Identity is assigned on insertion: records with identical origin fields
/// get distinct IDs through an occurrence counter.
#[derive(Debug, Clone, Default)]
pub struct ClaimSet {
    claims: Vec<Claim>,
    positions: HashMap<ClaimId, usize>,
    occurrences: HashMap<ClaimId, usize>,
}

impl ClaimSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a claim record and return its assigned ID
    pub fn add(
        &mut self,
        source: &str,
        title: &str,
        sentence: &str,
        entities: Vec<String>,
        raw_date: &str,
    ) -> ClaimId {
        let origin = ClaimId::derive(source, title, sentence, raw_date, 0);
        let occurrence = self.occurrences.entry(origin).or_insert(0);
        let id = if *occurrence == 0 {
            origin
        } else {
            ClaimId::derive(source, title, sentence, raw_date, *occurrence)
        };
        *occurrence += 1;

        let claim = Claim::new(id, source, title, sentence, entities, ClaimDate::parse(raw_date));
        self.positions.insert(id, self.claims.len());
        self.claims.push(claim);
        id
    }

    /// Look up a claim by ID
    pub fn get(&self, id: ClaimId) -> Option<&Claim> {
        self.positions.get(&id).map(|&pos| &self.claims[pos])
    }

    /// Load position of a claim
    pub fn position(&self, id: ClaimId) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    /// Claims in load order
    pub fn as_slice(&self) -> &[Claim] {
        &self.claims
    }

    /// Iterate claims in load order
    pub fn iter(&self) -> impl Iterator<Item = &Claim> {
        self.claims.iter()
    }

    /// Number of claims
    pub fn len(&self) -> usize {
        self.claims.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }
}
