//! Wire records for claim batches and event artifacts

use crate::ClaimSet;
use serde::{Deserialize, Serialize};
use veritas_domain::{round_similarity, Claim, EventCluster};

/// One entry of an input batch
///
/// Batches written by the claim-extraction step group claims under their
/// article; hand-assembled batches may list claims directly. An entry with a
/// `claims` array is read as an article.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum BatchEntry {
    /// Article with nested claims
    Article(ArticleRecord),

    /// Stand-alone claim
    Claim(ClaimRecord),
}

/// An article as emitted by the claim-extraction step
#[derive(Debug, Clone, Deserialize)]
pub struct ArticleRecord {
    /// Outlet identifier
    pub source: String,

    /// Article title
    #[serde(default)]
    pub title: Option<String>,

    /// Publication date as scraped
    #[serde(default)]
    pub date: Option<String>,

    /// Extracted claims
    pub claims: Vec<NestedClaim>,
}

/// A claim nested under an article
#[derive(Debug, Clone, Deserialize)]
pub struct NestedClaim {
    /// Statement text
    pub sentence: String,

    /// Entities mentioned
    #[serde(default)]
    pub entities: Vec<String>,
}

/// A stand-alone claim record
#[derive(Debug, Clone, Deserialize)]
pub struct ClaimRecord {
    /// Outlet identifier
    pub source: String,

    /// Article title
    #[serde(default)]
    pub title: Option<String>,

    /// Statement text
    pub sentence: String,

    /// Entities mentioned
    #[serde(default)]
    pub entities: Vec<String>,

    /// Publication date as scraped
    #[serde(default)]
    pub date: Option<String>,
}

/// Claim as it appears inside an event record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimRef {
    /// Stable claim identifier
    pub id: String,

    /// Outlet identifier
    pub source: String,

    /// Article title
    pub title: String,

    /// Statement text
    pub sentence: String,

    /// Entities as supplied upstream
    pub entities: Vec<String>,

    /// Publication date as supplied upstream ("" when absent)
    pub date: String,
}

impl From<&Claim> for ClaimRef {
    fn from(claim: &Claim) -> Self {
        Self {
            id: claim.id.to_string(),
            source: claim.source.clone(),
            title: claim.title.clone(),
            sentence: claim.sentence.clone(),
            entities: claim.entities.clone(),
            date: claim.date.raw().to_string(),
        }
    }
}

/// One event cluster in the output artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Event identifier (`event_<n>`)
    pub event_id: String,

    /// Member claims
    pub claims: Vec<ClaimRef>,

    /// Mean edge similarity, 3 decimals
    pub average_similarity: f64,

    /// "Core", "Partial" or "Disputed"
    pub dominant_label: String,
}

impl EventRecord {
    /// Build the wire record for a cluster
    ///
    /// Member IDs missing from `claims` are skipped.
    pub fn from_cluster(cluster: &EventCluster, claims: &ClaimSet) -> Self {
        Self {
            event_id: cluster.event_id.clone(),
            claims: cluster
                .claims
                .iter()
                .filter_map(|id| claims.get(*id))
                .map(ClaimRef::from)
                .collect(),
            average_similarity: round_similarity(cluster.average_similarity),
            dominant_label: cluster.dominant_label.as_str().to_string(),
        }
    }
}
