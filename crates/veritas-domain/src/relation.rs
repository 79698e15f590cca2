//! Relation module - labeled cross-source claim pairs

use super::ClaimId;
use std::fmt;

/// Classification of a cross-source claim relationship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationLabel {
    /// Strong agreement
    Core,

    /// Partial overlap
    Partial,

    /// Contradiction
    Disputed,
}

impl RelationLabel {
    /// All labels
    pub const ALL: [RelationLabel; 3] = [
        RelationLabel::Core,
        RelationLabel::Partial,
        RelationLabel::Disputed,
    ];

    /// Get the label name as it appears in output artifacts
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationLabel::Core => "Core",
            RelationLabel::Partial => "Partial",
            RelationLabel::Disputed => "Disputed",
        }
    }

    /// Parse a label (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "core" => Some(RelationLabel::Core),
            "partial" => Some(RelationLabel::Partial),
            "disputed" => Some(RelationLabel::Disputed),
            _ => None,
        }
    }
}

impl fmt::Display for RelationLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scored, labeled pair of claims from different sources
///
/// At most one result exists per unordered pair.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonResult {
    /// First claim (earlier in load order)
    pub claim_a: ClaimId,

    /// Second claim
    pub claim_b: ClaimId,

    /// Cosine similarity of the two sentences
    pub similarity: f64,

    /// Relationship label
    pub label: RelationLabel,
}

impl ComparisonResult {
    /// Create a new comparison result
    pub fn new(claim_a: ClaimId, claim_b: ClaimId, similarity: f64, label: RelationLabel) -> Self {
        Self {
            claim_a,
            claim_b,
            similarity,
            label,
        }
    }

    /// The pair as an order-independent key
    pub fn pair_key(&self) -> (ClaimId, ClaimId) {
        if self.claim_a <= self.claim_b {
            (self.claim_a, self.claim_b)
        } else {
            (self.claim_b, self.claim_a)
        }
    }
}

/// Round a similarity to the 3 decimals used on the wire
pub fn round_similarity(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
