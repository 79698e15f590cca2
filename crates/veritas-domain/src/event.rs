//! Event clusters

use crate::{ClaimId, RelationLabel};

/// A connected group of related claims treated as one real-world event
///
/// Clusters produced in one run are pairwise disjoint and never contain a
/// claim that matched nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct EventCluster {
    /// Sequential identifier (`event_1`, `event_2`, ...)
    pub event_id: String,

    /// Member claims in load order
    pub claims: Vec<ClaimId>,

    /// Mean similarity of the edges inside the cluster
    pub average_similarity: f64,

    /// Most frequent edge label inside the cluster
    pub dominant_label: RelationLabel,

    /// Number of edges inside the cluster
    pub edge_count: usize,
}

impl EventCluster {
    /// Format the identifier for the n-th event (1-based)
    pub fn id_for(ordinal: usize) -> String {
        format!("event_{}", ordinal)
    }

    /// Whether the cluster contains the claim
    pub fn contains(&self, id: ClaimId) -> bool {
        self.claims.contains(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_id_format() {
        assert_eq!(EventCluster::id_for(1), "event_1");
        assert_eq!(EventCluster::id_for(12), "event_12");
    }
}
