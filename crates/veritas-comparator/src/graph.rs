//! Relation Graph Builder
//!
//! Accumulates labeled comparisons as weighted edges between claim nodes.
//! Nodes are keyed by `ClaimId` and indexed in order of first appearance in
//! the edge stream; edges keep insertion order.

use std::collections::{HashMap, HashSet};
use veritas_domain::{ClaimId, ComparisonResult, RelationLabel};

/// An undirected labeled edge between two node indices
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    /// Node index of the first claim
    pub source: usize,

    /// Node index of the second claim
    pub target: usize,

    /// Edge weight
    pub similarity: f64,

    /// Relationship label
    pub label: RelationLabel,
}

/// Graph of claims linked by retained comparisons
#[derive(Debug, Clone, Default)]
pub struct RelationGraph {
    nodes: Vec<ClaimId>,
    node_index: HashMap<ClaimId, usize>,
    edges: Vec<Edge>,
    pairs: HashSet<(ClaimId, ClaimId)>,
}

impl RelationGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from results in canonical order
    pub fn from_results<'r>(results: impl IntoIterator<Item = &'r ComparisonResult>) -> Self {
        let mut graph = Self::new();
        for result in results {
            graph.add(result);
        }
        graph
    }

    /// Add one comparison as an edge
    ///
    /// A repeated pair or a self-pair is ignored. Returns whether an edge was
    /// added.
    pub fn add(&mut self, result: &ComparisonResult) -> bool {
        if result.claim_a == result.claim_b {
            tracing::debug!("Ignoring self-pair for claim {}", result.claim_a);
            return false;
        }
        if !self.pairs.insert(result.pair_key()) {
            tracing::debug!(
                "Ignoring repeated pair {} / {}",
                result.claim_a,
                result.claim_b
            );
            return false;
        }

        let source = self.intern(result.claim_a);
        let target = self.intern(result.claim_b);
        self.edges.push(Edge {
            source,
            target,
            similarity: result.similarity,
            label: result.label,
        });
        true
    }

    fn intern(&mut self, id: ClaimId) -> usize {
        if let Some(&index) = self.node_index.get(&id) {
            return index;
        }
        let index = self.nodes.len();
        self.nodes.push(id);
        self.node_index.insert(id, index);
        index
    }

    /// Claim at a node index
    pub fn node(&self, index: usize) -> Option<ClaimId> {
        self.nodes.get(index).copied()
    }

    /// Node index of a claim
    pub fn index_of(&self, id: ClaimId) -> Option<usize> {
        self.node_index.get(&id).copied()
    }

    /// All nodes in index order
    pub fn nodes(&self) -> &[ClaimId] {
        &self.nodes
    }

    /// All edges in insertion order
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Whether the graph has no edges
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(a: u128, b: u128, similarity: f64, label: RelationLabel) -> ComparisonResult {
        ComparisonResult::new(ClaimId::from_value(a), ClaimId::from_value(b), similarity, label)
    }

    #[test]
    fn test_nodes_indexed_by_first_appearance() {
        let graph = RelationGraph::from_results(&[
            result(30, 10, 0.9, RelationLabel::Core),
            result(10, 20, 0.7, RelationLabel::Partial),
        ]);

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.node(0), Some(ClaimId::from_value(30)));
        assert_eq!(graph.node(1), Some(ClaimId::from_value(10)));
        assert_eq!(graph.index_of(ClaimId::from_value(20)), Some(2));
        assert_eq!(graph.edges()[1].source, 1);
        assert_eq!(graph.edges()[1].target, 2);
    }

    #[test]
    fn test_repeated_pair_is_noop() {
        let mut graph = RelationGraph::new();
        assert!(graph.add(&result(1, 2, 0.9, RelationLabel::Core)));
        assert!(!graph.add(&result(2, 1, 0.5, RelationLabel::Partial)));
        assert!(!graph.add(&result(1, 2, 0.9, RelationLabel::Core)));
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.edges()[0].similarity, 0.9);
    }

    #[test]
    fn test_self_pair_is_noop() {
        let mut graph = RelationGraph::new();
        assert!(!graph.add(&result(1, 1, 1.0, RelationLabel::Core)));
        assert!(graph.is_empty());
        assert_eq!(graph.node_count(), 0);
    }
}
