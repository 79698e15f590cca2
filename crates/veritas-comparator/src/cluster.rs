//! Event Clusterer
//!
//! Partitions the relation graph into connected components with a union-find
//! forest and summarizes each component as an event.
//!
//! Output order is canonical: events are ordered by their earliest member in
//! load order, members are listed in load order, and event IDs are assigned
//! `event_1`, `event_2`, ... in that order.

use crate::graph::RelationGraph;
use std::collections::HashMap;
use veritas_domain::{ClaimId, EventCluster, RelationLabel};

/// Disjoint-set forest with path compression and union by rank
#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl UnionFind {
    /// Create `size` singleton sets
    pub fn new(size: usize) -> Self {
        Self {
            parent: (0..size).collect(),
            rank: vec![0; size],
        }
    }

    /// Representative of the set containing `x`
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        let mut node = x;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        root
    }

    /// Merge the sets containing `a` and `b`
    ///
    /// Returns `false` if they were already merged.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let (root_a, root_b) = (self.find(a), self.find(b));
        if root_a == root_b {
            return false;
        }

        match self.rank[root_a].cmp(&self.rank[root_b]) {
            std::cmp::Ordering::Less => self.parent[root_a] = root_b,
            std::cmp::Ordering::Greater => self.parent[root_b] = root_a,
            std::cmp::Ordering::Equal => {
                self.parent[root_b] = root_a;
                self.rank[root_a] += 1;
            }
        }
        true
    }

    /// Whether `a` and `b` are in the same set
    pub fn connected(&mut self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }
}

#[derive(Debug)]
struct LabelTally {
    label: RelationLabel,
    count: usize,
}

#[derive(Debug, Default)]
struct Component {
    members: Vec<usize>,
    similarity_sum: f64,
    edge_count: usize,
    // in order of first edge
    tallies: Vec<LabelTally>,
}

impl Component {
    fn record(&mut self, similarity: f64, label: RelationLabel) {
        self.similarity_sum += similarity;
        self.edge_count += 1;
        match self.tallies.iter_mut().find(|t| t.label == label) {
            Some(tally) => tally.count += 1,
            None => self.tallies.push(LabelTally { label, count: 1 }),
        }
    }

    /// Most frequent label; ties go to the label seen first
    fn dominant_label(&self) -> Option<RelationLabel> {
        let mut best: Option<&LabelTally> = None;
        for tally in &self.tallies {
            if best.is_none_or(|b| tally.count > b.count) {
                best = Some(tally);
            }
        }
        best.map(|t| t.label)
    }
}

/// Groups a relation graph into events
#[derive(Debug, Clone, Copy, Default)]
pub struct EventClusterer;

impl EventClusterer {
    /// Create a clusterer
    pub fn new() -> Self {
        Self
    }

    /// Cluster the graph
    ///
    /// `load_position` gives each claim's position in the input; claims it
    /// does not know sort last, in node order.
    pub fn cluster<F>(&self, graph: &RelationGraph, load_position: F) -> Vec<EventCluster>
    where
        F: Fn(ClaimId) -> Option<usize>,
    {
        let mut forest = UnionFind::new(graph.node_count());
        for edge in graph.edges() {
            forest.union(edge.source, edge.target);
        }

        let mut component_of_root: HashMap<usize, usize> = HashMap::new();
        let mut components: Vec<Component> = Vec::new();
        for edge in graph.edges() {
            let root = forest.find(edge.source);
            let slot = *component_of_root.entry(root).or_insert_with(|| {
                components.push(Component::default());
                components.len() - 1
            });
            components[slot].record(edge.similarity, edge.label);
        }

        for node in 0..graph.node_count() {
            let root = forest.find(node);
            if let Some(&slot) = component_of_root.get(&root) {
                components[slot].members.push(node);
            }
        }

        let sort_key = |node: usize| {
            let position = graph
                .node(node)
                .and_then(&load_position)
                .unwrap_or(usize::MAX);
            (position, node)
        };
        for component in &mut components {
            component.members.sort_by_key(|&node| sort_key(node));
        }
        components.sort_by_key(|c| c.members.first().map(|&node| sort_key(node)));

        let events: Vec<EventCluster> = components
            .iter()
            .enumerate()
            .filter_map(|(n, component)| {
                let dominant_label = component.dominant_label()?;
                Some(EventCluster {
                    event_id: EventCluster::id_for(n + 1),
                    claims: component
                        .members
                        .iter()
                        .filter_map(|&node| graph.node(node))
                        .collect(),
                    average_similarity: component.similarity_sum / component.edge_count as f64,
                    dominant_label,
                    edge_count: component.edge_count,
                })
            })
            .collect();

        tracing::debug!(
            "Clustered {} node(s) and {} edge(s) into {} event(s)",
            graph.node_count(),
            graph.edge_count(),
            events.len()
        );
        events
    }
}
