//! Metrics collected during a comparison run

use std::collections::HashMap;
use veritas_domain::RelationLabel;

/// Counters for one comparison run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunMetrics {
    /// Claims in the input set
    pub claims_loaded: usize,

    /// Pairs that passed the candidate filter
    pub candidate_pairs: usize,

    /// Pairs that received a label
    pub comparisons: usize,

    /// Retained comparisons per label
    pub labels: HashMap<RelationLabel, usize>,

    /// Event clusters formed
    pub events: usize,

    /// Claims whose sentence could not be embedded
    pub unscorable_claims: usize,

    /// Candidate pairs skipped because a claim could not be embedded
    pub skipped_pairs: usize,

    /// Polarity requests made
    pub sentiment_calls: usize,

    /// Polarity requests that failed and fell back to NEUTRAL
    pub sentiment_fallbacks: usize,

    /// Wall-clock duration in milliseconds
    pub runtime_ms: u64,
}

impl RunMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a retained comparison
    pub fn record_label(&mut self, label: RelationLabel) {
        self.comparisons += 1;
        *self.labels.entry(label).or_insert(0) += 1;
    }

    /// Retained comparisons with the given label
    pub fn label_count(&self, label: RelationLabel) -> usize {
        self.labels.get(&label).copied().unwrap_or(0)
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Comparison Run Summary".to_string(),
            "======================".to_string(),
            format!("Claims loaded: {}", self.claims_loaded),
            format!("Candidate pairs evaluated: {}", self.candidate_pairs),
            format!("Comparisons retained: {}", self.comparisons),
            format!("Events formed: {}", self.events),
            format!("Runtime: {}ms", self.runtime_ms),
        ];

        if self.comparisons > 0 {
            lines.push(String::new());
            lines.push("Comparisons by label:".to_string());
            for label in RelationLabel::ALL {
                lines.push(format!("  {}: {}", label, self.label_count(label)));
            }
        }

        if self.skipped_pairs > 0 || self.sentiment_fallbacks > 0 {
            lines.push(String::new());
            lines.push("Degraded scoring:".to_string());
            lines.push(format!(
                "  Pairs skipped (embedding failure): {} across {} claim(s)",
                self.skipped_pairs, self.unscorable_claims
            ));
            lines.push(format!(
                "  Sentiment fallbacks to NEUTRAL: {} of {} call(s)",
                self.sentiment_fallbacks, self.sentiment_calls
            ));
        }

        lines.join("\n")
    }
}
