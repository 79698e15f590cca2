//! Label Classifier

use crate::config::ComparatorConfig;
use veritas_domain::RelationLabel;

/// Maps a pair score to a relation label
///
/// Strict priority: a contradictory pair is Disputed regardless of
/// similarity; otherwise Core above `core_threshold`, Partial above
/// `partial_threshold`, and no label at or below it. Both comparisons are
/// strict.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelClassifier {
    core_threshold: f64,
    partial_threshold: f64,
}

impl LabelClassifier {
    /// Create a classifier with explicit thresholds
    pub fn new(core_threshold: f64, partial_threshold: f64) -> Self {
        Self {
            core_threshold,
            partial_threshold,
        }
    }

    /// Create a classifier from run configuration
    pub fn from_config(config: &ComparatorConfig) -> Self {
        Self::new(config.core_threshold, config.partial_threshold)
    }

    /// Label a pair, or `None` if it should be discarded
    pub fn classify(&self, similarity: f64, contradictory: bool) -> Option<RelationLabel> {
        if contradictory {
            Some(RelationLabel::Disputed)
        } else if similarity > self.core_threshold {
            Some(RelationLabel::Core)
        } else if similarity > self.partial_threshold {
            Some(RelationLabel::Partial)
        } else {
            None
        }
    }
}

impl Default for LabelClassifier {
    fn default() -> Self {
        Self::from_config(&ComparatorConfig::default())
    }
}
