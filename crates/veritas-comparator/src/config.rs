//! Configuration for comparison runs
//!
//! Defines the label thresholds, the candidate time window, the contradiction
//! heuristic and the worker pool sizing.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Negation markers used by the contradiction heuristic
pub const DEFAULT_NEGATION_WORDS: [&str; 7] =
    ["not", "no", "never", "deny", "denied", "rejected", "false"];

/// Configuration for a comparison run
///
/// # Examples
///
/// ```
/// use veritas_comparator::ComparatorConfig;
///
/// // Default configuration
/// let config = ComparatorConfig::default();
/// assert_eq!(config.core_threshold, 0.85);
/// assert_eq!(config.time_window_days, 2);
///
/// // Fewer, tighter matches
/// let config = ComparatorConfig::strict();
/// assert!(config.core_threshold > 0.85);
///
/// // More, looser matches
/// let config = ComparatorConfig::lenient();
/// assert!(config.time_window_days > 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparatorConfig {
    /// Similarity above which a non-contradictory pair is Core
    /// Default: 0.85
    pub core_threshold: f64,

    /// Similarity above which a non-contradictory pair is Partial
    /// Default: 0.65
    pub partial_threshold: f64,

    /// Similarity above which a pair is checked for contradiction
    /// Default: 0.6
    pub contradiction_similarity: f64,

    /// Maximum distance between two parsed publication dates, in whole days
    /// Default: 2
    pub time_window_days: i64,

    /// Case-insensitive substrings that mark a sentence as negated
    pub negation_words: Vec<String>,

    /// Sentences are truncated to this many characters before classification
    /// Default: 512
    pub sentiment_max_chars: usize,

    /// Sentences per embedding request
    /// Default: 32
    pub embedding_batch_size: usize,

    /// Worker threads for candidate generation and scoring
    /// Default: 4
    pub workers: usize,

    /// Timeout for a single service request (seconds)
    /// Default: 30
    pub request_timeout_secs: u64,
}

impl Default for ComparatorConfig {
    fn default() -> Self {
        Self {
            core_threshold: 0.85,
            partial_threshold: 0.65,
            contradiction_similarity: 0.6,
            time_window_days: 2,
            negation_words: DEFAULT_NEGATION_WORDS.iter().map(|w| w.to_string()).collect(),
            sentiment_max_chars: 512,
            embedding_batch_size: 32,
            workers: 4,
            request_timeout_secs: 30,
        }
    }
}

impl ComparatorConfig {
    /// Strict preset: higher thresholds, one-day window
    pub fn strict() -> Self {
        Self {
            core_threshold: 0.9,
            partial_threshold: 0.75,
            contradiction_similarity: 0.7,
            time_window_days: 1,
            ..Self::default()
        }
    }

    /// Lenient preset: lower thresholds, week-long window
    pub fn lenient() -> Self {
        Self {
            core_threshold: 0.8,
            partial_threshold: 0.55,
            contradiction_similarity: 0.5,
            time_window_days: 7,
            ..Self::default()
        }
    }

    /// Get the request timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("core_threshold", self.core_threshold),
            ("partial_threshold", self.partial_threshold),
            ("contradiction_similarity", self.contradiction_similarity),
        ] {
            if !(-1.0..=1.0).contains(&value) {
                return Err(format!("{} must be within [-1, 1], got {}", name, value));
            }
        }
        if self.partial_threshold > self.core_threshold {
            return Err("partial_threshold cannot exceed core_threshold".to_string());
        }
        if self.time_window_days < 0 {
            return Err("time_window_days cannot be negative".to_string());
        }
        if self.negation_words.iter().any(|w| w.trim().is_empty()) {
            return Err("negation_words cannot contain empty entries".to_string());
        }
        if self.sentiment_max_chars == 0 {
            return Err("sentiment_max_chars must be greater than 0".to_string());
        }
        if self.embedding_batch_size == 0 {
            return Err("embedding_batch_size must be greater than 0".to_string());
        }
        if self.workers == 0 {
            return Err("workers must be greater than 0".to_string());
        }
        if self.request_timeout_secs == 0 {
            return Err("request_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ComparatorConfig::default();
        assert_eq!(config.core_threshold, 0.85);
        assert_eq!(config.partial_threshold, 0.65);
        assert_eq!(config.contradiction_similarity, 0.6);
        assert_eq!(config.time_window_days, 2);
        assert_eq!(config.sentiment_max_chars, 512);
        assert_eq!(config.embedding_batch_size, 32);
        assert_eq!(config.workers, 4);
        assert_eq!(config.negation_words.len(), 7);
        assert!(config.negation_words.contains(&"denied".to_string()));
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_presets_are_valid() {
        assert!(ComparatorConfig::default().validate().is_ok());
        assert!(ComparatorConfig::strict().validate().is_ok());
        assert!(ComparatorConfig::lenient().validate().is_ok());
    }

    #[test]
    fn test_presets_differ_in_direction() {
        let default = ComparatorConfig::default();
        let strict = ComparatorConfig::strict();
        let lenient = ComparatorConfig::lenient();
        assert!(strict.partial_threshold > default.partial_threshold);
        assert!(lenient.partial_threshold < default.partial_threshold);
        assert!(strict.time_window_days < lenient.time_window_days);
        assert_eq!(strict.workers, default.workers);
    }

    #[test]
    fn test_invalid_threshold_order() {
        let config = ComparatorConfig {
            partial_threshold: 0.9,
            ..ComparatorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_values() {
        let mut config = ComparatorConfig::default();
        config.workers = 0;
        assert!(config.validate().is_err());

        let mut config = ComparatorConfig::default();
        config.embedding_batch_size = 0;
        assert!(config.validate().is_err());

        let mut config = ComparatorConfig::default();
        config.core_threshold = 1.5;
        assert!(config.validate().is_err());

        let mut config = ComparatorConfig::default();
        config.time_window_days = -1;
        assert!(config.validate().is_err());

        let mut config = ComparatorConfig::default();
        config.negation_words.push("  ".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = ComparatorConfig::from_toml("core_threshold = 0.9\nworkers = 2\n").unwrap();
        assert_eq!(config.core_threshold, 0.9);
        assert_eq!(config.workers, 2);
        assert_eq!(config.partial_threshold, 0.65);
        assert_eq!(config.negation_words.len(), 7);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ComparatorConfig::lenient();
        let toml_str = config.to_toml().unwrap();
        let parsed = ComparatorConfig::from_toml(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_bad_toml() {
        assert!(ComparatorConfig::from_toml("workers = \"many\"").is_err());
    }
}
