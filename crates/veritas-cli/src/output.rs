//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use std::path::Path;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};
use veritas_comparator::RunMetrics;
use veritas_domain::RelationLabel;
use veritas_store::{EventRecord, LoadSummary};

/// Longest sentence shown in the event table
const SAMPLE_CHARS: usize = 60;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format the events of a run.
    pub fn format_events(&self, events: &[EventRecord]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(events)?),
            OutputFormat::Table => Ok(self.format_events_table(events)),
            OutputFormat::Quiet => Ok(events
                .iter()
                .map(|e| e.event_id.as_str())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    fn format_events_table(&self, events: &[EventRecord]) -> String {
        if events.is_empty() {
            return self.colorize("No events found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Event", "Claims", "Sources", "Avg Similarity", "Label", "Sample"]);

        for event in events {
            let mut sources: Vec<&str> = event.claims.iter().map(|c| c.source.as_str()).collect();
            sources.sort_unstable();
            sources.dedup();

            let sample = event
                .claims
                .first()
                .map(|c| truncate(&c.sentence, SAMPLE_CHARS))
                .unwrap_or_default();

            builder.push_record([
                event.event_id.clone(),
                event.claims.len().to_string(),
                sources.join(", "),
                format!("{:.3}", event.average_similarity),
                self.label(&event.dominant_label),
                sample,
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format the run summary.
    ///
    /// Empty in quiet mode.
    pub fn format_summary(
        &self,
        metrics: &RunMetrics,
        load: &LoadSummary,
        output: &Path,
    ) -> Result<String> {
        match self.format {
            OutputFormat::Quiet => Ok(String::new()),
            OutputFormat::Json => {
                let summary = serde_json::json!({
                    "files_read": load.files_read,
                    "files_skipped": load.files_skipped,
                    "empty_sentences": load.empty_sentences,
                    "unparsed_dates": load.unparsed_dates,
                    "claims_loaded": metrics.claims_loaded,
                    "candidate_pairs": metrics.candidate_pairs,
                    "comparisons": metrics.comparisons,
                    "core": metrics.label_count(RelationLabel::Core),
                    "partial": metrics.label_count(RelationLabel::Partial),
                    "disputed": metrics.label_count(RelationLabel::Disputed),
                    "events": metrics.events,
                    "skipped_pairs": metrics.skipped_pairs,
                    "sentiment_fallbacks": metrics.sentiment_fallbacks,
                    "runtime_ms": metrics.runtime_ms,
                    "output": output.display().to_string(),
                });
                Ok(serde_json::to_string_pretty(&summary)?)
            }
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Metric", "Value"]);
                let rows = [
                    ("Files read", load.files_read),
                    ("Files skipped", load.files_skipped),
                    ("Empty sentences dropped", load.empty_sentences),
                    ("Claims loaded", metrics.claims_loaded),
                    ("Candidate pairs evaluated", metrics.candidate_pairs),
                    ("Comparisons retained", metrics.comparisons),
                    ("  Core", metrics.label_count(RelationLabel::Core)),
                    ("  Partial", metrics.label_count(RelationLabel::Partial)),
                    ("  Disputed", metrics.label_count(RelationLabel::Disputed)),
                    ("Events formed", metrics.events),
                    ("Pairs skipped (embedding)", metrics.skipped_pairs),
                    ("Sentiment fallbacks", metrics.sentiment_fallbacks),
                ];
                for (name, value) in rows {
                    builder.push_record([name.to_string(), value.to_string()]);
                }

                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));

                let mut lines = vec![table.to_string()];
                if metrics.skipped_pairs > 0 || load.files_skipped > 0 {
                    lines.push(self.warning("Some inputs could not be scored; see log for details"));
                }
                lines.push(self.success(&format!(
                    "Wrote {} event(s) to {}",
                    metrics.events,
                    output.display()
                )));
                Ok(lines.join("\n"))
            }
        }
    }

    /// Format a relation label, colored by kind.
    pub fn label(&self, label: &str) -> String {
        match RelationLabel::parse(label) {
            Some(RelationLabel::Core) => self.colorize(label, "green"),
            Some(RelationLabel::Partial) => self.colorize(label, "yellow"),
            Some(RelationLabel::Disputed) => self.colorize(label, "red"),
            None => label.to_string(),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}
