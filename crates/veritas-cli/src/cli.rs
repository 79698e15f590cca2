//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Veritas - compare claims across news outlets and group them into events.
#[derive(Debug, Parser)]
#[command(name = "veritas")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "VERITAS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (event IDs only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compare claims and write the event-cluster artifact
    Compare(CompareArgs),

    /// Print the effective configuration as TOML
    Config,
}

/// Arguments for the compare command.
#[derive(Debug, Default, Parser)]
pub struct CompareArgs {
    /// Claim batch file or directory (repeatable)
    #[arg(short, long = "input")]
    pub inputs: Vec<PathBuf>,

    /// Event artifact path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Threshold preset
    #[arg(long, value_enum)]
    pub preset: Option<PresetArg>,

    /// Scoring service provider
    #[arg(long, value_enum)]
    pub provider: Option<ProviderArg>,

    /// Worker threads
    #[arg(short, long)]
    pub workers: Option<usize>,
}

/// Threshold preset argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PresetArg {
    /// Default thresholds
    Default,
    /// Higher thresholds, 1-day window
    Strict,
    /// Lower thresholds, 7-day window
    Lenient,
}

/// Provider argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ProviderArg {
    /// Local hashed embeddings, neutral sentiment (offline)
    Hashed,
    /// Ollama server for embeddings and sentiment
    Ollama,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<ProviderArg> for crate::config::ProviderKind {
    fn from(provider: ProviderArg) -> Self {
        match provider {
            ProviderArg::Hashed => crate::config::ProviderKind::Hashed,
            ProviderArg::Ollama => crate::config::ProviderKind::Ollama,
        }
    }
}

impl PresetArg {
    /// Threshold configuration for the preset
    pub fn config(self) -> veritas_comparator::ComparatorConfig {
        match self {
            PresetArg::Default => veritas_comparator::ComparatorConfig::default(),
            PresetArg::Strict => veritas_comparator::ComparatorConfig::strict(),
            PresetArg::Lenient => veritas_comparator::ComparatorConfig::lenient(),
        }
    }
}
