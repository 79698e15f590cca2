//! End-to-end tests for the compare command with the offline provider

use std::fs;
use std::path::Path;
use veritas_cli::cli::{CompareArgs, PresetArg, ProviderArg};
use veritas_cli::commands::run_compare;
use veritas_cli::{CliError, Config};
use veritas_domain::RelationLabel;
use veritas_store::artifact::read_events;

const LBC: &str = r#"[
  {
    "source": "LBC",
    "title": "Budget law",
    "date": "2024-03-01",
    "claims": [
      {"sentence": "The president did sign the budget law in Paris.", "entities": ["President", "Paris"]}
    ]
  },
  {
    "source": "LBC",
    "title": "Budget law, again",
    "date": "2024-03-20",
    "claims": [
      {"sentence": "The president did sign the budget law in Paris.", "entities": ["Paris"]}
    ]
  }
]"#;

const MTV: &str = r#"[
  {"source": "MTV", "sentence": "The president did sign the budget law in Paris.", "entities": ["paris"], "date": "2024-03-02"},
  {"source": "MTV", "sentence": "The president did not sign the budget law in Paris.", "entities": [" Paris "], "date": "2024-03-02"},
  {"source": "MTV", "sentence": "Heavy snowfall closed mountain roads.", "entities": ["Zahle"], "date": "2024-03-01"}
]"#;

fn write_inputs(dir: &Path) {
    let claims = dir.join("claims");
    fs::create_dir_all(&claims).unwrap();
    fs::write(claims.join("a_lbc.json"), LBC).unwrap();
    fs::write(claims.join("b_mtv.json"), MTV).unwrap();
}

fn args(dir: &Path) -> CompareArgs {
    CompareArgs {
        inputs: vec![dir.join("claims")],
        output: Some(dir.join("out").join("events_clusters.json")),
        provider: Some(ProviderArg::Hashed),
        ..CompareArgs::default()
    }
}

#[test]
fn test_compare_writes_artifact() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path());

    let report = run_compare(args(dir.path()), &Config::default()).unwrap();

    assert_eq!(report.load.files_read, 2);
    assert_eq!(report.metrics.claims_loaded, 5);
    assert_eq!(report.metrics.comparisons, 2);
    assert_eq!(report.metrics.label_count(RelationLabel::Core), 1);
    assert_eq!(report.metrics.label_count(RelationLabel::Disputed), 1);
    assert_eq!(report.metrics.events, 1);

    let event = &report.records[0];
    assert_eq!(event.event_id, "event_1");
    let sources: Vec<&str> = event.claims.iter().map(|c| c.source.as_str()).collect();
    assert_eq!(sources, vec!["LBC", "MTV", "MTV"]);
    assert_eq!(event.claims[0].date, "2024-03-01");
    assert_eq!(event.dominant_label, "Core");

    let written = read_events(&report.output).unwrap();
    assert_eq!(written, report.records);
}

#[test]
fn test_runs_are_reproducible() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path());

    let first = run_compare(args(dir.path()), &Config::default()).unwrap();
    let mut single = args(dir.path());
    single.workers = Some(1);
    let second = run_compare(single, &Config::default()).unwrap();

    assert_eq!(first.records, second.records);
}

#[test]
fn test_preset_and_config_paths() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path());

    let mut config = Config::default();
    config.paths.inputs = vec![dir.path().join("claims")];
    config.paths.output = dir.path().join("from_config.json");

    let report = run_compare(
        CompareArgs {
            preset: Some(PresetArg::Lenient),
            ..CompareArgs::default()
        },
        &config,
    )
    .unwrap();

    assert_eq!(report.output, dir.path().join("from_config.json"));
    assert!(report.output.exists());
    // The 2024-03-20 claim is still 18 days from its counterparts
    assert_eq!(report.metrics.events, 1);
    assert_eq!(report.records[0].claims.len(), 3);
}

#[test]
fn test_no_readable_input() {
    let dir = tempfile::tempdir().unwrap();
    let mut args = args(dir.path());
    args.inputs = vec![dir.path().join("missing.json")];

    let result = run_compare(args, &Config::default());
    assert!(matches!(result, Err(CliError::Store(_))));
    assert!(!dir.path().join("out").join("events_clusters.json").exists());
}

#[test]
fn test_invalid_worker_override() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path());
    let mut args = args(dir.path());
    args.workers = Some(0);

    let result = run_compare(args, &Config::default());
    assert!(matches!(result, Err(CliError::Comparator(_))));
}

#[test]
fn test_empty_claim_directory_writes_empty_artifact() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("claims")).unwrap();

    let report = run_compare(args(dir.path()), &Config::default()).unwrap();

    assert_eq!(report.metrics.claims_loaded, 0);
    assert_eq!(report.metrics.events, 0);
    assert!(report.records.is_empty());
    assert_eq!(fs::read_to_string(&report.output).unwrap().trim(), "[]");
}

#[test]
fn test_empty_sentences_are_counted() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path());
    fs::write(
        dir.path().join("claims").join("c_blank.json"),
        r#"[{"source": "NNA", "sentence": "  ", "entities": ["Paris"], "date": "2024-03-01"}]"#,
    )
    .unwrap();

    let report = run_compare(args(dir.path()), &Config::default()).unwrap();
    assert_eq!(report.load.files_read, 3);
    assert_eq!(report.load.empty_sentences, 1);
    assert_eq!(report.metrics.claims_loaded, 5);
}
