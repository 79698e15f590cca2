//! End-to-end tests for the comparison pipeline
//!
//! Embeddings are scripted so that pair similarities are known exactly.

use veritas_comparator::{Comparator, ComparatorConfig};
use veritas_domain::{ClaimId, Polarity, RelationLabel};
use veritas_llm::{MockEmbedding, MockSentiment};
use veritas_store::{ClaimSet, EventRecord};

const A: &str = "The president signed the law today in Paris.";
const B: &str = "The president signed the new law in Paris.";
const C: &str = "The president denied signing the law in Paris.";

/// Unit vectors with cos(a, b) = 0.92, cos(a, c) = 0.70, cos(b, c) = 0.68
fn scenario_embedder() -> MockEmbedding {
    let b_y = (1.0f64 - 0.92 * 0.92).sqrt();
    let c_y = (0.68 - 0.92 * 0.70) / b_y;
    let c_z = (1.0 - 0.70 * 0.70 - c_y * c_y).sqrt();

    let mut embedder = MockEmbedding::new(vec![0.0, 0.0, 0.0, 1.0]);
    embedder.add_vector(A, vec![1.0, 0.0, 0.0, 0.0]);
    embedder.add_vector(B, vec![0.92, b_y as f32, 0.0, 0.0]);
    embedder.add_vector(C, vec![0.70, c_y as f32, c_z as f32, 0.0]);
    embedder
}

fn scenario_claims() -> (ClaimSet, [ClaimId; 3]) {
    let entities = || vec!["President".to_string(), "Paris".to_string()];
    let mut claims = ClaimSet::new();
    let a = claims.add("X", "", A, entities(), "2024-01-01");
    let b = claims.add("Y", "", B, entities(), "2024-01-02");
    let c = claims.add("Z", "", C, entities(), "2024-01-01");
    (claims, [a, b, c])
}

fn comparator(
    embedder: MockEmbedding,
    sentiment: MockSentiment,
) -> Comparator<MockEmbedding, MockSentiment> {
    Comparator::new(embedder, sentiment, ComparatorConfig::default()).unwrap()
}

#[test]
fn test_president_scenario() {
    let (claims, [a, b, c]) = scenario_claims();
    let outcome = comparator(scenario_embedder(), MockSentiment::default())
        .run(&claims)
        .unwrap();

    let labels: Vec<(ClaimId, ClaimId, RelationLabel)> = outcome
        .results
        .iter()
        .map(|r| (r.claim_a, r.claim_b, r.label))
        .collect();
    assert_eq!(
        labels,
        vec![
            (a, b, RelationLabel::Core),
            (a, c, RelationLabel::Disputed),
            (b, c, RelationLabel::Disputed),
        ]
    );
    assert!((outcome.results[0].similarity - 0.92).abs() < 1e-4);
    assert!((outcome.results[1].similarity - 0.70).abs() < 1e-4);
    assert!((outcome.results[2].similarity - 0.68).abs() < 1e-4);

    assert_eq!(outcome.events.len(), 1);
    let event = &outcome.events[0];
    assert_eq!(event.event_id, "event_1");
    assert_eq!(event.claims, vec![a, b, c]);
    assert_eq!(event.dominant_label, RelationLabel::Disputed);

    let record = EventRecord::from_cluster(event, &claims);
    assert_eq!(record.average_similarity, 0.767);
    assert_eq!(record.dominant_label, "Disputed");
    assert_eq!(record.claims[2].sentence, C);

    assert_eq!(outcome.metrics.claims_loaded, 3);
    assert_eq!(outcome.metrics.candidate_pairs, 3);
    assert_eq!(outcome.metrics.comparisons, 3);
    assert_eq!(outcome.metrics.events, 1);
}

#[test]
fn test_polarity_mismatch_disputes_high_similarity() {
    let mut embedder = MockEmbedding::new(vec![1.0, 0.0]);
    embedder.add_vector("Talks collapsed.", vec![0.99, 0.141]);
    let mut sentiment = MockSentiment::default();
    sentiment.add_response("Talks collapsed.", Polarity::Negative);
    sentiment.add_response("Talks succeeded.", Polarity::Positive);

    let mut claims = ClaimSet::new();
    claims.add("X", "", "Talks succeeded.", vec!["Talks".into()], "");
    claims.add("Y", "", "Talks collapsed.", vec!["talks".into()], "");

    let outcome = comparator(embedder, sentiment.clone()).run(&claims).unwrap();
    assert!(outcome.results[0].similarity > 0.86);
    assert_eq!(outcome.results[0].label, RelationLabel::Disputed);
    assert_eq!(sentiment.call_count(), 2);
}

#[test]
fn test_filtered_pairs_never_reach_scorer() {
    let embedder = MockEmbedding::new(vec![1.0]);
    let mut claims = ClaimSet::new();
    claims.add("X", "", "Quake hits Beirut.", vec!["Beirut".into()], "2024-03-01");
    claims.add("Y", "", "Quake hits Beirut again.", vec!["Beirut".into()], "2024-03-10");
    claims.add("Z", "", "Floods in Tyre.", vec!["Tyre".into()], "2024-03-01");
    claims.add("X", "", "Beirut quake aftermath.", vec!["Beirut".into()], "2024-03-02");

    let outcome = comparator(embedder.clone(), MockSentiment::default())
        .run(&claims)
        .unwrap();

    assert_eq!(outcome.metrics.candidate_pairs, 0);
    assert!(outcome.events.is_empty());
    assert!(embedder.encoded().is_empty());
}

#[test]
fn test_undated_claims_are_compared() {
    let embedder = MockEmbedding::new(vec![1.0]);
    let mut claims = ClaimSet::new();
    claims.add("X", "", "Port reopened.", vec!["Port".into()], "2024-03-01");
    claims.add("Y", "", "Port reopened today.", vec!["port".into()], "yesterday evening");

    let outcome = comparator(embedder, MockSentiment::default()).run(&claims).unwrap();
    assert_eq!(outcome.metrics.candidate_pairs, 1);
    assert_eq!(outcome.events.len(), 1);
}

#[test]
fn test_identical_sentences_stay_distinct() {
    let embedder = MockEmbedding::new(vec![1.0]);
    let mut claims = ClaimSet::new();
    let first = claims.add("X", "Morning", "Schools closed.", vec!["Schools".into()], "");
    let second = claims.add("Y", "Evening", "Schools closed.", vec!["Schools".into()], "");
    let third = claims.add("Z", "Night", "Schools closed.", vec!["Schools".into()], "");

    let outcome = comparator(embedder, MockSentiment::default()).run(&claims).unwrap();
    assert_eq!(outcome.events.len(), 1);
    assert_eq!(outcome.events[0].claims, vec![first, second, third]);
    assert_eq!(outcome.results.len(), 3);
}

#[test]
fn test_embedding_failure_skips_only_that_claim() {
    let mut embedder = scenario_embedder();
    embedder.add_error(C);
    let (claims, [a, b, _]) = scenario_claims();

    let outcome = comparator(embedder, MockSentiment::default()).run(&claims).unwrap();

    assert_eq!(outcome.metrics.unscorable_claims, 1);
    assert_eq!(outcome.metrics.skipped_pairs, 2);
    assert_eq!(outcome.events.len(), 1);
    assert_eq!(outcome.events[0].claims, vec![a, b]);
    assert_eq!(outcome.events[0].dominant_label, RelationLabel::Core);
}

#[test]
fn test_sentiment_failure_counts_as_neutral() {
    let embedder = MockEmbedding::new(vec![1.0]);
    let mut sentiment = MockSentiment::new(Polarity::Neutral);
    sentiment.add_error("Markets rallied.");

    let mut claims = ClaimSet::new();
    claims.add("X", "", "Markets rallied.", vec!["Markets".into()], "");
    claims.add("Y", "", "Markets rallied strongly.", vec!["Markets".into()], "");

    let outcome = comparator(embedder, sentiment).run(&claims).unwrap();
    assert_eq!(outcome.metrics.sentiment_fallbacks, 1);
    assert_eq!(outcome.results[0].label, RelationLabel::Core);
}

#[test]
fn test_each_claim_encoded_once() {
    let embedder = scenario_embedder();
    let (claims, _) = scenario_claims();

    comparator(embedder.clone(), MockSentiment::default())
        .run(&claims)
        .unwrap();

    let mut encoded = embedder.encoded();
    encoded.sort();
    let mut expected = vec![A.to_string(), B.to_string(), C.to_string()];
    expected.sort();
    assert_eq!(encoded, expected);
}

#[test]
fn test_runs_are_deterministic() {
    let (claims, _) = scenario_claims();
    let comparator = comparator(scenario_embedder(), MockSentiment::default());

    let first = comparator.run(&claims).unwrap();
    let second = comparator.run(&claims).unwrap();

    assert_eq!(first.results, second.results);
    assert_eq!(first.events, second.events);
}

#[test]
fn test_unrelated_claims_do_not_disturb_clusters() {
    let (claims, _) = scenario_claims();
    let before = comparator(scenario_embedder(), MockSentiment::default())
        .run(&claims)
        .unwrap();

    let entities = || vec!["President".to_string(), "Paris".to_string()];
    let mut extended = ClaimSet::new();
    extended.add("W", "", "Snow closed the mountain roads.", vec!["Mzaar".into()], "");
    extended.add("X", "", A, entities(), "2024-01-01");
    extended.add("Y", "", B, entities(), "2024-01-02");
    extended.add("Z", "", C, entities(), "2024-01-01");

    let after = comparator(scenario_embedder(), MockSentiment::default())
        .run(&extended)
        .unwrap();

    assert_eq!(after.events.len(), 1);
    assert_eq!(after.events[0].claims, before.events[0].claims);
    assert_eq!(after.events[0].dominant_label, before.events[0].dominant_label);
}

#[test]
fn test_partition_over_many_sources() {
    let embedder = MockEmbedding::new(vec![1.0]);
    let mut claims = ClaimSet::new();
    for n in 0..12 {
        let source = ["LBC", "MTV", "NNA", "Annahar"][n % 4];
        let entity = ["Beirut", "Tyre", "Sidon"][n % 3];
        claims.add(source, "", &format!("Report {} from {}.", n, entity), vec![entity.into()], "");
    }

    let outcome = comparator(embedder, MockSentiment::default()).run(&claims).unwrap();

    let mut in_events: Vec<ClaimId> = outcome.events.iter().flat_map(|e| e.claims.clone()).collect();
    let total = in_events.len();
    in_events.sort();
    in_events.dedup();
    assert_eq!(in_events.len(), total, "clusters must be disjoint");

    let mut in_results: Vec<ClaimId> = outcome
        .results
        .iter()
        .flat_map(|r| [r.claim_a, r.claim_b])
        .collect();
    in_results.sort();
    in_results.dedup();
    assert_eq!(in_events, in_results);

    let ids: Vec<&str> = outcome.events.iter().map(|e| e.event_id.as_str()).collect();
    assert_eq!(ids, vec!["event_1", "event_2", "event_3"]);
}

#[test]
fn test_event_average_uses_rounded_edge_weights() {
    const P: &str = "The cabinet met in Beirut on Monday.";
    const Q: &str = "Cabinet ministers met in Beirut.";
    const R: &str = "The cabinet held a meeting in Beirut.";

    // cos(p, q) = 0.7004, cos(p, r) = 0.7004, cos(q, r) = 0.7014
    let q_y = (1.0f64 - 0.7004 * 0.7004).sqrt();
    let r_y = (0.7014 - 0.7004 * 0.7004) / q_y;
    let r_z = (1.0 - 0.7004 * 0.7004 - r_y * r_y).sqrt();
    let mut embedder = MockEmbedding::new(vec![0.0, 0.0, 0.0, 1.0]);
    embedder.add_vector(P, vec![1.0, 0.0, 0.0, 0.0]);
    embedder.add_vector(Q, vec![0.7004, q_y as f32, 0.0, 0.0]);
    embedder.add_vector(R, vec![0.7004, r_y as f32, r_z as f32, 0.0]);

    let entities = || vec!["Beirut".to_string()];
    let mut claims = ClaimSet::new();
    claims.add("X", "", P, entities(), "2024-05-06");
    claims.add("Y", "", Q, entities(), "2024-05-06");
    claims.add("Z", "", R, entities(), "2024-05-07");

    let outcome = comparator(embedder, MockSentiment::default())
        .run(&claims)
        .unwrap();

    let similarities: Vec<f64> = outcome.results.iter().map(|r| r.similarity).collect();
    assert_eq!(similarities, vec![0.7, 0.7, 0.701]);
    assert!(outcome.results.iter().all(|r| r.label == RelationLabel::Partial));

    assert_eq!(outcome.events.len(), 1);
    let record = EventRecord::from_cluster(&outcome.events[0], &claims);
    assert_eq!(record.average_similarity, 0.7);
}
