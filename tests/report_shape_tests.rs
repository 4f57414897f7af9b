//! Served JSON contract tests.
//!
//! Downstream consumers key on exact field names in the report; these tests
//! pin the wire shape end to end rather than through serde unit tests alone.

mod common;

use std::collections::BTreeSet;
use std::sync::Arc;

use common::fixtures::{self, record};
use common::harness::{TestServerConfig, spawn_test_server};
use common::http_client::TestClient;

use dejavu::textgen::MockTextService;

fn field_names(value: &serde_json::Value) -> BTreeSet<String> {
    value
        .as_object()
        .expect("expected a JSON object")
        .keys()
        .cloned()
        .collect()
}

#[tokio::test]
async fn test_report_field_contract() {
    let server = spawn_test_server(TestServerConfig::default())
        .await
        .expect("Server should start");
    let client = TestClient::new(server.url());

    let outcome = client
        .analyze(&fixtures::paper_text(), None)
        .await
        .expect("Request should succeed");
    assert_eq!(outcome.status, reqwest::StatusCode::OK);

    let expected: BTreeSet<String> = [
        "submitted_paper_title",
        "total_internet_papers_analyzed",
        "top_similar_papers",
        "overall_overlap_pct",
        "overall_plagiarism_risk",
        "novelty_score",
        "temporal_risk_multiplier",
        "explainability",
        "recommendations",
        "detailed_report",
        "processed_at",
    ]
    .into_iter()
    .map(str::to_string)
    .collect();
    assert_eq!(field_names(&outcome.body), expected);

    let candidate = &outcome.body["top_similar_papers"][0];
    let expected_candidate: BTreeSet<String> = [
        "title",
        "url",
        "source",
        "overlap_pct",
        "core_concepts_overlap",
        "matching_concepts",
        "publication_year",
    ]
    .into_iter()
    .map(str::to_string)
    .collect();
    assert_eq!(field_names(candidate), expected_candidate);

    let pair = &candidate["matching_concepts"][0];
    let expected_pair: BTreeSet<String> = ["source", "candidate", "score"]
        .into_iter()
        .map(str::to_string)
        .collect();
    assert_eq!(field_names(pair), expected_pair);

    let explainability = &outcome.body["explainability"];
    let expected_explainability: BTreeSet<String> = [
        "top_contributing_phrases",
        "attention_weights",
        "false_positives_filtered",
    ]
    .into_iter()
    .map(str::to_string)
    .collect();
    assert_eq!(field_names(explainability), expected_explainability);
}

#[tokio::test]
async fn test_unknown_verdict_serializes_nulls() {
    let config = TestServerConfig {
        providers: Vec::new(),
        textgen: Arc::new(MockTextService::with_records(vec![record(
            "attention mechanism",
            0.9,
        )])),
        ..Default::default()
    };
    let server = spawn_test_server(config).await.expect("Server should start");
    let client = TestClient::new(server.url());

    let outcome = client
        .analyze(&fixtures::paper_text(), None)
        .await
        .expect("Request should succeed");

    assert_eq!(outcome.status, reqwest::StatusCode::OK);
    assert!(outcome.body["overall_overlap_pct"].is_null());
    assert!(outcome.body["novelty_score"].is_null());
    assert_eq!(outcome.body["overall_plagiarism_risk"], "UNKNOWN");
}

#[tokio::test]
async fn test_error_body_shape() {
    let server = spawn_test_server(TestServerConfig::default())
        .await
        .expect("Server should start");
    let client = TestClient::new(server.url());

    let outcome = client
        .analyze("   ", None)
        .await
        .expect("Request should complete");

    assert_eq!(outcome.status, reqwest::StatusCode::BAD_REQUEST);
    assert_eq!(outcome.dejavu_status.as_deref(), Some("invalid_request"));
    let expected: BTreeSet<String> = ["error", "code"].into_iter().map(str::to_string).collect();
    assert_eq!(field_names(&outcome.body), expected);
    assert_eq!(outcome.body["code"], 400);
}

#[tokio::test]
async fn test_unknown_request_fields_are_ignored() {
    let server = spawn_test_server(TestServerConfig::default())
        .await
        .expect("Server should start");
    let client = TestClient::new(server.url());

    let payload = serde_json::json!({
        "text": fixtures::paper_text(),
        "filename": "paper.txt",
        "client_version": "2.3.1"
    });
    let outcome = client
        .analyze_raw(&payload)
        .await
        .expect("Request should succeed");

    assert_eq!(outcome.status, reqwest::StatusCode::OK);
}

#[tokio::test]
async fn test_missing_text_field_is_rejected() {
    let server = spawn_test_server(TestServerConfig::default())
        .await
        .expect("Server should start");
    let client = TestClient::new(server.url());

    let outcome = client
        .analyze_raw(&serde_json::json!({ "filename": "paper.txt" }))
        .await
        .expect("Request should complete");

    assert_eq!(outcome.status, reqwest::StatusCode::UNPROCESSABLE_ENTITY);
}
