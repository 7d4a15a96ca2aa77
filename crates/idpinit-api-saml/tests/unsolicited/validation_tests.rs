//! Parameter validation happens before any registry or metadata lookup

use super::common::*;
use axum::http::StatusCode;

#[tokio::test]
async fn test_missing_provider_id_is_rejected_without_lookups() {
    let harness = Harness::with_default_metadata();

    let response = harness.get(&[("target", "xyz123")]).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "missing_provider");
    assert_eq!(harness.registry.calls(), 0);
    assert_eq!(harness.metadata.calls(), 0);
    assert!(harness.initiator.envelopes().is_empty());
}

#[tokio::test]
async fn test_blank_provider_id_is_rejected_without_lookups() {
    let harness = Harness::with_default_metadata();

    for blank in ["", "   ", "\t"] {
        let response = harness.get(&[("providerId", blank)]).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "providerId={blank:?}");
    }

    assert_eq!(harness.registry.calls(), 0);
    assert_eq!(harness.metadata.calls(), 0);
}

#[tokio::test]
async fn test_no_query_string_at_all() {
    let harness = Harness::with_default_metadata();
    let response = harness.get(&[]).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(harness.registry.calls(), 0);
}

#[tokio::test]
async fn test_repeated_provider_id_gets_json_error_without_lookups() {
    let harness = Harness::with_default_metadata();

    let response = harness
        .get(&[("providerId", SP_ENTITY_ID), ("providerId", "https://other.example.org")])
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "invalid_query");
    assert!(body["message"].is_string());
    assert_eq!(harness.registry.calls(), 0);
    assert_eq!(harness.metadata.calls(), 0);
}
