//! Provider and endpoint resolution through the HTTP surface

use super::common::*;
use axum::http::StatusCode;
use idpinit_api_saml::ProviderMetadataFacade;

const REDIRECT_BINDING: &str = "urn:oasis:names:tc:SAML:2.0:bindings:HTTP-Redirect";

#[tokio::test]
async fn test_unknown_provider_is_not_found() {
    let harness = Harness::with_default_metadata();

    let response = harness
        .get(&[("providerId", "https://unknown.example.net")])
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["error"], "unknown_sp");
    assert_eq!(harness.registry.calls(), 1);
    assert_eq!(harness.metadata.calls(), 0);
    assert!(harness.initiator.envelopes().is_empty());
}

#[tokio::test]
async fn test_unavailable_metadata_is_bad_gateway() {
    let harness = Harness::new(MetadataOutcome::Unavailable("connection refused".to_string()));

    let response = harness.get(&[("providerId", SP_ENTITY_ID)]).await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = json_body(response).await;
    assert_eq!(body["error"], "metadata_unavailable");
    // Upstream failure detail stays in the logs
    assert!(!body["message"]
        .as_str()
        .unwrap()
        .contains("connection refused"));
    assert_eq!(harness.metadata.calls(), 1);
    assert!(harness.initiator.envelopes().is_empty());
}

#[tokio::test]
async fn test_default_acs_used_without_shire() {
    let harness = Harness::with_default_metadata();

    let response = harness.get(&[("providerId", SP_ENTITY_ID)]).await;

    assert_eq!(response.status(), StatusCode::OK);
    let envelope = harness.initiator.last();
    assert_eq!(envelope.request.assertion_consumer_service_url, SP_DEFAULT_ACS);
}

#[tokio::test]
async fn test_blank_shire_falls_back_to_default_acs() {
    let harness = Harness::with_default_metadata();

    let response = harness
        .get(&[("providerId", SP_ENTITY_ID), ("shire", " ")])
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        harness.initiator.last().request.assertion_consumer_service_url,
        SP_DEFAULT_ACS
    );
}

#[tokio::test]
async fn test_shire_overrides_metadata_verbatim() {
    let harness = Harness::with_default_metadata();
    let shire = "https://sp.example.org/other/acs?x=1";

    let response = harness
        .get(&[("providerId", SP_ENTITY_ID), ("shire", shire)])
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        harness.initiator.last().request.assertion_consumer_service_url,
        shire
    );
}

#[tokio::test]
async fn test_no_acs_in_metadata_is_unresolvable() {
    let harness = Harness::new(MetadataOutcome::Resolved(ProviderMetadataFacade::new(
        SP_ENTITY_ID.to_string(),
        Vec::new(),
        None,
    )));

    let response = harness.get(&[("providerId", SP_ENTITY_ID)]).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "unresolvable_endpoint");
    assert!(body["message"].as_str().unwrap().contains(SP_ENTITY_ID));
    assert!(harness.initiator.envelopes().is_empty());
}

#[tokio::test]
async fn test_shire_rescues_metadata_without_acs() {
    let harness = Harness::new(MetadataOutcome::Resolved(ProviderMetadataFacade::new(
        SP_ENTITY_ID.to_string(),
        Vec::new(),
        None,
    )));

    let response = harness
        .get(&[("providerId", SP_ENTITY_ID), ("shire", "https://sp.example.org/acs")])
        .await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_default_flagged_endpoint_wins_over_order() {
    let harness = Harness::new(MetadataOutcome::Resolved(ProviderMetadataFacade::new(
        SP_ENTITY_ID.to_string(),
        vec![
            acs("https://sp.example.org/first", POST_BINDING, false),
            acs("https://sp.example.org/redirect", REDIRECT_BINDING, true),
        ],
        None,
    )));

    harness.get(&[("providerId", SP_ENTITY_ID)]).await;

    assert_eq!(
        harness.initiator.last().request.assertion_consumer_service_url,
        "https://sp.example.org/redirect"
    );
}
