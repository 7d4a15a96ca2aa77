//! What the authentication initiator receives

use super::common::*;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use base64::{engine::general_purpose::STANDARD, Engine};
use flate2::read::DeflateDecoder;
use idpinit_api_saml::saml::SamlBinding;
use idpinit_api_saml::{
    unsolicited_router, LoginRedirectInitiator, UnsolicitedSsoConfig, UnsolicitedSsoState,
};
use std::io::Read;
use std::sync::Arc;
use tower::ServiceExt;
use url::Url;

#[tokio::test]
async fn test_target_becomes_relay_state() {
    let harness = Harness::with_default_metadata();

    harness
        .get(&[("providerId", SP_ENTITY_ID), ("target", "xyz123")])
        .await;

    assert_eq!(harness.initiator.last().relay_state.as_deref(), Some("xyz123"));
}

#[tokio::test]
async fn test_missing_or_blank_target_leaves_relay_state_unset() {
    let harness = Harness::with_default_metadata();

    harness.get(&[("providerId", SP_ENTITY_ID)]).await;
    assert_eq!(harness.initiator.last().relay_state, None);

    harness
        .get(&[("providerId", SP_ENTITY_ID), ("target", "")])
        .await;
    assert_eq!(harness.initiator.last().relay_state, None);
}

#[tokio::test]
async fn test_binding_context_marks_request_unsigned() {
    let harness = Harness::with_default_metadata();

    harness.get(&[("providerId", SP_ENTITY_ID)]).await;

    let context = harness.initiator.last().binding_context;
    assert!(!context.has_binding_signature);
    assert_eq!(context.binding, SamlBinding::HttpRedirect);
}

#[tokio::test]
async fn test_initiator_response_is_returned_unchanged() {
    let harness = Harness::with_default_metadata();

    let response = harness.get(&[("providerId", SP_ENTITY_ID)]).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"authentication initiated");
}

#[tokio::test]
async fn test_login_redirect_carries_decodable_request() {
    let registry = Arc::new(idpinit_api_saml::InMemoryServiceRegistry::from_registrations(
        vec![registration(SP_ENTITY_ID)],
    ));
    let metadata = Harness::with_default_metadata().metadata;
    let initiator = Arc::new(LoginRedirectInitiator::new(
        Url::parse("https://idp.example.com/login").unwrap(),
    ));
    let router = unsolicited_router(
        UnsolicitedSsoState::new(registry, metadata, initiator),
        &UnsolicitedSsoConfig::default(),
    );

    let query: String = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("providerId", SP_ENTITY_ID)
        .append_pair("target", "xyz123")
        .append_pair("time", "1700000000000")
        .finish();
    let response = router
        .oneshot(
            Request::builder()
                .uri(format!("{ENDPOINT}?{query}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    let location = Url::parse(response.headers()[header::LOCATION].to_str().unwrap()).unwrap();
    let pairs: Vec<(String, String)> = location.query_pairs().into_owned().collect();

    assert!(pairs.contains(&("RelayState".to_string(), "xyz123".to_string())));
    let encoded = &pairs
        .iter()
        .find(|(k, _)| k == "SAMLRequest")
        .expect("SAMLRequest parameter")
        .1;

    let deflated = STANDARD.decode(encoded).unwrap();
    let mut xml = String::new();
    DeflateDecoder::new(&deflated[..])
        .read_to_string(&mut xml)
        .unwrap();

    assert!(xml.contains("<samlp:AuthnRequest"));
    assert!(xml.contains(&format!("AssertionConsumerServiceURL=\"{SP_DEFAULT_ACS}\"")));
    assert!(xml.contains("IssueInstant=\"2023-11-14T22:13:20.000Z\""));
}
