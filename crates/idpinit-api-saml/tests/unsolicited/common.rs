//! Common test utilities for unsolicited SSO tests
//!
//! Provides counting spies for the registry and metadata resolver, a
//! recording authentication initiator, and request helpers.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Router;
use idpinit_api_saml::models::{MetadataLocation, ServiceProtocol, ServiceRegistration};
use idpinit_api_saml::saml::AssertionConsumerService;
use idpinit_api_saml::{
    unsolicited_router, AuthenticationInitiator, DispatchEnvelope, InMemoryServiceRegistry,
    MetadataResolver, ProviderMetadataFacade, RequestContext, SamlError, SamlResult,
    ServiceRegistry, UnsolicitedSsoConfig, UnsolicitedSsoState,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use uuid::Uuid;

pub const ENDPOINT: &str = "/idp/profile/SAML2/Unsolicited/SSO";
pub const SP_ENTITY_ID: &str = "https://sp.example.org/shibboleth";
pub const SP_DEFAULT_ACS: &str = "https://sp.example.org/Shibboleth.sso/SAML2/POST";

pub const POST_BINDING: &str = "urn:oasis:names:tc:SAML:2.0:bindings:HTTP-POST";

// ============================================================================
// Spies
// ============================================================================

/// Registry wrapper counting every lookup
pub struct SpyRegistry {
    inner: InMemoryServiceRegistry,
    calls: AtomicUsize,
}

impl SpyRegistry {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ServiceRegistry for SpyRegistry {
    async fn resolve_registered_service(
        &self,
        provider_id: &str,
    ) -> SamlResult<ServiceRegistration> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.resolve_registered_service(provider_id).await
    }
}

/// What the spy metadata resolver answers with
#[derive(Clone)]
pub enum MetadataOutcome {
    Resolved(ProviderMetadataFacade),
    Unavailable(String),
}

/// Metadata resolver returning a canned outcome
pub struct SpyMetadataResolver {
    outcome: MetadataOutcome,
    calls: AtomicUsize,
}

impl SpyMetadataResolver {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MetadataResolver for SpyMetadataResolver {
    async fn resolve_metadata(
        &self,
        _registration: &ServiceRegistration,
        provider_id: &str,
    ) -> SamlResult<ProviderMetadataFacade> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            MetadataOutcome::Resolved(facade) => Ok(facade.clone()),
            MetadataOutcome::Unavailable(reason) => Err(SamlError::MetadataUnavailable {
                provider_id: provider_id.to_string(),
                reason: reason.clone(),
            }),
        }
    }
}

/// Initiator that records envelopes and answers 200
#[derive(Default)]
pub struct RecordingInitiator {
    envelopes: Mutex<Vec<DispatchEnvelope>>,
}

impl RecordingInitiator {
    pub fn envelopes(&self) -> Vec<DispatchEnvelope> {
        self.envelopes.lock().unwrap().clone()
    }

    pub fn last(&self) -> DispatchEnvelope {
        self.envelopes()
            .pop()
            .expect("initiator was never invoked")
    }
}

#[async_trait]
impl AuthenticationInitiator for RecordingInitiator {
    async fn initiate_authentication(
        &self,
        envelope: DispatchEnvelope,
        _request: &RequestContext,
    ) -> Response {
        self.envelopes.lock().unwrap().push(envelope);
        (StatusCode::OK, "authentication initiated").into_response()
    }
}

// ============================================================================
// Fixtures
// ============================================================================

/// Route pipeline logs to the test writer
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("debug")
        .try_init();
}

pub fn acs(location: &str, binding: &str, is_default: bool) -> AssertionConsumerService {
    AssertionConsumerService {
        location: location.to_string(),
        binding_uri: binding.to_string(),
        index: Some(0),
        is_default,
    }
}

/// Metadata publishing a single default POST ACS
pub fn default_metadata() -> ProviderMetadataFacade {
    ProviderMetadataFacade::new(
        SP_ENTITY_ID.to_string(),
        vec![acs(SP_DEFAULT_ACS, POST_BINDING, true)],
        None,
    )
}

pub fn registration(entity_id: &str) -> ServiceRegistration {
    ServiceRegistration {
        id: Uuid::new_v4(),
        name: "Example SP".to_string(),
        entity_id: entity_id.to_string(),
        enabled: true,
        protocol: ServiceProtocol::Saml,
        metadata: MetadataLocation::Url {
            url: "https://sp.example.org/metadata".to_string(),
        },
    }
}

/// Router plus handles to every collaborator
pub struct Harness {
    pub router: Router,
    pub registry: Arc<SpyRegistry>,
    pub metadata: Arc<SpyMetadataResolver>,
    pub initiator: Arc<RecordingInitiator>,
}

impl Harness {
    /// `SP_ENTITY_ID` registered, metadata answering with `outcome`
    pub fn new(outcome: MetadataOutcome) -> Self {
        init_test_logging();
        let registry = Arc::new(SpyRegistry {
            inner: InMemoryServiceRegistry::from_registrations(vec![registration(SP_ENTITY_ID)]),
            calls: AtomicUsize::new(0),
        });
        let metadata = Arc::new(SpyMetadataResolver {
            outcome,
            calls: AtomicUsize::new(0),
        });
        let initiator = Arc::new(RecordingInitiator::default());

        let state = UnsolicitedSsoState::new(registry.clone(), metadata.clone(), initiator.clone());
        let router = unsolicited_router(state, &UnsolicitedSsoConfig::default());

        Self {
            router,
            registry,
            metadata,
            initiator,
        }
    }

    pub fn with_default_metadata() -> Self {
        Self::new(MetadataOutcome::Resolved(default_metadata()))
    }

    /// GET the unsolicited endpoint with the given query parameters
    pub async fn get(&self, params: &[(&str, &str)]) -> Response {
        let query: String = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(params)
            .finish();
        let uri = if query.is_empty() {
            ENDPOINT.to_string()
        } else {
            format!("{ENDPOINT}?{query}")
        };

        self.router
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }
}

/// Read a JSON error body
pub async fn json_body(response: Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
