//! Shared state for the unsolicited SSO handler

use crate::registry::{MetadataResolver, ServiceRegistry};
use crate::saml::{SamlObjectBuilder, SecureRandom};
use crate::services::{
    AuthenticationInitiator, ProviderResolver, RequestSynthesizer, UnsolicitedSsoService,
};
use std::sync::Arc;

/// Application state for the unsolicited SSO handler
#[derive(Clone)]
pub struct UnsolicitedSsoState {
    pub service: Arc<UnsolicitedSsoService>,
    pub initiator: Arc<dyn AuthenticationInitiator>,
}

impl UnsolicitedSsoState {
    /// Wire the pipeline from its collaborators
    pub fn new(
        registry: Arc<dyn ServiceRegistry>,
        metadata_resolver: Arc<dyn MetadataResolver>,
        initiator: Arc<dyn AuthenticationInitiator>,
    ) -> Self {
        let resolver = ProviderResolver::new(registry, metadata_resolver);
        let synthesizer = RequestSynthesizer::new(SamlObjectBuilder::new(), SecureRandom::global());
        Self {
            service: Arc::new(UnsolicitedSsoService::new(resolver, synthesizer)),
            initiator,
        }
    }
}
