//! Resolution of a provider ID to its registration and metadata

use crate::error::SamlResult;
use crate::models::ServiceRegistration;
use crate::registry::{MetadataResolver, ServiceRegistry};
use crate::saml::ProviderMetadataFacade;
use std::sync::Arc;

/// A trusted registration together with its resolved metadata
#[derive(Debug, Clone)]
pub struct ResolvedProvider {
    pub registration: ServiceRegistration,
    pub metadata: ProviderMetadataFacade,
}

/// Delegates registration and metadata lookup to the external collaborators
#[derive(Clone)]
pub struct ProviderResolver {
    registry: Arc<dyn ServiceRegistry>,
    metadata_resolver: Arc<dyn MetadataResolver>,
}

impl ProviderResolver {
    pub fn new(
        registry: Arc<dyn ServiceRegistry>,
        metadata_resolver: Arc<dyn MetadataResolver>,
    ) -> Self {
        Self {
            registry,
            metadata_resolver,
        }
    }

    /// Resolve a non-blank provider ID. Failures from either collaborator
    /// are surfaced unchanged; nothing is retried here.
    pub async fn resolve(&self, provider_id: &str) -> SamlResult<ResolvedProvider> {
        let registration = self.registry.resolve_registered_service(provider_id).await?;
        let metadata = self
            .metadata_resolver
            .resolve_metadata(&registration, provider_id)
            .await?;

        tracing::debug!(
            provider_id = %provider_id,
            service = %registration.name,
            acs_count = metadata.assertion_consumer_services().len(),
            "Resolved SAML service provider"
        );

        Ok(ResolvedProvider {
            registration,
            metadata,
        })
    }
}
