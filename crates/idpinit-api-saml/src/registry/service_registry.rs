//! Service registry for trusted SAML service providers

use crate::error::{SamlError, SamlResult};
use crate::models::ServiceRegistration;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Lookup of registered services by entity ID
#[async_trait]
pub trait ServiceRegistry: Send + Sync {
    /// Return the registration for `provider_id`.
    ///
    /// Fails with [`SamlError::UnknownProvider`] unless the service is
    /// registered, enabled and SAML-capable.
    async fn resolve_registered_service(&self, provider_id: &str)
        -> SamlResult<ServiceRegistration>;
}

/// In-memory service registry keyed by entity ID
#[derive(Debug, Default, Clone)]
pub struct InMemoryServiceRegistry {
    services: Arc<RwLock<HashMap<String, ServiceRegistration>>>,
}

impl InMemoryServiceRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a list of registrations. Later entries win
    /// over earlier ones with the same entity ID.
    #[must_use]
    pub fn from_registrations(registrations: Vec<ServiceRegistration>) -> Self {
        let services = registrations
            .into_iter()
            .map(|r| (r.entity_id.clone(), r))
            .collect();
        Self {
            services: Arc::new(RwLock::new(services)),
        }
    }

    /// Parse a JSON array of registrations
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let registrations: Vec<ServiceRegistration> = serde_json::from_str(json)?;
        Ok(Self::from_registrations(registrations))
    }

    /// Add or replace a registration, returning the one it replaced
    pub async fn register(&self, registration: ServiceRegistration) -> Option<ServiceRegistration> {
        let mut services = self.services.write().await;
        services.insert(registration.entity_id.clone(), registration)
    }

    pub async fn len(&self) -> usize {
        self.services.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.services.read().await.is_empty()
    }
}

#[async_trait]
impl ServiceRegistry for InMemoryServiceRegistry {
    async fn resolve_registered_service(
        &self,
        provider_id: &str,
    ) -> SamlResult<ServiceRegistration> {
        let services = self.services.read().await;
        let registration = services.get(provider_id).ok_or_else(|| {
            tracing::warn!(provider_id = %provider_id, "Service provider is not registered");
            SamlError::UnknownProvider(provider_id.to_string())
        })?;

        if !registration.is_saml_enabled() {
            tracing::warn!(
                provider_id = %provider_id,
                service = %registration.name,
                enabled = registration.enabled,
                "Registered service is disabled or not SAML-capable"
            );
            return Err(SamlError::UnknownProvider(provider_id.to_string()));
        }

        Ok(registration.clone())
    }
}
