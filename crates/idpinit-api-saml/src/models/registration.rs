//! Registered service model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Protocol a registered service speaks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceProtocol {
    Saml,
    #[serde(other)]
    Other,
}

/// Where a service provider's metadata document lives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MetadataLocation {
    /// Metadata XML stored with the registration
    Inline { xml: String },
    /// Metadata published at an HTTPS URL
    Url { url: String },
}

/// A trusted service registration, owned by the service registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRegistration {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    /// Entity ID the SP identifies itself with (`providerId`)
    pub entity_id: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_protocol")]
    pub protocol: ServiceProtocol,
    pub metadata: MetadataLocation,
}

impl ServiceRegistration {
    /// Whether this registration may take part in SAML SSO
    #[must_use]
    pub fn is_saml_enabled(&self) -> bool {
        self.enabled && self.protocol == ServiceProtocol::Saml
    }
}

fn default_true() -> bool {
    true
}

fn default_protocol() -> ServiceProtocol {
    ServiceProtocol::Saml
}
