//! Unsolicited (IdP-initiated) SAML 2.0 SSO for idpinit
//!
//! A browser arrives with bare query parameters (`providerId`, `shire`,
//! `target`, `time`) instead of a signed `AuthnRequest`. This crate:
//! - validates the parameters
//! - resolves the provider's registration and metadata
//! - synthesizes a canonical `AuthnRequest`
//! - hands it, with relay state, to an authentication initiator

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod registry;
pub mod router;
pub mod saml;
pub mod services;

pub use config::{MetadataCacheConfig, UnsolicitedSsoConfig, ENDPOINT_SAML2_IDP_INIT_PROFILE_SSO};
pub use error::{SamlError, SamlResult, ValidationError};
pub use handlers::UnsolicitedSsoState;
pub use registry::{CachingMetadataResolver, InMemoryServiceRegistry, MetadataResolver, ServiceRegistry};
pub use router::unsolicited_router;
pub use saml::{ProviderMetadataFacade, SecureRandom, SynthesizedAuthnRequest};
pub use services::{
    AuthenticationInitiator, DispatchEnvelope, LoginRedirectInitiator, RequestContext,
    UnsolicitedSsoService,
};
