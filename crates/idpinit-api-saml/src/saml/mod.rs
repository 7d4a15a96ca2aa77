//! SAML protocol objects and wire helpers

pub mod authn_request;
pub mod encoding;
pub mod metadata;
pub mod random;

pub use authn_request::{
    AuthnRequestFields, Issuer, NameIdPolicy, SamlBinding, SamlObjectBuilder,
    SynthesizedAuthnRequest,
};
pub use encoding::encode_redirect;
pub use metadata::{AssertionConsumerService, MetadataError, ProviderMetadataFacade};
pub use random::SecureRandom;
