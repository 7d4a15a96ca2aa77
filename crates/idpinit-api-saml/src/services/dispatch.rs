//! Hand-off of synthesized requests to the authentication pipeline

use crate::saml::{SamlBinding, SynthesizedAuthnRequest};
use crate::services::parameter_extractor::is_blank;
use async_trait::async_trait;
use axum::http::{HeaderMap, Uri};
use axum::response::Response;

/// Transport facts about how the request reached the IdP
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BindingContext {
    /// Unsolicited requests arrive unsigned; never treat them as if a
    /// binding-level signature had been verified.
    pub has_binding_signature: bool,
    pub binding: SamlBinding,
}

/// A synthesized request packaged for the authentication-initiation step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchEnvelope {
    pub request: SynthesizedAuthnRequest,
    pub binding_context: BindingContext,
    pub relay_state: Option<String>,
}

/// The parts of the inbound HTTP request the initiator may need
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub uri: Uri,
    pub headers: HeaderMap,
}

/// Starts authentication for a dispatched request.
///
/// The returned response goes back to the browser untouched; this crate
/// does not inspect the outcome.
#[async_trait]
pub trait AuthenticationInitiator: Send + Sync {
    async fn initiate_authentication(
        &self,
        envelope: DispatchEnvelope,
        request: &RequestContext,
    ) -> Response;
}

/// Wraps synthesized requests into [`DispatchEnvelope`]s
pub struct DispatchAdapter;

impl DispatchAdapter {
    /// Package `request`, attaching `target` as relay state only when it
    /// is present and non-blank.
    #[must_use]
    pub fn envelope(request: SynthesizedAuthnRequest, target: Option<String>) -> DispatchEnvelope {
        DispatchEnvelope {
            request,
            binding_context: BindingContext {
                has_binding_signature: false,
                binding: SamlBinding::HttpRedirect,
            },
            relay_state: target.filter(|t| !is_blank(t)),
        }
    }
}
