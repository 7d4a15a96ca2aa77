//! Authentication initiator that redirects the browser to the login flow

use crate::error::SamlResult;
use crate::saml::encode_redirect;
use crate::services::dispatch::{AuthenticationInitiator, DispatchEnvelope, RequestContext};
use async_trait::async_trait;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use url::Url;

/// Sends the browser to the IdP login URL with the synthesized request
/// attached as an HTTP-Redirect encoded `SAMLRequest` parameter.
#[derive(Debug, Clone)]
pub struct LoginRedirectInitiator {
    login_url: Url,
}

impl LoginRedirectInitiator {
    #[must_use]
    pub fn new(login_url: Url) -> Self {
        Self { login_url }
    }

    /// Login URL carrying `SAMLRequest` and, when set, `RelayState`
    pub fn redirect_url(&self, envelope: &DispatchEnvelope) -> SamlResult<Url> {
        let encoded = encode_redirect(&envelope.request.to_xml())?;

        let mut url = self.login_url.clone();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("SAMLRequest", &encoded);
            if let Some(relay_state) = &envelope.relay_state {
                query.append_pair("RelayState", relay_state);
            }
        }
        Ok(url)
    }
}

#[async_trait]
impl AuthenticationInitiator for LoginRedirectInitiator {
    async fn initiate_authentication(
        &self,
        envelope: DispatchEnvelope,
        _request: &RequestContext,
    ) -> Response {
        match self.redirect_url(&envelope) {
            Ok(url) => {
                tracing::info!(
                    request_id = %envelope.request.id,
                    provider_id = %envelope.request.issuer.value(),
                    "Redirecting unsolicited SSO request to login"
                );
                (StatusCode::FOUND, [(header::LOCATION, url.to_string())]).into_response()
            }
            Err(e) => e.into_response(),
        }
    }
}
