//! IdP-initiated (unsolicited) SSO handler

use crate::error::{ErrorResponse, SamlError, ValidationError};
use crate::handlers::state::UnsolicitedSsoState;
use crate::models::UnsolicitedSsoQuery;
use crate::services::RequestContext;
use axum::{
    extract::{rejection::QueryRejection, OriginalUri, Query, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
};

/// Unsolicited SSO entry point
///
/// The documented path is the default mount point. A router built with a
/// custom `UnsolicitedSsoConfig::endpoint_path` serves the same operation
/// elsewhere.
#[utoipa::path(
    get,
    path = "/idp/profile/SAML2/Unsolicited/SSO",
    params(UnsolicitedSsoQuery),
    responses(
        (status = 302, description = "Redirect into the authentication flow"),
        (status = 400, description = "Missing providerId, malformed query or unresolvable ACS URL", body = ErrorResponse),
        (status = 404, description = "Service provider not registered", body = ErrorResponse),
        (status = 502, description = "Service provider metadata unavailable", body = ErrorResponse),
        (status = 500, description = "Synthesized request failed validation", body = ErrorResponse),
    ),
    tag = "SAML"
)]
pub async fn unsolicited_sso(
    State(state): State<UnsolicitedSsoState>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    query: Result<Query<UnsolicitedSsoQuery>, QueryRejection>,
) -> Response {
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            tracing::warn!(error = %rejection.body_text(), "Malformed unsolicited SSO query");
            return SamlError::from(ValidationError::MalformedQuery(rejection.body_text()))
                .into_response();
        }
    };

    let envelope = match state.service.process(query).await {
        Ok(envelope) => envelope,
        Err(e) => {
            tracing::warn!(error = %e, "Unsolicited SSO request rejected");
            return e.into_response();
        }
    };

    let context = RequestContext { uri, headers };
    state
        .initiator
        .initiate_authentication(envelope, &context)
        .await
}
