//! `OpenAPI` document for the server.

use axum::{routing::get, Json, Router};
use idpinit_api_saml::error::ErrorResponse;
use utoipa::OpenApi;

/// `OpenAPI` documentation for the unsolicited SSO server.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "idpinit API",
        version = "0.1.0",
        description = "IdP-initiated (unsolicited) SAML 2.0 single sign-on"
    ),
    paths(idpinit_api_saml::handlers::unsolicited::unsolicited_sso),
    components(schemas(ErrorResponse)),
    tags(
        (name = "SAML", description = "Unsolicited SAML 2.0 SSO")
    )
)]
pub struct ApiDoc;

/// Route serving the generated document as JSON
pub fn openapi_routes() -> Router {
    Router::new().route("/api-doc/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
}
