//! SAML-specific error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Result type for SAML operations
pub type SamlResult<T> = Result<T, SamlError>;

/// Malformed or missing caller input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The `providerId` parameter was absent or blank
    #[error("No providerId parameter given in unsolicited SSO authentication request")]
    MissingProvider,

    /// The query string could not be decoded (e.g. a repeated parameter)
    #[error("Malformed query string: {0}")]
    MalformedQuery(String),
}

/// Errors raised while turning an unsolicited request into an `AuthnRequest`
#[derive(Debug, Error)]
pub enum SamlError {
    /// Caller input is malformed; the caller must resubmit
    #[error("Invalid unsolicited SSO request: {0}")]
    Validation(#[from] ValidationError),

    /// Not a registered, enabled, SAML-capable service
    #[error("Unknown Service Provider: {0}")]
    UnknownProvider(String),

    /// Metadata for a valid registration could not be resolved
    #[error("Metadata unavailable for {provider_id}: {reason}")]
    MetadataUnavailable { provider_id: String, reason: String },

    /// Neither the caller nor the metadata supplied an ACS location
    #[error("Unable to resolve SP ACS URL for AuthnRequest construction for entityID: {0}")]
    UnresolvableEndpoint(String),

    /// Protocol object construction violated an internal invariant
    #[error("AuthnRequest synthesis failed: {0}")]
    Synthesis(String),
}

impl SamlError {
    /// Whether this core may retry the failed stage.
    ///
    /// Always false: failures surface to the caller as-is. Transient
    /// collaborator faults are retried (if at all) inside the collaborator.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        false
    }

    /// Short machine-readable code used in error bodies
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            SamlError::Validation(ValidationError::MissingProvider) => "missing_provider",
            SamlError::Validation(ValidationError::MalformedQuery(_)) => "invalid_query",
            SamlError::UnknownProvider(_) => "unknown_sp",
            SamlError::MetadataUnavailable { .. } => "metadata_unavailable",
            SamlError::UnresolvableEndpoint(_) => "unresolvable_endpoint",
            SamlError::Synthesis(_) => "synthesis_failed",
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            SamlError::Validation(_) | SamlError::UnresolvableEndpoint(_) => {
                StatusCode::BAD_REQUEST
            }
            SamlError::UnknownProvider(_) => StatusCode::NOT_FOUND,
            SamlError::MetadataUnavailable { .. } => StatusCode::BAD_GATEWAY,
            SamlError::Synthesis(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for SamlError {
    fn into_response(self) -> Response {
        let message = match &self {
            SamlError::MetadataUnavailable { provider_id, reason } => {
                tracing::warn!(provider_id = %provider_id, reason = %reason, "SAML metadata unavailable");
                format!("Metadata unavailable for {provider_id}")
            }
            SamlError::Synthesis(msg) => {
                tracing::error!("SAML AuthnRequest synthesis defect: {}", msg);
                "An internal error occurred".to_string()
            }
            // Safe user-facing messages (contain only client-provided IDs)
            SamlError::Validation(_)
            | SamlError::UnknownProvider(_)
            | SamlError::UnresolvableEndpoint(_) => self.to_string(),
        };

        let body = ErrorResponse {
            error: self.error_code().to_string(),
            message,
        };

        (self.status_code(), Json(body)).into_response()
    }
}
