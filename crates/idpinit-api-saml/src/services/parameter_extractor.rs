//! Parameter extraction for unsolicited SSO requests

use crate::error::{SamlResult, ValidationError};
use crate::models::{InboundUnsolicitedRequest, UnsolicitedSsoQuery};

/// Turns raw query parameters into an [`InboundUnsolicitedRequest`]
pub struct ParameterExtractor;

impl ParameterExtractor {
    /// Extract the four logical fields of an unsolicited request.
    ///
    /// `providerId` is mandatory and must not be blank. The remaining
    /// parameters are passed through verbatim.
    pub fn extract(query: UnsolicitedSsoQuery) -> SamlResult<InboundUnsolicitedRequest> {
        let provider_id = match query.provider_id {
            Some(id) if !is_blank(&id) => id,
            _ => {
                tracing::warn!(
                    "No providerId parameter given in unsolicited SSO authentication request."
                );
                return Err(ValidationError::MissingProvider.into());
            }
        };

        Ok(InboundUnsolicitedRequest {
            provider_id,
            shire: query.shire,
            target: query.target,
            time: query.time,
        })
    }
}

/// True if the string is empty or whitespace only
pub(crate) fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}
