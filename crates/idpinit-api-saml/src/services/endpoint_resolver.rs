//! Effective ACS location for an unsolicited request

use crate::error::{SamlError, SamlResult};
use crate::saml::ProviderMetadataFacade;
use crate::services::parameter_extractor::is_blank;

/// Picks the reply-to (ACS) URL the response will be delivered to
pub struct EndpointResolver;

impl EndpointResolver {
    /// A non-blank caller-supplied `shire` is used as-is. Otherwise fall
    /// back to the default ACS location published in metadata.
    pub fn resolve(
        shire: Option<&str>,
        metadata: &ProviderMetadataFacade,
        provider_id: &str,
    ) -> SamlResult<String> {
        if let Some(shire) = shire.filter(|s| !is_blank(s)) {
            return Ok(shire.to_string());
        }

        match metadata.assertion_consumer_service() {
            Some(acs) if !is_blank(&acs.location) => Ok(acs.location.clone()),
            _ => {
                tracing::warn!(
                    provider_id = %provider_id,
                    "Unable to resolve SP ACS URL for AuthnRequest construction"
                );
                Err(SamlError::UnresolvableEndpoint(provider_id.to_string()))
            }
        }
    }
}
