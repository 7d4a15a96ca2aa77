//! The unsolicited SSO pipeline: extract, resolve, synthesize, package

use crate::error::SamlResult;
use crate::models::UnsolicitedSsoQuery;
use crate::services::dispatch::{DispatchAdapter, DispatchEnvelope};
use crate::services::{EndpointResolver, ParameterExtractor, ProviderResolver, RequestSynthesizer};

/// Runs one unsolicited request through every stage, stopping at the
/// first failure. Holds no per-request state.
#[derive(Clone)]
pub struct UnsolicitedSsoService {
    resolver: ProviderResolver,
    synthesizer: RequestSynthesizer,
}

impl UnsolicitedSsoService {
    #[must_use]
    pub fn new(resolver: ProviderResolver, synthesizer: RequestSynthesizer) -> Self {
        Self {
            resolver,
            synthesizer,
        }
    }

    /// Produce the envelope for one inbound request
    pub async fn process(&self, query: UnsolicitedSsoQuery) -> SamlResult<DispatchEnvelope> {
        let inbound = ParameterExtractor::extract(query)?;
        let provider_id = inbound.provider_id.as_str();

        let resolved = self.resolver.resolve(provider_id).await?;
        let acs_url =
            EndpointResolver::resolve(inbound.shire.as_deref(), &resolved.metadata, provider_id)?;

        let request = self
            .synthesizer
            .synthesize(provider_id, acs_url, inbound.time.as_deref())?;

        tracing::info!(
            provider_id = %provider_id,
            request_id = %request.id,
            acs_url = %request.assertion_consumer_service_url,
            issue_instant = %request.issue_instant,
            "Synthesized unsolicited AuthnRequest"
        );

        Ok(DispatchAdapter::envelope(request, inbound.target))
    }
}
