//! Synthesis of canonical `AuthnRequest`s from unsolicited parameters

use crate::error::{SamlError, SamlResult};
use crate::saml::{
    AuthnRequestFields, SamlBinding, SamlObjectBuilder, SecureRandom, SynthesizedAuthnRequest,
};
use chrono::{DateTime, Utc};

/// Separator that keeps request IDs valid NCNames (never digit-leading)
const REQUEST_ID_PREFIX: char = '_';

/// Builds the `AuthnRequest` downstream processing treats as solicited
#[derive(Debug, Clone, Copy)]
pub struct RequestSynthesizer {
    builder: SamlObjectBuilder,
    random: &'static SecureRandom,
}

impl RequestSynthesizer {
    #[must_use]
    pub fn new(builder: SamlObjectBuilder, random: &'static SecureRandom) -> Self {
        Self { builder, random }
    }

    /// Synthesize a request for `provider_id` answered at `acs_url`.
    ///
    /// A numeric `time` (epoch millis) becomes the `IssueInstant` and is
    /// appended to the request ID; anything else means server time.
    /// Binding, `ForceAuthn` and `AllowCreate` are fixed.
    pub fn synthesize(
        &self,
        provider_id: &str,
        acs_url: String,
        time: Option<&str>,
    ) -> SamlResult<SynthesizedAuthnRequest> {
        let magnitude = self.random.next_magnitude().map_err(|e| {
            tracing::error!(provider_id = %provider_id, error = %e, "Secure random source failed");
            SamlError::Synthesis(format!("Secure random source failed: {e}"))
        })?;
        let mut id = format!("{REQUEST_ID_PREFIX}{magnitude}");

        let issue_instant = match time.and_then(|raw| parse_epoch_millis(raw).map(|t| (raw, t))) {
            Some((raw, instant)) => {
                id.push_str(raw);
                instant
            }
            None => Utc::now(),
        };

        let fields = AuthnRequestFields {
            id,
            issuer: self.builder.issuer(provider_id)?,
            issue_instant,
            assertion_consumer_service_url: acs_url,
            protocol_binding: SamlBinding::HttpPost,
            name_id_policy: self.builder.name_id_policy(true),
            force_authn: false,
        };

        self.builder.authn_request(fields).inspect_err(|e| {
            tracing::error!(
                provider_id = %provider_id,
                error = %e,
                "Unexpected failure building unsolicited AuthnRequest"
            );
        })
    }
}

/// Parse a decimal millisecond epoch (`-?[0-9]+`) into a UTC instant.
///
/// Returns `None` for non-numeric input and for values outside the range
/// `chrono` can represent.
fn parse_epoch_millis(raw: &str) -> Option<DateTime<Utc>> {
    let digits = raw.strip_prefix('-').unwrap_or(raw);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse::<i64>()
        .ok()
        .and_then(DateTime::from_timestamp_millis)
}
