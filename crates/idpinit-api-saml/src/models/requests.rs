//! Inbound request types for the unsolicited SSO endpoint

use serde::Deserialize;
use utoipa::IntoParams;

/// Query parameter carrying the requesting SP's entity ID
pub const PROVIDER_ID: &str = "providerId";
/// Query parameter carrying the caller-asserted ACS location
pub const SHIRE: &str = "shire";
/// Query parameter carrying the opaque relay-state token
pub const TARGET: &str = "target";
/// Query parameter carrying the caller-asserted issue time (epoch millis)
pub const TIME: &str = "time";

/// Raw query parameters of an unsolicited SSO request.
///
/// Every field is optional at this layer; the parameter extractor decides
/// what is mandatory.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UnsolicitedSsoQuery {
    /// Entity ID of the service provider
    #[serde(rename = "providerId")]
    pub provider_id: Option<String>,
    /// Response location at the SP (the "Assertion Consumer Service")
    pub shire: Option<String>,
    /// Target resource at the SP, or an SP-generated state token
    pub target: Option<String>,
    /// Timestamp in milliseconds since the epoch
    pub time: Option<String>,
}

/// Validated unsolicited request; `provider_id` is never blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundUnsolicitedRequest {
    pub provider_id: String,
    pub shire: Option<String>,
    pub target: Option<String>,
    pub time: Option<String>,
}
