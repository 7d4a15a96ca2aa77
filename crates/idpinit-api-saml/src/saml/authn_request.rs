//! Typed SAML 2.0 protocol objects for synthesized `AuthnRequest`s
//!
//! Each protocol element has its own constructor on [`SamlObjectBuilder`],
//! which checks the element's structural invariants up front. A violation
//! is reported as [`SamlError::Synthesis`]: callers are expected to feed
//! well-formed values, so hitting one is a defect.

use crate::error::{SamlError, SamlResult};
use chrono::{DateTime, SecondsFormat, Utc};

/// SAML 2.0 protocol namespace
pub const SAML2_PROTOCOL_NS: &str = "urn:oasis:names:tc:SAML:2.0:protocol";
/// SAML 2.0 assertion namespace
pub const SAML2_ASSERTION_NS: &str = "urn:oasis:names:tc:SAML:2.0:assertion";
/// SAML protocol version emitted on every request
pub const SAML_VERSION: &str = "2.0";

/// SAML protocol bindings used by this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SamlBinding {
    HttpPost,
    HttpRedirect,
}

impl SamlBinding {
    /// Binding URI as it appears in protocol messages and metadata
    #[must_use]
    pub fn uri(self) -> &'static str {
        match self {
            SamlBinding::HttpPost => "urn:oasis:names:tc:SAML:2.0:bindings:HTTP-POST",
            SamlBinding::HttpRedirect => "urn:oasis:names:tc:SAML:2.0:bindings:HTTP-Redirect",
        }
    }

    /// Parse a binding URI, returning `None` for bindings we do not model
    #[must_use]
    pub fn from_uri(uri: &str) -> Option<Self> {
        match uri {
            "urn:oasis:names:tc:SAML:2.0:bindings:HTTP-POST" => Some(SamlBinding::HttpPost),
            "urn:oasis:names:tc:SAML:2.0:bindings:HTTP-Redirect" => {
                Some(SamlBinding::HttpRedirect)
            }
            _ => None,
        }
    }
}

/// `<saml:Issuer>` element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issuer {
    value: String,
}

impl Issuer {
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// `<samlp:NameIDPolicy>` element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameIdPolicy {
    pub allow_create: bool,
}

/// Canonical `AuthnRequest` produced for an unsolicited SSO request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedAuthnRequest {
    pub id: String,
    pub version: &'static str,
    pub issuer: Issuer,
    pub issue_instant: DateTime<Utc>,
    pub assertion_consumer_service_url: String,
    pub protocol_binding: SamlBinding,
    pub name_id_policy: NameIdPolicy,
    pub force_authn: bool,
}

/// Field values for [`SamlObjectBuilder::authn_request`]
#[derive(Debug, Clone)]
pub struct AuthnRequestFields {
    pub id: String,
    pub issuer: Issuer,
    pub issue_instant: DateTime<Utc>,
    pub assertion_consumer_service_url: String,
    pub protocol_binding: SamlBinding,
    pub name_id_policy: NameIdPolicy,
    pub force_authn: bool,
}

/// Constructors for the protocol elements an `AuthnRequest` is made of
#[derive(Debug, Clone, Copy, Default)]
pub struct SamlObjectBuilder;

impl SamlObjectBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Build an `<saml:Issuer>` carrying the given entity ID
    pub fn issuer(&self, value: &str) -> SamlResult<Issuer> {
        if value.trim().is_empty() {
            return Err(SamlError::Synthesis("Issuer value must not be blank".to_string()));
        }
        Ok(Issuer {
            value: value.to_string(),
        })
    }

    /// Build a `<samlp:NameIDPolicy>`
    #[must_use]
    pub fn name_id_policy(&self, allow_create: bool) -> NameIdPolicy {
        NameIdPolicy { allow_create }
    }

    /// Assemble an `AuthnRequest` from its parts
    pub fn authn_request(&self, fields: AuthnRequestFields) -> SamlResult<SynthesizedAuthnRequest> {
        if !is_valid_ncname(&fields.id) {
            return Err(SamlError::Synthesis(format!(
                "AuthnRequest ID is not a valid NCName: {}",
                fields.id
            )));
        }
        if fields.assertion_consumer_service_url.trim().is_empty() {
            return Err(SamlError::Synthesis(
                "AssertionConsumerServiceURL must not be blank".to_string(),
            ));
        }

        Ok(SynthesizedAuthnRequest {
            id: fields.id,
            version: SAML_VERSION,
            issuer: fields.issuer,
            issue_instant: fields.issue_instant,
            assertion_consumer_service_url: fields.assertion_consumer_service_url,
            protocol_binding: fields.protocol_binding,
            name_id_policy: fields.name_id_policy,
            force_authn: fields.force_authn,
        })
    }
}

impl SynthesizedAuthnRequest {
    /// Serialize to SAML 2.0 XML
    #[must_use]
    pub fn to_xml(&self) -> String {
        let issue_instant = self
            .issue_instant
            .to_rfc3339_opts(SecondsFormat::Millis, true);

        let mut xml = String::new();
        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str("<samlp:AuthnRequest xmlns:samlp=\"");
        xml.push_str(SAML2_PROTOCOL_NS);
        xml.push_str("\"\n    xmlns:saml=\"");
        xml.push_str(SAML2_ASSERTION_NS);
        xml.push_str("\"\n    ID=\"");
        xml.push_str(&xml_escape(&self.id));
        xml.push_str("\"\n    Version=\"");
        xml.push_str(self.version);
        xml.push_str("\"\n    IssueInstant=\"");
        xml.push_str(&issue_instant);
        xml.push_str("\"\n    AssertionConsumerServiceURL=\"");
        xml.push_str(&xml_escape(&self.assertion_consumer_service_url));
        xml.push_str("\"\n    ProtocolBinding=\"");
        xml.push_str(self.protocol_binding.uri());
        xml.push_str("\"\n    ForceAuthn=\"");
        xml.push_str(bool_str(self.force_authn));
        xml.push_str("\">\n    <saml:Issuer>");
        xml.push_str(&xml_escape(self.issuer.value()));
        xml.push_str("</saml:Issuer>\n    <samlp:NameIDPolicy AllowCreate=\"");
        xml.push_str(bool_str(self.name_id_policy.allow_create));
        xml.push_str("\"/>\n</samlp:AuthnRequest>");
        xml
    }
}

fn bool_str(b: bool) -> &'static str {
    if b {
        "true"
    } else {
        "false"
    }
}

/// NCName check (XML Namespaces): no colon, starts with a letter or `_`.
pub(crate) fn is_valid_ncname(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

/// XML escape for attribute and text content
fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
