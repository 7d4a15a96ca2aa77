//! Read-only view over a service provider's published SAML metadata

use crate::saml::SamlBinding;
use chrono::{DateTime, Utc};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;

/// Maximum metadata document size accepted for parsing (1 MB)
pub const MAX_METADATA_SIZE: usize = 1024 * 1024;

/// Metadata parsing errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MetadataError {
    #[error("Metadata document exceeds maximum size ({0} > {MAX_METADATA_SIZE} bytes)")]
    TooLarge(usize),

    #[error("XML parse error: {0}")]
    InvalidXml(String),

    #[error("No EntityDescriptor found for entityID {0}")]
    EntityNotFound(String),

    #[error("Invalid validUntil value: {0}")]
    InvalidValidUntil(String),
}

/// `<md:AssertionConsumerService>` endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssertionConsumerService {
    pub location: String,
    pub binding_uri: String,
    pub index: Option<u32>,
    pub is_default: bool,
}

impl AssertionConsumerService {
    #[must_use]
    pub fn binding(&self) -> Option<SamlBinding> {
        SamlBinding::from_uri(&self.binding_uri)
    }
}

/// Resolved metadata for one service provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderMetadataFacade {
    entity_id: String,
    assertion_consumer_services: Vec<AssertionConsumerService>,
    valid_until: Option<DateTime<Utc>>,
}

impl ProviderMetadataFacade {
    #[must_use]
    pub fn new(
        entity_id: String,
        assertion_consumer_services: Vec<AssertionConsumerService>,
        valid_until: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            entity_id,
            assertion_consumer_services,
            valid_until,
        }
    }

    /// Parse the `EntityDescriptor` for `entity_id` out of a metadata
    /// document. Both single-entity documents and `EntitiesDescriptor`
    /// aggregates are accepted.
    pub fn parse(xml: &str, entity_id: &str) -> Result<Self, MetadataError> {
        if xml.len() > MAX_METADATA_SIZE {
            return Err(MetadataError::TooLarge(xml.len()));
        }

        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        // validUntil of every open EntitiesDescriptor, outermost first
        let mut enclosing: Vec<Option<DateTime<Utc>>> = Vec::new();
        let mut matched = false;
        let mut in_sp_descriptor = false;
        let mut found: Option<Self> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => match local_name(&e).as_str() {
                    "EntitiesDescriptor" => enclosing.push(valid_until_attr(&e)?),
                    "EntityDescriptor" => {
                        if found.is_none() && attr(&e, "entityID").as_deref() == Some(entity_id) {
                            matched = true;
                            found = Some(Self::new(
                                entity_id.to_string(),
                                Vec::new(),
                                effective_valid_until(valid_until_attr(&e)?, &enclosing),
                            ));
                        }
                    }
                    "SPSSODescriptor" if matched => in_sp_descriptor = true,
                    "AssertionConsumerService" if matched && in_sp_descriptor => {
                        push_acs(found.as_mut(), &e);
                    }
                    _ => {}
                },
                Ok(Event::Empty(e)) => match local_name(&e).as_str() {
                    "EntityDescriptor" => {
                        if found.is_none() && attr(&e, "entityID").as_deref() == Some(entity_id) {
                            found = Some(Self::new(
                                entity_id.to_string(),
                                Vec::new(),
                                effective_valid_until(valid_until_attr(&e)?, &enclosing),
                            ));
                        }
                    }
                    "AssertionConsumerService" if matched && in_sp_descriptor => {
                        push_acs(found.as_mut(), &e);
                    }
                    _ => {}
                },
                Ok(Event::End(e)) => {
                    let name = e.local_name();
                    match std::str::from_utf8(name.as_ref()).unwrap_or("") {
                        "SPSSODescriptor" => in_sp_descriptor = false,
                        "EntityDescriptor" => matched = false,
                        "EntitiesDescriptor" => {
                            enclosing.pop();
                        }
                        _ => {}
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(MetadataError::InvalidXml(e.to_string())),
                _ => {}
            }
        }

        found.ok_or_else(|| MetadataError::EntityNotFound(entity_id.to_string()))
    }

    #[must_use]
    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }

    #[must_use]
    pub fn assertion_consumer_services(&self) -> &[AssertionConsumerService] {
        &self.assertion_consumer_services
    }

    #[must_use]
    pub fn valid_until(&self) -> Option<DateTime<Utc>> {
        self.valid_until
    }

    /// Whether the document's `validUntil` lies in the past
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.valid_until.is_some_and(|until| until <= now)
    }

    /// Default ACS endpoint: the one flagged `isDefault`, else the first
    /// HTTP-POST endpoint, else the first endpoint of any binding.
    #[must_use]
    pub fn assertion_consumer_service(&self) -> Option<&AssertionConsumerService> {
        let services = &self.assertion_consumer_services;
        services
            .iter()
            .find(|acs| acs.is_default)
            .or_else(|| {
                services
                    .iter()
                    .find(|acs| acs.binding() == Some(SamlBinding::HttpPost))
            })
            .or_else(|| services.first())
    }
}

fn push_acs(facade: Option<&mut ProviderMetadataFacade>, e: &BytesStart<'_>) {
    let Some(facade) = facade else { return };
    facade
        .assertion_consumer_services
        .push(AssertionConsumerService {
            location: attr(e, "Location").unwrap_or_default(),
            binding_uri: attr(e, "Binding").unwrap_or_default(),
            index: attr(e, "index").and_then(|i| i.parse().ok()),
            is_default: attr(e, "isDefault").is_some_and(|d| d == "true" || d == "1"),
        });
}

fn local_name(e: &BytesStart<'_>) -> String {
    let name = e.local_name();
    std::str::from_utf8(name.as_ref()).unwrap_or("").to_string()
}

fn attr(e: &BytesStart<'_>, key: &str) -> Option<String> {
    e.attributes().flatten().find_map(|a| {
        let local = a.key.local_name();
        if std::str::from_utf8(local.as_ref()).ok()? == key {
            a.unescape_value().ok().map(|v| v.to_string())
        } else {
            None
        }
    })
}

/// An entity is valid only as long as every aggregate enclosing it
fn effective_valid_until(
    own: Option<DateTime<Utc>>,
    enclosing: &[Option<DateTime<Utc>>],
) -> Option<DateTime<Utc>> {
    enclosing.iter().flatten().copied().chain(own).min()
}

fn valid_until_attr(e: &BytesStart<'_>) -> Result<Option<DateTime<Utc>>, MetadataError> {
    attr(e, "validUntil")
        .map(|raw| {
            DateTime::parse_from_rfc3339(&raw)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|_| MetadataError::InvalidValidUntil(raw))
        })
        .transpose()
}
