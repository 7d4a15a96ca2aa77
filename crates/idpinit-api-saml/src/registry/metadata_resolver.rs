//! Caching resolver for service provider metadata

use crate::config::MetadataCacheConfig;
use crate::error::{SamlError, SamlResult};
use crate::models::{MetadataLocation, ServiceRegistration};
use crate::saml::metadata::MAX_METADATA_SIZE;
use crate::saml::ProviderMetadataFacade;
use async_trait::async_trait;
use chrono::Utc;
use moka::sync::Cache;
use reqwest::{Client, Response};
use url::Url;
use uuid::Uuid;

/// Resolution of a registered provider's published metadata
#[async_trait]
pub trait MetadataResolver: Send + Sync {
    /// Return the metadata facade for `provider_id` under `registration`.
    ///
    /// Any failure (unreachable source, unparsable or expired document)
    /// is reported as [`SamlError::MetadataUnavailable`].
    async fn resolve_metadata(
        &self,
        registration: &ServiceRegistration,
        provider_id: &str,
    ) -> SamlResult<ProviderMetadataFacade>;
}

/// Metadata resolver backed by a bounded TTL cache.
///
/// Inline documents are parsed straight from the registration; URL
/// locations are fetched over HTTPS without following redirects.
pub struct CachingMetadataResolver {
    cache: Cache<(Uuid, String), ProviderMetadataFacade>,
    http_client: Client,
}

impl CachingMetadataResolver {
    #[must_use]
    pub fn new(config: &MetadataCacheConfig) -> Self {
        Self {
            cache: Cache::builder()
                .max_capacity(config.max_capacity)
                .time_to_live(config.ttl)
                .build(),
            http_client: Client::builder()
                .timeout(config.fetch_timeout)
                .redirect(reqwest::redirect::Policy::none())
                .build()
                .unwrap_or_else(|_| Client::new()),
        }
    }

    /// Drop the cached document for a registration
    pub fn invalidate(&self, registration: &ServiceRegistration, provider_id: &str) {
        self.cache
            .invalidate(&(registration.id, provider_id.to_string()));
    }

    async fn load_document(
        &self,
        registration: &ServiceRegistration,
        provider_id: &str,
    ) -> SamlResult<String> {
        match &registration.metadata {
            MetadataLocation::Inline { xml } => Ok(xml.clone()),
            MetadataLocation::Url { url } => self.fetch(url, provider_id).await,
        }
    }

    async fn fetch(&self, url: &str, provider_id: &str) -> SamlResult<String> {
        let unavailable = |reason: String| SamlError::MetadataUnavailable {
            provider_id: provider_id.to_string(),
            reason,
        };

        let parsed = Url::parse(url).map_err(|e| unavailable(format!("Invalid metadata URL: {e}")))?;
        if parsed.scheme() != "https" {
            return Err(unavailable("Metadata URL must use HTTPS".to_string()));
        }

        tracing::debug!(provider_id = %provider_id, metadata_url = %url, "Fetching SP metadata");

        let response = self
            .http_client
            .get(parsed)
            .send()
            .await
            .map_err(|e| unavailable(format!("Metadata fetch failed: {e}")))?
            .error_for_status()
            .map_err(|e| unavailable(format!("Metadata fetch failed: {e}")))?;

        if response
            .content_length()
            .is_some_and(|len| len > MAX_METADATA_SIZE as u64)
        {
            return Err(unavailable("Metadata document too large".to_string()));
        }

        read_limited(response, MAX_METADATA_SIZE)
            .await
            .map_err(unavailable)
    }
}

/// Read a response body, giving up as soon as it grows past `limit` bytes
async fn read_limited(mut response: Response, limit: usize) -> Result<String, String> {
    let mut body = Vec::new();
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| format!("Metadata body read failed: {e}"))?
    {
        if body.len() + chunk.len() > limit {
            return Err(format!("Metadata document exceeds {limit} bytes"));
        }
        body.extend_from_slice(&chunk);
    }
    String::from_utf8(body).map_err(|e| format!("Metadata document is not UTF-8: {e}"))
}

#[async_trait]
impl MetadataResolver for CachingMetadataResolver {
    async fn resolve_metadata(
        &self,
        registration: &ServiceRegistration,
        provider_id: &str,
    ) -> SamlResult<ProviderMetadataFacade> {
        let key = (registration.id, provider_id.to_string());
        let now = Utc::now();

        if let Some(cached) = self.cache.get(&key) {
            if !cached.is_expired(now) {
                tracing::debug!(provider_id = %provider_id, "SP metadata cache hit");
                return Ok(cached);
            }
            self.cache.invalidate(&key);
        }

        tracing::debug!(provider_id = %provider_id, "SP metadata cache miss");

        let xml = self.load_document(registration, provider_id).await?;
        let facade = ProviderMetadataFacade::parse(&xml, provider_id).map_err(|e| {
            SamlError::MetadataUnavailable {
                provider_id: provider_id.to_string(),
                reason: e.to_string(),
            }
        })?;

        if facade.is_expired(now) {
            return Err(SamlError::MetadataUnavailable {
                provider_id: provider_id.to_string(),
                reason: format!(
                    "Metadata expired at {}",
                    facade.valid_until().map(|t| t.to_rfc3339()).unwrap_or_default()
                ),
            });
        }

        self.cache.insert(key, facade.clone());
        Ok(facade)
    }
}
