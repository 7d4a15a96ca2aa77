//! Construction-time configuration for the unsolicited SSO components

use std::time::Duration;

/// Path of the unsolicited SSO endpoint (Shibboleth-compatible)
pub const ENDPOINT_SAML2_IDP_INIT_PROFILE_SSO: &str = "/idp/profile/SAML2/Unsolicited/SSO";

/// Default metadata cache TTL (1 hour)
pub const DEFAULT_METADATA_CACHE_TTL_SECS: u64 = 3600;

/// Default maximum number of cached metadata documents
pub const DEFAULT_METADATA_CACHE_CAPACITY: u64 = 1000;

/// Default timeout for fetching remote metadata
pub const DEFAULT_METADATA_FETCH_TIMEOUT_SECS: u64 = 10;

/// Routing configuration for the unsolicited SSO endpoint
#[derive(Debug, Clone)]
pub struct UnsolicitedSsoConfig {
    pub endpoint_path: String,
}

impl Default for UnsolicitedSsoConfig {
    fn default() -> Self {
        Self {
            endpoint_path: ENDPOINT_SAML2_IDP_INIT_PROFILE_SSO.to_string(),
        }
    }
}

/// Refresh and fetch policy of the caching metadata resolver
#[derive(Debug, Clone)]
pub struct MetadataCacheConfig {
    /// How long a resolved document is served from cache
    pub ttl: Duration,
    pub max_capacity: u64,
    /// Timeout for each remote metadata fetch
    pub fetch_timeout: Duration,
}

impl Default for MetadataCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(DEFAULT_METADATA_CACHE_TTL_SECS),
            max_capacity: DEFAULT_METADATA_CACHE_CAPACITY,
            fetch_timeout: Duration::from_secs(DEFAULT_METADATA_FETCH_TIMEOUT_SECS),
        }
    }
}
