//! Application configuration loaded from environment variables.
//!
//! Required variables must be present and valid, or the application will
//! exit with a clear error message.

use idpinit_api_saml::config::{
    DEFAULT_METADATA_CACHE_CAPACITY, DEFAULT_METADATA_CACHE_TTL_SECS,
    DEFAULT_METADATA_FETCH_TIMEOUT_SECS,
};
use idpinit_api_saml::MetadataCacheConfig;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during environment loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    #[error("Invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },

    #[error("Failed to parse port: {0}")]
    InvalidPort(#[from] std::num::ParseIntError),
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Log filter directive (e.g. "info,idpinit_api_saml=debug")
    pub rust_log: String,
    /// Where unsolicited requests are sent to authenticate
    pub login_url: Url,
    /// JSON array of service registrations
    pub services_file: PathBuf,
    pub metadata_cache: MetadataCacheConfig,
}

impl Config {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port: u16 = lookup("PORT").unwrap_or_else(|| "8080".to_string()).parse()?;
        let rust_log = lookup("RUST_LOG").unwrap_or_else(|| "info".to_string());

        let login_url = required(&lookup, "IDP_LOGIN_URL")?;
        let login_url = Url::parse(&login_url).map_err(|e| ConfigError::InvalidValue {
            var: "IDP_LOGIN_URL".to_string(),
            message: e.to_string(),
        })?;

        let services_file = PathBuf::from(required(&lookup, "SAML_SERVICES_FILE")?);

        let metadata_cache = MetadataCacheConfig {
            ttl: Duration::from_secs(parse_u64(
                &lookup,
                "SAML_METADATA_CACHE_TTL_SECS",
                DEFAULT_METADATA_CACHE_TTL_SECS,
            )?),
            max_capacity: parse_u64(
                &lookup,
                "SAML_METADATA_CACHE_CAPACITY",
                DEFAULT_METADATA_CACHE_CAPACITY,
            )?,
            fetch_timeout: Duration::from_secs(parse_u64(
                &lookup,
                "SAML_METADATA_FETCH_TIMEOUT_SECS",
                DEFAULT_METADATA_FETCH_TIMEOUT_SECS,
            )?),
        };

        Ok(Self {
            host,
            port,
            rust_log,
            login_url,
            services_file,
            metadata_cache,
        })
    }
}

fn required<F>(lookup: &F, var: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::MissingVar(var.to_string())),
    }
}

fn parse_u64<F>(lookup: &F, var: &str, default: u64) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        Some(v) => v.parse().map_err(|e: std::num::ParseIntError| ConfigError::InvalidValue {
            var: var.to_string(),
            message: e.to_string(),
        }),
        None => Ok(default),
    }
}
