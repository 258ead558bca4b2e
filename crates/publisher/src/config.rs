//! Publisher configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SHOPFEED_SHOP_DOMAIN` - Store domain (e.g., your-store.myshopify.com)
//! - `SHOPFEED_ACCESS_TOKEN` - Admin API access token
//!
//! ## Optional
//! - `SHOPFEED_API_VERSION` - Admin API version (default: 2026-01)
//! - `SHOPFEED_FULFILLMENT_LOCATION_NAME` - Name of the fulfillment-service
//!   location inventory is restricted to (default: Shopfeed Fulfillment)
//! - `SHOPFEED_FULFILLMENT_SERVICE_REGISTERED` - Whether the store has
//!   registered the fulfillment service (default: false)
//! - `SHOPFEED_HTTP_TIMEOUT_SECS` - Timeout applied to every remote fetch
//!   and gateway call (default: 30)

use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

use crate::store::StoreContext;

const DEFAULT_API_VERSION: &str = "2026-01";
const DEFAULT_FULFILLMENT_LOCATION_NAME: &str = "Shopfeed Fulfillment";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Publisher application configuration.
#[derive(Debug, Clone)]
pub struct PublisherConfig {
    /// Store domain.
    pub shop_domain: String,
    /// Admin API version.
    pub api_version: String,
    /// Admin API access token.
    pub access_token: SecretString,
    /// Name of the location the fulfillment service owns.
    pub fulfillment_location_name: String,
    /// Whether the store has registered the fulfillment service.
    pub fulfillment_service_registered: bool,
    /// Timeout for every I/O boundary call.
    pub http_timeout: Duration,
}

impl PublisherConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let shop_domain = get_required_env("SHOPFEED_SHOP_DOMAIN")?;
        let access_token = SecretString::from(get_required_env("SHOPFEED_ACCESS_TOKEN")?);
        let api_version = get_env_or_default("SHOPFEED_API_VERSION", DEFAULT_API_VERSION);
        let fulfillment_location_name = get_env_or_default(
            "SHOPFEED_FULFILLMENT_LOCATION_NAME",
            DEFAULT_FULFILLMENT_LOCATION_NAME,
        );
        let fulfillment_service_registered =
            parse_bool("SHOPFEED_FULFILLMENT_SERVICE_REGISTERED", false)?;
        let timeout_secs = get_env_or_default(
            "SHOPFEED_HTTP_TIMEOUT_SECS",
            &DEFAULT_HTTP_TIMEOUT_SECS.to_string(),
        )
        .parse::<u64>()
        .map_err(|e| {
            ConfigError::InvalidEnvVar("SHOPFEED_HTTP_TIMEOUT_SECS".to_string(), e.to_string())
        })?;

        Ok(Self {
            shop_domain,
            api_version,
            access_token,
            fulfillment_location_name,
            fulfillment_service_registered,
            http_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Build the store context this configuration describes.
    #[must_use]
    pub fn store_context(&self) -> StoreContext {
        StoreContext {
            shop_domain: self.shop_domain.clone(),
            api_version: self.api_version.clone(),
            access_token: self.access_token.clone(),
            fulfillment_service_registered: self.fulfillment_service_registered,
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse a boolean environment variable, accepting `true`/`false`/`1`/`0`.
fn parse_bool(key: &str, default: bool) -> Result<bool, ConfigError> {
    match std::env::var(key) {
        Err(_) => Ok(default),
        Ok(value) => match value.to_lowercase().as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            other => Err(ConfigError::InvalidEnvVar(
                key.to_string(),
                format!("expected true/false, got {other:?}"),
            )),
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_store_context_carries_config_fields() {
        let config = PublisherConfig {
            shop_domain: "test.myshopify.com".to_string(),
            api_version: "2026-01".to_string(),
            access_token: SecretString::from("shpat_token"),
            fulfillment_location_name: "Shopfeed Fulfillment".to_string(),
            fulfillment_service_registered: true,
            http_timeout: Duration::from_secs(30),
        };

        let store = config.store_context();
        assert_eq!(store.shop_domain, "test.myshopify.com");
        assert_eq!(store.api_version, "2026-01");
        assert!(store.fulfillment_service_registered);
    }

    #[test]
    fn test_config_debug_redacts_access_token() {
        let config = PublisherConfig {
            shop_domain: "test.myshopify.com".to_string(),
            api_version: "2026-01".to_string(),
            access_token: SecretString::from("shpat_super_secret"),
            fulfillment_location_name: "Shopfeed Fulfillment".to_string(),
            fulfillment_service_registered: false,
            http_timeout: Duration::from_secs(30),
        };

        let debug_output = format!("{config:?}");
        assert!(!debug_output.contains("shpat_super_secret"));
    }

    #[test]
    fn test_missing_required_var_errors() {
        let err = get_required_env("SHOPFEED_DOES_NOT_EXIST").unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(_)));
    }

    #[test]
    fn test_env_default_applies_when_unset() {
        assert_eq!(
            get_env_or_default("SHOPFEED_ALSO_DOES_NOT_EXIST", "fallback"),
            "fallback"
        );
    }

    #[test]
    fn test_parse_bool_default_applies_when_unset() {
        assert!(!parse_bool("SHOPFEED_BOOL_NOT_SET", false).unwrap());
        assert!(parse_bool("SHOPFEED_BOOL_NOT_SET", true).unwrap());
    }
}
