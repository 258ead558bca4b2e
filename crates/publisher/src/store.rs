//! Store-scoped request context.
//!
//! Every adapter, builder, and gateway call receives the store explicitly -
//! there is no ambient "current store" state anywhere in the pipeline.

use secrecy::{ExposeSecret, SecretString};

/// Access-token header used by the Admin GraphQL API.
const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// Everything needed to address and authenticate one store.
///
/// Implements `Debug` manually to redact the access token.
#[derive(Clone)]
pub struct StoreContext {
    /// Store domain (e.g., your-store.myshopify.com).
    pub shop_domain: String,
    /// Admin API version (e.g., 2026-01).
    pub api_version: String,
    /// Admin API access token.
    pub access_token: SecretString,
    /// Whether the store has registered the fulfillment service, which
    /// narrows inventory assignment to one designated location.
    pub fulfillment_service_registered: bool,
}

impl StoreContext {
    /// The store-scoped GraphQL endpoint.
    #[must_use]
    pub fn graphql_endpoint(&self) -> String {
        format!(
            "https://{}/admin/api/{}/graphql.json",
            self.shop_domain, self.api_version
        )
    }

    /// Auth headers for requests to this store.
    #[must_use]
    pub fn auth_headers(&self) -> Vec<(String, String)> {
        vec![
            (
                ACCESS_TOKEN_HEADER.to_string(),
                self.access_token.expose_secret().to_string(),
            ),
            ("Content-Type".to_string(), "application/json".to_string()),
        ]
    }
}

impl std::fmt::Debug for StoreContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreContext")
            .field("shop_domain", &self.shop_domain)
            .field("api_version", &self.api_version)
            .field("access_token", &"[REDACTED]")
            .field(
                "fulfillment_service_registered",
                &self.fulfillment_service_registered,
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> StoreContext {
        StoreContext {
            shop_domain: "test.myshopify.com".to_string(),
            api_version: "2026-01".to_string(),
            access_token: SecretString::from("shpat_secret_token_value"),
            fulfillment_service_registered: false,
        }
    }

    #[test]
    fn test_graphql_endpoint_is_store_scoped() {
        assert_eq!(
            store().graphql_endpoint(),
            "https://test.myshopify.com/admin/api/2026-01/graphql.json"
        );
    }

    #[test]
    fn test_auth_headers_carry_access_token() {
        let headers = store().auth_headers();
        assert!(headers.contains(&(
            "X-Shopify-Access-Token".to_string(),
            "shpat_secret_token_value".to_string()
        )));
    }

    #[test]
    fn test_debug_redacts_access_token() {
        let debug_output = format!("{:?}", store());
        assert!(debug_output.contains("test.myshopify.com"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("shpat_secret_token_value"));
    }
}
