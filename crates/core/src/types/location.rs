//! Fulfillment location reference data.

use serde::{Deserialize, Serialize};

/// A fulfillment location inventory can be assigned to.
///
/// Read-only reference data fetched per store; immutable for the duration
/// of a publish operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Numeric location id as the platform's REST surface reports it.
    pub id: String,
    /// Location name.
    pub name: String,
    /// Platform global id (`gid://shopify/Location/...`), used for
    /// inventory assignment in mutations.
    pub admin_graphql_api_id: String,
    /// Whether this is a legacy fulfillment-service location.
    pub legacy: bool,
}
