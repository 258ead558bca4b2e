//! Publish orchestration.
//!
//! One attempt walks Built -> Sent -> {Accepted | Rejected | TransportFailed}:
//! the mutation document is assembled from a fully materialized canonical
//! product, posted to the store-scoped GraphQL endpoint, and the two-layer
//! response (HTTP transport around GraphQL user errors) is interpreted into
//! a single [`PublishOutcome`]. Catalog batches run the same state machine
//! per product, sequentially, with per-product isolation - one product's
//! rejection never stops the rest of the batch.

use reqwest::Method;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use shopfeed_core::{CanonicalProduct, PublishOutcome, mutation};

use crate::error::PublishError;
use crate::gateway::{ApiGateway, GatewayResponse};
use crate::resync::ResyncQueue;
use crate::store::StoreContext;

// =============================================================================
// Response envelope
// =============================================================================

/// Top level of the GraphQL response body.
#[derive(Debug, Deserialize)]
struct GraphQLEnvelope {
    data: Option<ResponseData>,
}

#[derive(Debug, Deserialize)]
struct ResponseData {
    #[serde(rename = "productCreate")]
    product_create: Option<ProductCreatePayload>,
}

#[derive(Debug, Deserialize)]
struct ProductCreatePayload {
    product: Option<CreatedProduct>,
    #[serde(rename = "userErrors", default)]
    user_errors: Vec<UserError>,
}

#[derive(Debug, Deserialize)]
struct CreatedProduct {
    id: String,
}

/// A field-scoped validation rejection returned alongside an HTTP 200.
#[derive(Debug, Deserialize)]
struct UserError {
    message: String,
}

// =============================================================================
// Catalog report
// =============================================================================

/// Result of one product within a catalog batch.
#[derive(Debug)]
pub struct CatalogEntry {
    /// Title of the attempted product.
    pub title: String,
    /// Terminal outcome, or the adapter/builder error that aborted the
    /// attempt before anything was sent.
    pub result: Result<PublishOutcome, PublishError>,
}

impl CatalogEntry {
    fn is_created(&self) -> bool {
        matches!(&self.result, Ok(outcome) if outcome.is_created())
    }
}

/// Aggregate report over a catalog publish run.
///
/// One entry per attempted product, in feed order.
#[derive(Debug, Default)]
pub struct CatalogReport {
    /// Per-product results.
    pub entries: Vec<CatalogEntry>,
}

impl CatalogReport {
    /// Number of products the platform accepted.
    #[must_use]
    pub fn created_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.is_created()).count()
    }

    /// One-line operator-facing summary of the run.
    #[must_use]
    pub fn summary(&self) -> String {
        let created = self.created_count();
        let total = self.entries.len();
        if created == total {
            format!("Published all {total} products")
        } else {
            format!("Published {created} of {total} products")
        }
    }
}

// =============================================================================
// Publisher
// =============================================================================

/// Drives publish attempts against the platform through a gateway.
#[derive(Debug, Clone)]
pub struct Publisher<G, R> {
    gateway: G,
    resync: R,
}

impl<G: ApiGateway, R: ResyncQueue> Publisher<G, R> {
    /// Create a publisher over a gateway and a resync queue.
    pub const fn new(gateway: G, resync: R) -> Self {
        Self { gateway, resync }
    }

    /// Publish one product and interpret the platform's answer.
    ///
    /// On acceptance the catalog-resync signal is enqueued; rejections and
    /// transport failures emit no signal.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError`] when the mutation document cannot be built;
    /// nothing is sent in that case. Every gateway-level failure is an
    /// `Ok(PublishOutcome::TransportFailed)`, not an error.
    #[instrument(skip(self, store, product), fields(product_title = %product.title))]
    pub async fn publish(
        &self,
        store: &StoreContext,
        product: &CanonicalProduct,
    ) -> Result<PublishOutcome, PublishError> {
        // Built
        let document = mutation::product_create_mutation(product)?;
        debug!(%document, "mutation document assembled");

        // Sent
        let body = serde_json::json!({ "query": document });
        let outcome = match self
            .gateway
            .send(Method::POST, &store.graphql_endpoint(), &store.auth_headers(), &body)
            .await
        {
            Ok(response) => interpret(response),
            Err(error) => PublishOutcome::TransportFailed(error.to_string()),
        };

        match &outcome {
            PublishOutcome::Created(id) => {
                info!(product_id = %id, "product created");
                self.resync.enqueue(store);
            }
            PublishOutcome::RejectedByPlatform(messages) => {
                warn!(errors = messages.join("; "), "platform rejected product");
            }
            PublishOutcome::TransportFailed(reason) => {
                warn!(%reason, "publish transport failed");
            }
        }

        Ok(outcome)
    }

    /// Publish every product of a catalog run, sequentially.
    ///
    /// Each product gets its own publish attempt; a rejection or error is
    /// recorded in the report and the loop moves on to the next product.
    #[instrument(skip(self, store, products), fields(product_count = products.len()))]
    pub async fn publish_catalog(
        &self,
        store: &StoreContext,
        products: Vec<CanonicalProduct>,
    ) -> CatalogReport {
        let mut report = CatalogReport::default();
        for product in products {
            let title = product.title.clone();
            let result = self.publish(store, &product).await;
            report.entries.push(CatalogEntry { title, result });
        }
        info!(
            created = report.created_count(),
            total = report.entries.len(),
            "catalog publish finished"
        );
        report
    }
}

/// Interpret one gateway response into a terminal outcome.
///
/// A 200 with an empty user-errors list and a product id is the only
/// acceptance; a 200 with user errors is a platform rejection; everything
/// else - non-200, undecodable body, or a malformed payload - is a
/// transport failure.
fn interpret(response: GatewayResponse) -> PublishOutcome {
    if response.status != 200 {
        return PublishOutcome::TransportFailed(format!("HTTP {}", response.status));
    }

    let body = match response.body {
        Ok(body) => body,
        Err(error) => {
            return PublishOutcome::TransportFailed(format!("undecodable response body: {error}"));
        }
    };

    let envelope: GraphQLEnvelope = match serde_json::from_value(body) {
        Ok(envelope) => envelope,
        Err(error) => {
            return PublishOutcome::TransportFailed(format!("unexpected response shape: {error}"));
        }
    };

    let Some(payload) = envelope.data.and_then(|data| data.product_create) else {
        return PublishOutcome::TransportFailed("response has no productCreate payload".to_string());
    };

    if !payload.user_errors.is_empty() {
        let messages = payload
            .user_errors
            .into_iter()
            .map(|error| error.message)
            .collect();
        return PublishOutcome::RejectedByPlatform(messages);
    }

    match payload.product {
        Some(product) => PublishOutcome::Created(product.id),
        // An acceptance without a product id is neither a rejection nor a
        // success; the platform response is malformed.
        None => PublishOutcome::TransportFailed(
            "productCreate returned no product id".to_string(),
        ),
    }
}
