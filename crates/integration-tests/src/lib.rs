//! Integration tests for Shopfeed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopfeed-integration-tests
//! ```
//!
//! The tests drive the full publish pipeline - adapter, mutation builder,
//! orchestrator - against a scripted in-memory gateway; no network or store
//! credentials are needed. This crate's library is the shared test support:
//! a [`ScriptedGateway`] that replays canned platform responses and records
//! every request, a [`CountingResync`] that counts resync signals, and
//! fixture constructors.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use reqwest::Method;
use secrecy::SecretString;
use serde_json::json;

use shopfeed_publisher::{ApiGateway, GatewayResponse, PublishError, ResyncQueue, StoreContext};

// =============================================================================
// Scripted gateway
// =============================================================================

/// One request the gateway saw, recorded for assertions.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// HTTP method name.
    pub method: String,
    /// Request endpoint.
    pub endpoint: String,
    /// Headers as supplied by the orchestrator.
    pub headers: Vec<(String, String)>,
    /// JSON request body.
    pub body: serde_json::Value,
}

impl RecordedRequest {
    /// The `query` string of the request body.
    #[must_use]
    pub fn query(&self) -> &str {
        self.body
            .get("query")
            .and_then(serde_json::Value::as_str)
            .unwrap_or_default()
    }
}

#[derive(Default)]
struct ScriptedGatewayInner {
    responses: Mutex<VecDeque<(u16, serde_json::Value)>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// An in-memory gateway that replays scripted responses in order.
///
/// Clones share state, so a test can keep one handle and give the
/// publisher another.
#[derive(Clone, Default)]
pub struct ScriptedGateway {
    inner: Arc<ScriptedGatewayInner>,
}

impl ScriptedGateway {
    /// Create a gateway with no scripted responses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the response for the next request.
    pub fn push(&self, status: u16, body: serde_json::Value) {
        self.inner
            .responses
            .lock()
            .expect("responses lock")
            .push_back((status, body));
    }

    /// Every request the gateway has seen so far, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.inner.requests.lock().expect("requests lock").clone()
    }
}

impl ApiGateway for ScriptedGateway {
    async fn send(
        &self,
        method: Method,
        endpoint: &str,
        headers: &[(String, String)],
        body: &serde_json::Value,
    ) -> Result<GatewayResponse, PublishError> {
        self.inner
            .requests
            .lock()
            .expect("requests lock")
            .push(RecordedRequest {
                method: method.to_string(),
                endpoint: endpoint.to_string(),
                headers: headers.to_vec(),
                body: body.clone(),
            });

        let (status, scripted) = self
            .inner
            .responses
            .lock()
            .expect("responses lock")
            .pop_front()
            .expect("gateway called more times than scripted");

        Ok(GatewayResponse {
            status,
            body: Ok(scripted),
        })
    }
}

// =============================================================================
// Counting resync queue
// =============================================================================

/// A resync queue that only counts how often it was signalled.
#[derive(Clone, Default)]
pub struct CountingResync {
    count: Arc<AtomicUsize>,
}

impl CountingResync {
    /// Create a queue with zero recorded signals.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of resync signals received.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

impl ResyncQueue for CountingResync {
    fn enqueue(&self, _store: &StoreContext) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }
}

// =============================================================================
// Fixtures
// =============================================================================

/// A store context for tests.
#[must_use]
pub fn test_store() -> StoreContext {
    StoreContext {
        shop_domain: "test.myshopify.com".to_string(),
        api_version: "2026-01".to_string(),
        access_token: SecretString::from("shpat_test_token"),
        fulfillment_service_registered: false,
    }
}

/// A 200 body accepting the product with the given id.
#[must_use]
pub fn accepted_body(product_id: &str) -> serde_json::Value {
    json!({
        "data": {
            "productCreate": {
                "product": {"id": product_id},
                "userErrors": []
            }
        }
    })
}

/// A 200 body rejecting the product with the given messages.
#[must_use]
pub fn rejected_body(messages: &[&str]) -> serde_json::Value {
    let user_errors: Vec<serde_json::Value> = messages
        .iter()
        .map(|message| json!({"field": ["input"], "message": message}))
        .collect();
    json!({
        "data": {
            "productCreate": {
                "product": null,
                "userErrors": user_errors
            }
        }
    })
}
