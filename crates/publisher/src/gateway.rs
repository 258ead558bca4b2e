//! Opaque transport to the platform API.
//!
//! The pipeline treats the gateway as a boundary: one request in, one
//! status-plus-body out. There is no retry and no rate limiting here -
//! transport failures surface verbatim and the orchestrator decides what
//! they mean for the publish attempt.

use reqwest::Method;
use tracing::{debug, instrument};

use crate::error::PublishError;

/// What came back from one gateway call.
///
/// The body is kept as a decode *result* rather than a decoded value: a
/// non-JSON body is a legitimate transport-level answer (HTML error pages,
/// empty 500s) and the caller classifies it, the gateway does not.
#[derive(Debug)]
pub struct GatewayResponse {
    /// HTTP status code.
    pub status: u16,
    /// The response body, decoded as JSON when possible.
    pub body: Result<serde_json::Value, serde_json::Error>,
}

/// Request/response transport to the platform API.
///
/// Implemented by [`HttpGateway`] in production and by scripted gateways in
/// tests.
pub trait ApiGateway {
    /// Send one request and return the raw status and body.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::Http`] when the request itself fails
    /// (connection error, timeout). Non-success statuses are not errors at
    /// this layer - they come back in the response.
    fn send(
        &self,
        method: Method,
        endpoint: &str,
        headers: &[(String, String)],
        body: &serde_json::Value,
    ) -> impl Future<Output = Result<GatewayResponse, PublishError>> + Send;
}

/// Production gateway on `reqwest` with a bounded per-request timeout.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: reqwest::Client,
}

impl HttpGateway {
    /// Create a gateway whose every request times out after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::Http`] if the HTTP client cannot be built.
    pub fn new(timeout: std::time::Duration) -> Result<Self, PublishError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

impl ApiGateway for HttpGateway {
    #[instrument(skip(self, headers, body))]
    async fn send(
        &self,
        method: Method,
        endpoint: &str,
        headers: &[(String, String)],
        body: &serde_json::Value,
    ) -> Result<GatewayResponse, PublishError> {
        let mut request = self.client.request(method, endpoint);
        for (name, value) in headers {
            request = request.header(name, value);
        }

        let response = request.json(body).send().await?;
        let status = response.status().as_u16();

        // Read as text first so an undecodable body still yields the status.
        let text = response.text().await?;
        debug!(status, body_len = text.len(), "gateway response received");

        Ok(GatewayResponse {
            status,
            body: serde_json::from_str(&text),
        })
    }
}
