//! Error taxonomy for the publish pipeline.

use thiserror::Error;

/// Errors that can occur while normalizing, building, or sending a product.
///
/// Adapter and builder errors abort the current product's publish before any
/// mutation is applied; in batch mode they are recorded per product and never
/// stop the remaining products. Transport failures and platform rejections
/// are not errors - they are terminal [`shopfeed_core::PublishOutcome`]
/// states produced by the orchestrator.
#[derive(Debug, Error)]
pub enum PublishError {
    /// Malformed or misaligned manual input (missing required field,
    /// parallel variant arrays of different lengths, non-numeric quantity,
    /// unparseable operator URL).
    #[error("invalid input: {0}")]
    Validation(String),

    /// HTTP request failed (network error, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A remote source fetch returned a non-success status.
    #[error("remote source returned HTTP {0}")]
    UpstreamStatus(u16),

    /// A remote body was not valid JSON.
    #[error("JSON parse error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Fetched JSON decoded but expected fields were missing.
    #[error("unexpected remote schema: {0}")]
    Schema(String),

    /// The mutation document could not be built from the canonical product.
    #[error(transparent)]
    Build(#[from] shopfeed_core::BuildError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = PublishError::Validation("title is required".to_string());
        assert_eq!(err.to_string(), "invalid input: title is required");
    }

    #[test]
    fn test_upstream_status_display() {
        let err = PublishError::UpstreamStatus(404);
        assert_eq!(err.to_string(), "remote source returned HTTP 404");
    }

    #[test]
    fn test_build_error_is_transparent() {
        let err = PublishError::from(shopfeed_core::BuildError::InvalidDecimal {
            field: "price",
            value: "abc".to_string(),
        });
        assert_eq!(err.to_string(), "price is not a valid decimal: \"abc\"");
    }
}
