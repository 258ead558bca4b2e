//! Terminal states of a publish attempt.

use serde::{Deserialize, Serialize};

/// The single outcome of one publish attempt.
///
/// Created per attempt and never persisted by this core; persistence is an
/// external collaborator's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PublishOutcome {
    /// The platform accepted the product; carries the created product id.
    Created(String),
    /// HTTP transport succeeded but the platform reported user errors.
    RejectedByPlatform(Vec<String>),
    /// The gateway call failed, returned a non-200 status, or produced an
    /// undecodable body.
    TransportFailed(String),
}

impl PublishOutcome {
    /// Whether this outcome is a successful creation.
    #[must_use]
    pub const fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }

    /// One-line operator-facing message for this outcome.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Created(id) => format!("Product created ({id})"),
            Self::RejectedByPlatform(messages) => {
                format!("Product creation failed: {}", messages.join(", "))
            }
            Self::TransportFailed(reason) => format!("Product creation failed: {reason}"),
        }
    }
}
