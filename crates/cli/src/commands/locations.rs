//! Location inspection command.
//!
//! # Usage
//!
//! ```bash
//! shopfeed locations -f locations.json
//! ```
//!
//! The file holds the store's synced locations as a JSON array; syncing
//! itself is done elsewhere. The command shows which of those locations the
//! pipeline would assign inventory to, honoring the store's
//! fulfillment-service registration.

use std::path::Path;

use thiserror::Error;

use shopfeed_core::Location;
use shopfeed_publisher::{ConfigError, LocationDirectory, PublisherConfig};

/// Errors that can occur while resolving locations.
#[derive(Debug, Error)]
pub enum LocationsError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The locations file could not be read.
    #[error("Could not read locations file: {0}")]
    Io(#[from] std::io::Error),

    /// The locations file is not a JSON array of locations.
    #[error("Could not parse locations file: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Resolve and log the locations usable for inventory assignment.
///
/// # Errors
///
/// Returns [`LocationsError`] when configuration or the locations file
/// cannot be loaded.
pub fn show(file: &Path) -> Result<(), LocationsError> {
    let config = PublisherConfig::from_env()?;
    let store = config.store_context();

    let locations: Vec<Location> = serde_json::from_str(&std::fs::read_to_string(file)?)?;
    let directory = LocationDirectory::new(locations, config.fulfillment_location_name.clone());

    let resolved = directory.resolve(&store);
    if resolved.is_empty() {
        tracing::warn!("No locations usable for inventory assignment");
        return Ok(());
    }

    tracing::info!("{} locations usable for inventory assignment:", resolved.len());
    for location in resolved {
        tracing::info!(
            "  {} ({}, {})",
            location.name,
            location.id,
            location.admin_graphql_api_id
        );
    }

    Ok(())
}
