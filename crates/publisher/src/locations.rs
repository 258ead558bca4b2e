//! Fulfillment location directory.
//!
//! Location data is synced and persisted by an external collaborator; the
//! directory only decides which of a store's locations are usable for
//! inventory assignment during a publish.

use shopfeed_core::Location;

use crate::store::StoreContext;

/// Resolves the set of locations usable for inventory assignment.
#[derive(Debug, Clone)]
pub struct LocationDirectory {
    locations: Vec<Location>,
    fulfillment_location_name: String,
}

impl LocationDirectory {
    /// Create a directory over a store's synced locations.
    pub fn new(locations: Vec<Location>, fulfillment_location_name: impl Into<String>) -> Self {
        Self {
            locations,
            fulfillment_location_name: fulfillment_location_name.into(),
        }
    }

    /// Locations usable for the given store, in sync order.
    ///
    /// A store registered with the fulfillment service is narrowed to the
    /// location carrying the configured fulfillment-service name; any other
    /// store gets every location. An empty result is valid - callers must
    /// handle empty inventory assignment gracefully.
    #[must_use]
    pub fn resolve(&self, store: &StoreContext) -> Vec<Location> {
        if store.fulfillment_service_registered {
            self.locations
                .iter()
                .filter(|location| location.name == self.fulfillment_location_name)
                .cloned()
                .collect()
        } else {
            self.locations.clone()
        }
    }
}
