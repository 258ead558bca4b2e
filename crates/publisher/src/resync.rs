//! Downstream catalog-resync signal.
//!
//! Every successful product creation queues a re-sync of the store's
//! catalog. The job itself runs in an external collaborator; this module
//! only models the fire-and-forget enqueue.

use tracing::info;

use crate::store::StoreContext;

/// Fire-and-forget enqueue of a store catalog re-sync.
pub trait ResyncQueue {
    /// Queue a re-sync for the store. Must not fail the publish.
    fn enqueue(&self, store: &StoreContext);
}

/// Production queue: records the enqueue for the external job runner.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogResync;

impl ResyncQueue for LogResync {
    fn enqueue(&self, store: &StoreContext) {
        info!(shop = %store.shop_domain, "catalog resync enqueued");
    }
}

/// Queue that drops the signal. For callers that manage syncing themselves.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopResync;

impl ResyncQueue for NoopResync {
    fn enqueue(&self, _store: &StoreContext) {}
}
