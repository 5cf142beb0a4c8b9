//! Shared state handed to the built-in operations.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use crate::core::config::Config;
use crate::domains::catalog::ItemStore;

/// State shared by the built-in operations.
///
/// Constructed before the loader runs; the operation count is published once
/// loading finishes and read by `get_status`.
pub struct ServerState {
    config: Arc<Config>,
    store: Arc<ItemStore>,
    started_at: Instant,
    operation_count: AtomicUsize,
}

impl ServerState {
    /// Create state over the configured catalog document.
    pub fn new(config: Arc<Config>) -> Self {
        let store = Arc::new(ItemStore::new(config.storage.data_path.clone()));
        Self {
            config,
            store,
            started_at: Instant::now(),
            operation_count: AtomicUsize::new(0),
        }
    }

    /// Server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// The item store backing the built-in operations.
    pub fn store(&self) -> &ItemStore {
        &self.store
    }

    /// Seconds since the state was constructed.
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    /// Number of operations registered at load time.
    pub fn operation_count(&self) -> usize {
        self.operation_count.load(Ordering::Acquire)
    }

    /// Publish the post-load operation count.
    pub(crate) fn set_operation_count(&self, count: usize) {
        self.operation_count.store(count, Ordering::Release);
    }
}
