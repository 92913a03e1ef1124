//! Application state for the HTTP server.

use std::sync::Arc;

use crate::cache::DatasetCache;
use crate::models::Clock;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Process-wide dataset slot
    pub cache: Arc<DatasetCache>,
    /// Source of the `last_updated` stamp
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Create a new application state around a dataset cache.
    pub fn new(cache: Arc<DatasetCache>, clock: Arc<dyn Clock>) -> Self {
        Self { cache, clock }
    }
}
