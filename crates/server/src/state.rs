//! Shared server state.
//!
//! Holds the aggregator behind an `Arc`; handlers only read from it.

use std::sync::Arc;
use std::time::Instant;

use providers::Aggregator;

/// Shared state for all route handlers.
///
/// Cloned into each handler via Axum's State extractor.
#[derive(Clone)]
pub struct ServerState {
    /// Provider fan-out used by `GET /`.
    pub aggregator: Arc<Aggregator>,

    /// Server start time.
    pub start_time: Instant,
}

impl ServerState {
    pub fn new(aggregator: Aggregator) -> Self {
        Self {
            aggregator: Arc::new(aggregator),
            start_time: Instant::now(),
        }
    }

    /// Get uptime in seconds.
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
