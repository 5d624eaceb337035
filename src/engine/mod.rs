mod conflict;
mod error;
mod mutations;
mod queries;
mod store;

pub use error::EngineError;

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::RwLock;
use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::config::EngineConfig;
use crate::observability::{OPERATION_DURATION_SECONDS, REJECTIONS_TOTAL};

use store::RideStore;

/// The single authority over ride state.
///
/// Every mutation holds the write lock across its whole check-then-apply
/// sequence, because the posting and booking rules look at rides other than
/// the one being changed. Queries take the read lock and hand back clones.
pub struct Engine {
    state: RwLock<RideStore>,
    clock: Arc<dyn Clock>,
    config: EngineConfig,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: EngineConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            state: RwLock::new(RideStore::new()),
            clock,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The clock used for `created_at`. Callers use it for "departure is in
    /// the future" checks so both sides agree on now.
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }
}

/// Record latency for an operation and, on failure, the rejection reason.
fn observe<T>(operation: &'static str, started: Instant, result: &Result<T, EngineError>) {
    metrics::histogram!(OPERATION_DURATION_SECONDS, "operation" => operation)
        .record(started.elapsed().as_secs_f64());
    if let Err(e) = result {
        debug!(operation, reason = e.label(), "rejected: {e}");
        metrics::counter!(REJECTIONS_TOTAL, "operation" => operation, "reason" => e.label())
            .increment(1);
    }
}
