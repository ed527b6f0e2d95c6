//! Cooperative cancellation signal (§5 "Cancellation"). Long-running
//! delineation work checks this between points and between zonal-
//! statistics calls; partial results already persisted remain valid on
//! cancel. Plain `Arc<AtomicBool>` rather than a crate dependency -- the
//! signal itself is a single flag, not a scheduler.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A clonable, shareable cancellation flag. Cloning shares the same
/// underlying signal; `cancel()` from any clone is visible to all.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Check without blocking -- the only operation callers on the
    /// delineation hot path may perform on this type.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
