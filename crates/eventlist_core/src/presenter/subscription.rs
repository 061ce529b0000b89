//! Cancellation handle shared between a presenter and its view.
//!
//! Cancelling does not abort a request that is already running. It only
//! stops that request's results from reaching the view.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cloneable liveness handle; all clones observe the same state.
#[derive(Debug, Clone)]
pub struct Subscription {
    active: Arc<AtomicBool>,
}

impl Default for Subscription {
    fn default() -> Self {
        Self::new()
    }
}

impl Subscription {
    /// Creates an active subscription.
    pub fn new() -> Self {
        Self {
            active: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Marks the view as torn down. Idempotent.
    pub fn cancel(&self) {
        self.active.store(false, Ordering::Release);
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    pub fn is_cancelled(&self) -> bool {
        !self.is_active()
    }
}
