//! External termination signal.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cloneable flag that ends [`Sim::run`](crate::Sim::run) after the tick in
/// progress completes.
///
/// Safe to trigger from any thread, e.g. a Ctrl-C handler or a UI thread
/// consuming snapshot frames.
#[derive(Clone, Debug, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_stop(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_stop_requested(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Clear a previous request so the simulation can be resumed.
    pub fn reset(&self) {
        self.0.store(false, Ordering::Release);
    }
}
