//! Cooperative cancellation.
//!
//! A [`CancelFlag`] is a cheaply clonable handle onto one shared boolean.
//! Any clone may request cancellation; the engine polls the flag between
//! node and edge probes and while enumerating paths, and stops with
//! [`CycleRatioError::Cancelled`] once it is set.
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::CycleRatioError;

/// Shared cancellation request.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// Creates a flag that has not been cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Idempotent.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Returns `true` once cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Returns [`CycleRatioError::Cancelled`] if cancellation was requested.
    pub(crate) fn check(&self) -> Result<(), CycleRatioError> {
        if self.is_cancelled() {
            tracing::warn!("cancellation requested; aborting cycle search");
            Err(CycleRatioError::Cancelled)
        } else {
            Ok(())
        }
    }
}
