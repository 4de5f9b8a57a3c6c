use crate::{Error, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cooperative cancellation shared between a caller and a running algorithm.
///
/// Algorithms poll it between rounds; a round already in progress always
/// runs to completion.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag {
    cancelled: Arc<AtomicBool>,
}

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Fail with [`Error::Cancelled`] if cancellation was requested.
    #[inline]
    pub fn check(&self, round: usize) -> Result<()> {
        if self.is_cancelled() {
            return Err(Error::Cancelled { round });
        }
        Ok(())
    }
}
