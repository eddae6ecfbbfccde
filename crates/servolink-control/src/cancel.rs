//! Cooperative cancellation of a running motion profile.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared flag checked by profile generators before every send.
///
/// Cancelling never interrupts a send or a pause in progress; the profile
/// stops before its next setpoint.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }

    /// Re-arm the token after a cancelled profile.
    pub fn reset(&self) {
        self.flag.store(false, Ordering::Release);
    }
}
