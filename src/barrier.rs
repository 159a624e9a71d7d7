use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::time::timeout;

use crate::error::CompletionError;

/// One-shot completion barrier.
///
/// A producer sends a clone of the handle inside a [`CompletionNotice`] and
/// awaits the other clone; whichever actor dequeues the notice resolves it.
/// The state machine is `Pending -> Resolved`, terminal once resolved.
///
/// `resolve` is single-use: the second call returns
/// [`CompletionError::DoubleResolution`]. `wait` may be called from any
/// number of awaiters, before or after resolution.
///
/// [`CompletionNotice`]: crate::message::CompletionNotice
#[derive(Debug, Clone)]
pub struct CompletionHandle {
    inner: Arc<Shared>,
}

#[derive(Debug)]
struct Shared {
    resolved: AtomicBool,
    notify: Notify,
}

impl CompletionHandle {
    /// Creates a new pending handle.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Shared {
                resolved: AtomicBool::new(false),
                notify: Notify::new(),
            }),
        }
    }

    /// Transitions the handle to resolved and wakes every current and future
    /// awaiter. Valid exactly once per handle.
    pub fn resolve(&self) -> Result<(), CompletionError> {
        if self.inner.resolved.swap(true, Ordering::SeqCst) {
            return Err(CompletionError::DoubleResolution);
        }
        self.inner.notify.notify_waiters();
        Ok(())
    }

    /// Non-blocking probe of the barrier state.
    pub fn is_resolved(&self) -> bool {
        self.inner.resolved.load(Ordering::SeqCst)
    }

    /// Waits until the handle is resolved. Returns immediately if it already
    /// is; safe to call concurrently from multiple awaiters.
    pub async fn wait(&self) {
        while !self.is_resolved() {
            // The Notified future must exist before the flag re-check so a
            // notify_waiters racing with us is not lost.
            let notified = self.inner.notify.notified();
            if self.is_resolved() {
                return;
            }
            notified.await;
        }
    }

    /// Bounded variant of [`wait`](Self::wait) so a buggy or stalled resolver
    /// surfaces as an error instead of hanging the caller.
    pub async fn wait_timeout(&self, duration: Duration) -> Result<(), CompletionError> {
        timeout(duration, self.wait())
            .await
            .map_err(|_| CompletionError::TimedOut(duration))
    }
}

impl Default for CompletionHandle {
    fn default() -> Self {
        Self::new()
    }
}
