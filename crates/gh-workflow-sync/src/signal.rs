//! Force-refresh signal
//!
//! Raised after a mutating operation (dispatch, rerun, cancel) so the
//! history reflects the change without waiting for a context switch.

use std::sync::Arc;
use tokio::sync::Notify;

/// Coalescing refresh request
///
/// Raising the signal several times before the listener wakes up results in
/// a single refresh. Clones share the same signal.
#[derive(Debug, Clone, Default)]
pub struct ForceRefresh {
    notify: Arc<Notify>,
}

impl ForceRefresh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a refresh of the current context
    pub fn signal(&self) {
        self.notify.notify_one();
    }

    /// Wait until a refresh has been requested
    pub async fn wait(&self) {
        self.notify.notified().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_signal_before_wait_is_not_lost() {
        let signal = ForceRefresh::new();
        signal.clone().signal();

        tokio::time::timeout(Duration::from_secs(1), signal.wait())
            .await
            .expect("stored permit should wake the waiter");
    }

    #[tokio::test]
    async fn test_repeated_signals_coalesce() {
        let signal = ForceRefresh::new();
        signal.signal();
        signal.signal();
        signal.signal();

        signal.wait().await;
        let second = tokio::time::timeout(Duration::from_millis(20), signal.wait()).await;
        assert!(second.is_err(), "only one permit is stored");
    }
}
