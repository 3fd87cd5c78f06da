//! Cooperative pause/stop handle for a batch run.

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

/// Cloneable handle shared between a batch run and whoever drives it
/// (a Ctrl+C handler, a UI, a test).
#[derive(Debug, Clone)]
pub struct BatchControl {
    pause_tx: watch::Sender<bool>,
    pause_rx: watch::Receiver<bool>,
    stop: CancellationToken,
}

impl Default for BatchControl {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchControl {
    pub fn new() -> Self {
        let (pause_tx, pause_rx) = watch::channel(false);
        Self {
            pause_tx,
            pause_rx,
            stop: CancellationToken::new(),
        }
    }

    pub fn pause(&self) {
        self.pause_tx.send_replace(true);
    }

    pub fn resume(&self) {
        self.pause_tx.send_replace(false);
    }

    pub fn is_paused(&self) -> bool {
        *self.pause_rx.borrow()
    }

    pub fn request_stop(&self) {
        self.stop.cancel();
    }

    pub fn is_stop_requested(&self) -> bool {
        self.stop.is_cancelled()
    }

    /// Resolves once the pause flag is raised.
    pub async fn paused(&self) {
        let mut rx = self.pause_rx.clone();
        // the sender lives in self, so the channel cannot close here
        let _ = rx.wait_for(|paused| *paused).await;
    }

    /// Resolves once the pause flag is cleared.
    pub async fn resumed(&self) {
        let mut rx = self.pause_rx.clone();
        let _ = rx.wait_for(|paused| !*paused).await;
    }

    /// Resolves once a stop is requested.
    pub async fn stopped(&self) {
        self.stop.cancelled().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::timeout;

    #[tokio::test]
    async fn test_pause_resume_flags() {
        let control = BatchControl::new();
        assert!(!control.is_paused());
        control.pause();
        assert!(control.is_paused());
        control.resume();
        assert!(!control.is_paused());
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let control = BatchControl::new();
        let remote = control.clone();
        remote.pause();
        remote.request_stop();
        assert!(control.is_paused());
        assert!(control.is_stop_requested());
    }

    #[tokio::test]
    async fn test_paused_future_wakes_on_signal() {
        let control = BatchControl::new();
        let remote = control.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            remote.pause();
        });
        timeout(Duration::from_secs(2), control.paused())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_resumed_is_immediate_when_not_paused() {
        let control = BatchControl::new();
        timeout(Duration::from_millis(50), control.resumed())
            .await
            .unwrap();
        assert!(
            timeout(Duration::from_millis(20), control.stopped())
                .await
                .is_err()
        );
    }
}
