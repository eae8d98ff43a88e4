use anyhow::Result;
use tokio::sync::watch;
use tracing::info;

use crate::observability::SyncMetrics;

/// Graceful shutdown coordinator for the watch loop.
///
/// In-flight chains are not awaited: dropping them abandons their requests,
/// the same as navigating away from a page.
#[derive(Debug, Clone)]
pub struct ShutdownCoordinator {
    sender: watch::Sender<bool>,
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownCoordinator {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(false);
        Self { sender }
    }

    /// Ask every subscriber to stop
    pub fn trigger(&self) {
        self.sender.send_replace(true);
    }

    pub fn is_shutting_down(&self) -> bool {
        *self.sender.borrow()
    }

    /// Resolve once shutdown has been requested
    pub async fn wait(&self) {
        let mut receiver = self.sender.subscribe();
        // The sender lives in self, so the channel cannot close under us
        let _ = receiver.wait_for(|stop| *stop).await;
    }

    /// Spawn a task that requests shutdown on Ctrl-C
    pub fn install_signal_handler(&self) {
        let coordinator = self.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Received Ctrl-C, shutting down");
                coordinator.trigger();
            }
        });
    }

    /// Final bookkeeping once the loop has stopped
    pub fn finish(&self, metrics: &SyncMetrics, metrics_enabled: bool) -> Result<()> {
        if metrics_enabled {
            metrics.log_stats();
        }
        info!("State sync shutdown complete");
        Ok(())
    }
}
