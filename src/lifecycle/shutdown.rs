//! Shutdown coordination for the gateway.

use std::future::Future;
use std::time::Duration;
use tokio::sync::broadcast;

/// Coordinator for graceful shutdown.
///
/// Provides a broadcast channel that all long-running tasks can subscribe to.
pub struct Shutdown {
    /// Broadcast channel sender.
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    /// Create a new shutdown coordinator.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Subscribe to the shutdown signal.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Trigger the shutdown signal.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }

    /// Get the number of active subscribers (tasks still running).
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// How the server came to a stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrainOutcome {
    /// Stopped on its own, or drained within the grace period.
    Clean,
    /// In-flight requests were still running when the grace period ran out.
    Forced,
}

impl DrainOutcome {
    /// Process exit code for this outcome.
    pub fn exit_code(self) -> i32 {
        match self {
            DrainOutcome::Clean => 0,
            DrainOutcome::Forced => 1,
        }
    }
}

/// Drive `server` until it finishes. Once `shutdown` fires, the server gets
/// at most `grace` to drain before it is abandoned.
pub async fn drain_with_deadline<F>(
    server: F,
    mut shutdown: broadcast::Receiver<()>,
    grace: Duration,
) -> Result<DrainOutcome, std::io::Error>
where
    F: Future<Output = Result<(), std::io::Error>>,
{
    tokio::pin!(server);

    tokio::select! {
        result = &mut server => return result.map(|_| DrainOutcome::Clean),
        _ = shutdown.recv() => {}
    }

    match tokio::time::timeout(grace, server).await {
        Ok(result) => result.map(|_| DrainOutcome::Clean),
        Err(_) => {
            tracing::error!(grace_secs = grace.as_secs(), "Forced shutdown after timeout");
            Ok(DrainOutcome::Forced)
        }
    }
}
