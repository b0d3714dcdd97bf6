//! Tracked background jobs
//!
//! Work scheduled after an HTTP response (persistence, dispatch) runs as
//! detached tokio tasks registered with a [`TaskTracker`]. Shutdown drains
//! the tracker for a bounded time, then cancels whatever is still running.

use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::warn;

/// Result of [`BackgroundTasks::drain`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrainOutcome {
    /// Every job finished
    Drained,
    /// The timeout expired; this many jobs were cancelled
    Abandoned(usize),
}

/// Handle to the set of in-flight background jobs
#[derive(Clone, Default)]
pub struct BackgroundTasks {
    tracker: TaskTracker,
    cancel: CancellationToken,
}

impl BackgroundTasks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a job that outlives the current request
    pub fn spawn<F>(&self, job: &'static str, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let cancel = self.cancel.clone();
        self.tracker.spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {
                    warn!(job, "Background job abandoned at shutdown");
                }
                _ = future => {}
            }
        });
    }

    /// Number of jobs not yet finished
    pub fn pending(&self) -> usize {
        self.tracker.len()
    }

    /// Wait up to `timeout` for every job, then cancel the rest
    pub async fn drain(&self, timeout: Duration) -> DrainOutcome {
        self.tracker.close();

        if tokio::time::timeout(timeout, self.tracker.wait()).await.is_ok() {
            return DrainOutcome::Drained;
        }

        let remaining = self.tracker.len();
        self.cancel.cancel();
        self.tracker.wait().await;
        DrainOutcome::Abandoned(remaining)
    }
}
