//! Debounced watch loop.
//!
//! A tokio task fingerprints the tree (path + mtime of every file) every
//! `poll_interval_ms`. A change arms a deadline `debounce_ms` ahead; further
//! changes push it back. Once the tree has been quiet past the deadline the
//! trigger fires once. Stopping the loop drops any armed deadline.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{interval, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use mnemos_core::config::MarkdownConfig;
use mnemos_core::traits::{FileEntry, IFileTree};

/// Running watch loop. Dropping the handle aborts the task.
pub struct WatchHandle {
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl WatchHandle {
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Stop polling, discard any pending deadline and wait for the task.
    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                if !e.is_cancelled() {
                    warn!(error = %e, "watch task ended abnormally");
                }
            }
        }
    }
}

impl Drop for WatchHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

async fn fingerprint(tree: &Arc<dyn IFileTree>) -> Option<Vec<FileEntry>> {
    let tree = Arc::clone(tree);
    match tokio::task::spawn_blocking(move || tree.list()).await {
        Ok(Ok(entries)) => Some(entries),
        Ok(Err(e)) => {
            debug!(error = %e, "fingerprint failed");
            None
        }
        Err(e) => {
            debug!(error = %e, "fingerprint task failed");
            None
        }
    }
}

/// Spawn the watch loop on the current tokio runtime. `on_change` runs on
/// the watch task and should only enqueue work.
pub fn spawn_watcher<F>(tree: Arc<dyn IFileTree>, config: &MarkdownConfig, on_change: F) -> WatchHandle
where
    F: Fn() + Send + 'static,
{
    let poll = Duration::from_millis(config.poll_interval_ms.max(1));
    let debounce = Duration::from_millis(config.debounce_ms);
    let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        let mut last = fingerprint(&tree).await.unwrap_or_default();
        let mut deadline: Option<Instant> = None;
        let mut ticker = interval(poll);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(files = last.len(), "watching memory tree");

        loop {
            tokio::select! {
                _ = &mut shutdown_rx => break,
                _ = ticker.tick() => {
                    let Some(current) = fingerprint(&tree).await else {
                        continue;
                    };
                    if current != last {
                        last = current;
                        deadline = Some(Instant::now() + debounce);
                        debug!("tree changed, debounce armed");
                    } else if deadline.is_some_and(|d| Instant::now() >= d) {
                        deadline = None;
                        debug!("debounce elapsed, triggering reconcile");
                        on_change();
                    }
                }
            }
        }
        info!("watch loop stopped");
    });

    WatchHandle {
        shutdown: Some(shutdown_tx),
        task: Some(task),
    }
}
