//! Single-consumer job queue. Sync and compaction both scan-then-write the
//! same tables, so every run goes through one worker, one job at a time.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinError;
use tracing::{debug, warn};

use mnemos_core::errors::{MnemosError, MnemosResult};
use mnemos_core::models::CompactionReport;

use crate::engine::Components;
use crate::models::SyncReport;

pub(crate) type Reply<T> = oneshot::Sender<MnemosResult<T>>;

pub(crate) enum Job {
    /// `reply` is `None` for watcher-triggered runs.
    Sync { reply: Option<Reply<SyncReport>> },
    Compact { reply: Reply<CompactionReport> },
}

impl Job {
    fn name(&self) -> &'static str {
        match self {
            Job::Sync { .. } => "sync",
            Job::Compact { .. } => "compact",
        }
    }
}

pub(crate) fn join_error(e: JoinError) -> MnemosError {
    MnemosError::TaskFailed {
        reason: e.to_string(),
    }
}

/// Drain the queue until every sender is gone.
pub(crate) async fn run_worker(components: Arc<Components>, mut jobs: mpsc::Receiver<Job>) {
    while let Some(job) = jobs.recv().await {
        debug!(job = job.name(), "job started");
        match job {
            Job::Sync { reply } => {
                let ctx = Arc::clone(&components);
                let result = tokio::task::spawn_blocking(move || ctx.run_sync(Utc::now()))
                    .await
                    .unwrap_or_else(|e| Err(join_error(e)));
                match reply {
                    Some(reply) => {
                        let _ = reply.send(result);
                    }
                    None => {
                        if let Err(e) = result {
                            warn!(error = %e, "background sync failed");
                        }
                    }
                }
            }
            Job::Compact { reply } => {
                let ctx = Arc::clone(&components);
                let result = tokio::task::spawn_blocking(move || ctx.run_compaction(Utc::now()))
                    .await
                    .unwrap_or_else(|e| Err(join_error(e)));
                let _ = reply.send(result);
            }
        }
    }
    debug!("job queue closed");
}
