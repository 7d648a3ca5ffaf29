//! Time-bounded summary generation.
//!
//! The generator runs on a helper thread; the caller waits at most
//! `timeout`. A generator that overruns is abandoned: its thread finishes
//! on its own and the result is dropped.

use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use mnemos_core::errors::{CompactionError, MnemosResult};
use mnemos_core::memory::Memory;
use mnemos_core::traits::{Granularity, ISummaryGenerator};

pub fn generate_bounded(
    summarizer: &Arc<dyn ISummaryGenerator>,
    records: &[Memory],
    granularity: Granularity,
    group: &str,
    timeout: Duration,
) -> MnemosResult<Option<String>> {
    let (tx, rx) = mpsc::channel();
    let summarizer = Arc::clone(summarizer);
    let records = records.to_vec();

    thread::Builder::new()
        .name(format!("mnemos-summary-{group}"))
        .spawn(move || {
            let _ = tx.send(summarizer.generate(&records, granularity));
        })
        .map_err(|e| CompactionError::SummaryFailed {
            group: group.to_string(),
            reason: format!("spawn: {e}"),
        })?;

    match rx.recv_timeout(timeout) {
        Ok(Ok(text)) => Ok(text.filter(|t| !t.trim().is_empty())),
        Ok(Err(e)) => Err(CompactionError::SummaryFailed {
            group: group.to_string(),
            reason: e.to_string(),
        }
        .into()),
        Err(mpsc::RecvTimeoutError::Timeout) => Err(CompactionError::SummaryTimeout {
            group: group.to_string(),
            timeout_ms: timeout.as_millis() as u64,
        }
        .into()),
        Err(mpsc::RecvTimeoutError::Disconnected) => Err(CompactionError::SummaryFailed {
            group: group.to_string(),
            reason: "generator panicked".to_string(),
        }
        .into()),
    }
}
