//! Archive stage: level-2 records older than `archive_age` and not accessed
//! within it become type `archive` in place.

use tracing::{debug, warn};

use mnemos_core::errors::MnemosResult;
use mnemos_core::memory::{MemoryType, MemoryUpdate};
use mnemos_core::models::CompactionReport;

use super::StageContext;

pub fn run(ctx: &StageContext<'_>) -> MnemosResult<CompactionReport> {
    let cutoff = ctx.cutoff(ctx.config.archive_age.as_chrono());
    let candidates = ctx
        .store
        .list_archive_candidates(cutoff, ctx.config.batch_limit)?;
    let mut report = CompactionReport::default();

    let to_archive = MemoryUpdate {
        memory_type: Some(MemoryType::Archive),
        ..Default::default()
    };
    for record in candidates {
        match ctx.store.update(&record.id, &to_archive) {
            Ok(Some(_)) => {
                debug!(id = %record.id, "archived");
                report.archived += 1;
            }
            Ok(None) => {}
            Err(e) => {
                warn!(id = %record.id, error = %e, "failed to archive record");
                report.errors += 1;
            }
        }
    }
    Ok(report)
}
