//! Compaction stages, run in order:
//! Weekly (level 0 → 1, sources kept) → Monthly (level 1 → 2, sources
//! absorbed) → Archive (cold level 2 → type `archive`).

pub mod bucketing;
pub mod stage_archive;
pub mod stage_monthly;
pub mod stage_weekly;
pub mod summary_record;

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{info, info_span};

use mnemos_core::config::CompactionConfig;
use mnemos_core::errors::MnemosResult;
use mnemos_core::memory::Memory;
use mnemos_core::models::{CompactionCursor, CompactionReport};
use mnemos_core::traits::{IMemoryStore, ISummaryGenerator};

use self::bucketing::group_by;

/// Everything a stage needs for one run.
pub struct StageContext<'a> {
    pub store: &'a dyn IMemoryStore,
    pub summarizer: &'a Arc<dyn ISummaryGenerator>,
    pub config: &'a CompactionConfig,
    pub now: DateTime<Utc>,
}

impl StageContext<'_> {
    /// `now - age`, saturating at the earliest representable instant.
    pub fn cutoff(&self, age: Duration) -> DateTime<Utc> {
        self.now
            .checked_sub_signed(age)
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

/// Page through every candidate at exactly `level` created before `cutoff`
/// and hand each time bucket to `visit`, oldest first. Lower-level records
/// come back from the store too and are skipped, never counted against the
/// run. A full page may end inside a bucket, so its newest bucket is carried
/// into the next page and only visited once complete. `batch_limit` is the
/// page size.
pub fn for_each_bucket<K, V>(
    ctx: &StageContext<'_>,
    level: u8,
    cutoff: DateTime<Utc>,
    key: K,
    mut visit: V,
) -> MnemosResult<()>
where
    K: Fn(DateTime<Utc>) -> String,
    V: FnMut(String, Vec<Memory>),
{
    let page_size = ctx.config.batch_limit.max(1);
    let mut cursor: Option<CompactionCursor> = None;
    let mut carry: Vec<Memory> = Vec::new();
    loop {
        let page = ctx
            .store
            .list_for_compaction(cutoff, level, cursor.as_ref(), page_size)?;
        let full = page.len() == page_size;
        if let Some(last) = page.last() {
            cursor = Some(CompactionCursor::after(last));
        }
        carry.extend(page.into_iter().filter(|m| m.compression_level == level));

        let mut buckets = group_by(std::mem::take(&mut carry), &key);
        if full {
            if let Some((_, newest)) = buckets.pop_last() {
                carry = newest;
            }
        }
        for (bucket, group) in buckets {
            visit(bucket, group);
        }
        if !full {
            return Ok(());
        }
    }
}

pub fn run_pipeline(ctx: &StageContext<'_>) -> MnemosResult<CompactionReport> {
    let _span = info_span!("mnemos.compaction", now = %ctx.now).entered();
    let mut report = CompactionReport::default();

    report.merge(&stage_weekly::run(ctx)?);
    report.merge(&stage_monthly::run(ctx)?);
    report.merge(&stage_archive::run(ctx)?);

    info!(
        weekly = report.weekly_summaries,
        monthly = report.monthly_summaries,
        archived = report.archived,
        skipped = report.skipped_groups,
        errors = report.errors,
        "compaction complete"
    );
    Ok(report)
}
