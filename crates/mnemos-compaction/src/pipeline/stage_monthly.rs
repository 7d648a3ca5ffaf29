//! Monthly stage: level-1 originals older than `monthly_age`, grouped by
//! calendar month. Each eligible group gets a level-2 summary and its
//! sources are absorbed: deleted, with a tombstone that keeps reconciliation
//! from importing the same sections again. The monthly summary becomes the
//! canonical record.

use tracing::{debug, info, warn};

use mnemos_core::constants::{LEVEL_MONTHLY, LEVEL_WEEKLY};
use mnemos_core::errors::MnemosResult;
use mnemos_core::models::CompactionReport;
use mnemos_core::traits::Granularity;

use super::bucketing::month_key;
use super::{for_each_bucket, summary_record, StageContext};
use crate::summarizer::generate_bounded;

pub fn run(ctx: &StageContext<'_>) -> MnemosResult<CompactionReport> {
    let cutoff = ctx.cutoff(ctx.config.monthly_age.as_chrono());
    let mut report = CompactionReport::default();

    for_each_bucket(ctx, LEVEL_WEEKLY, cutoff, month_key, |month, group| {
        if group.len() < ctx.config.monthly_min_group {
            debug!(month = %month, size = group.len(), "monthly group below minimum, skipping");
            report.skipped_groups += 1;
            return;
        }

        let text = match generate_bounded(
            ctx.summarizer,
            &group,
            Granularity::Monthly,
            &month,
            ctx.config.summary_timeout.as_std(),
        ) {
            Ok(Some(text)) => text,
            Ok(None) => {
                report.skipped_groups += 1;
                return;
            }
            Err(e) => {
                warn!(month = %month, error = %e, "monthly summary failed");
                report.errors += 1;
                return;
            }
        };

        let summary = match ctx.store.create(&summary_record::build(
            text,
            &group,
            Granularity::Monthly,
            &month,
            LEVEL_MONTHLY,
        )) {
            Ok(summary) => summary,
            Err(e) => {
                warn!(month = %month, error = %e, "monthly summary insert failed");
                report.errors += 1;
                return;
            }
        };
        report.monthly_summaries += 1;

        for source in &group {
            match ctx.store.absorb(&source.id, &summary.id) {
                Ok(true) => report.sources_deleted += 1,
                Ok(false) => debug!(id = %source.id, "monthly source already gone"),
                Err(e) => {
                    warn!(id = %source.id, error = %e, "failed to absorb monthly source");
                    report.errors += 1;
                }
            }
        }
        info!(month = %month, size = group.len(), summary = %summary.id, "monthly summary created");
    })?;
    Ok(report)
}
