//! Weekly stage: level-0 originals older than `weekly_age`, grouped by ISO
//! week. Each eligible group gets a level-1 summary; sources are bumped to
//! level 1 and kept, with `updated_at` untouched so later file edits still
//! register.

use chrono::Utc;
use tracing::{debug, info, warn};

use mnemos_core::constants::{LEVEL_ORIGINAL, LEVEL_WEEKLY};
use mnemos_core::errors::MnemosResult;
use mnemos_core::memory::{Relation, RelationType};
use mnemos_core::models::CompactionReport;
use mnemos_core::traits::Granularity;

use super::bucketing::week_key;
use super::{for_each_bucket, summary_record, StageContext};
use crate::summarizer::generate_bounded;

pub fn run(ctx: &StageContext<'_>) -> MnemosResult<CompactionReport> {
    let cutoff = ctx.cutoff(ctx.config.weekly_age.as_chrono());
    let mut report = CompactionReport::default();

    for_each_bucket(ctx, LEVEL_ORIGINAL, cutoff, week_key, |week, group| {
        if group.len() < ctx.config.weekly_min_group {
            debug!(week = %week, size = group.len(), "weekly group below minimum, skipping");
            report.skipped_groups += 1;
            return;
        }

        let text = match generate_bounded(
            ctx.summarizer,
            &group,
            Granularity::Weekly,
            &week,
            ctx.config.summary_timeout.as_std(),
        ) {
            Ok(Some(text)) => text,
            Ok(None) => {
                report.skipped_groups += 1;
                return;
            }
            Err(e) => {
                warn!(week = %week, error = %e, "weekly summary failed");
                report.errors += 1;
                return;
            }
        };

        let summary = match ctx.store.create(&summary_record::build(
            text,
            &group,
            Granularity::Weekly,
            &week,
            LEVEL_WEEKLY,
        )) {
            Ok(summary) => summary,
            Err(e) => {
                warn!(week = %week, error = %e, "weekly summary insert failed");
                report.errors += 1;
                return;
            }
        };
        report.weekly_summaries += 1;

        for source in &group {
            let marked = ctx
                .store
                .set_compression_level(&source.id, LEVEL_WEEKLY)
                .and_then(|marked| {
                    if marked {
                        ctx.store.add_relation(&Relation {
                            source_id: summary.id.clone(),
                            target_id: source.id.clone(),
                            relation_type: RelationType::DerivedFrom,
                            created_at: Utc::now(),
                        })?;
                    }
                    Ok(marked)
                });
            match marked {
                Ok(true) => report.sources_marked += 1,
                Ok(false) => debug!(id = %source.id, "weekly source vanished before marking"),
                Err(e) => {
                    warn!(id = %source.id, error = %e, "failed to mark weekly source");
                    report.errors += 1;
                }
            }
        }
        info!(week = %week, size = group.len(), summary = %summary.id, "weekly summary created");
    })?;
    Ok(report)
}
