use serde::{Deserialize, Serialize};

use super::defaults;
use super::duration::DurationSpec;

/// Compaction pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompactionConfig {
    /// Minimum age of level-0 records before weekly compaction (`T1`).
    pub weekly_age: DurationSpec,
    /// Minimum age of level-1 records before monthly compaction (`T2`).
    pub monthly_age: DurationSpec,
    /// Minimum age and access-cold window for archival (`T3`).
    pub archive_age: DurationSpec,
    /// Weekly groups smaller than this are left for the next run.
    pub weekly_min_group: usize,
    /// Monthly groups smaller than this are left for the next run.
    pub monthly_min_group: usize,
    /// Page size for candidate scans. Each run still visits every candidate.
    pub batch_limit: usize,
    /// Upper bound on a single summary generation call.
    pub summary_timeout: DurationSpec,
}

impl Default for CompactionConfig {
    fn default() -> Self {
        Self {
            weekly_age: DurationSpec::days(defaults::DEFAULT_WEEKLY_AGE_DAYS),
            monthly_age: DurationSpec::days(defaults::DEFAULT_MONTHLY_AGE_DAYS),
            archive_age: DurationSpec::days(defaults::DEFAULT_ARCHIVE_AGE_DAYS),
            weekly_min_group: defaults::DEFAULT_WEEKLY_MIN_GROUP,
            monthly_min_group: defaults::DEFAULT_MONTHLY_MIN_GROUP,
            batch_limit: defaults::DEFAULT_COMPACTION_BATCH_LIMIT,
            summary_timeout: DurationSpec::minutes(defaults::DEFAULT_SUMMARY_TIMEOUT_MINUTES),
        }
    }
}
