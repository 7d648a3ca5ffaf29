use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use mnemos_core::memory::{Memory, MemoryType, Tag};
use mnemos_core::models::{CompactionReport, ReconcileReport, RescoreReport};

/// Filters for `MemoryBackend::search`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Falls back to the store's default page size.
    pub limit: Option<usize>,
    /// Hits must carry every listed tag.
    pub tags: Vec<String>,
    pub memory_type: Option<MemoryType>,
    pub min_importance: Option<f64>,
    pub created_after: Option<DateTime<Utc>>,
    pub created_before: Option<DateTime<Utc>>,
}

impl SearchOptions {
    pub fn limit(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }
}

/// One ranked search result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub memory: Memory,
    /// Query-time relevance in [0, 1].
    pub score: f64,
    /// Window of `content` around the first query match.
    pub snippet: String,
}

/// Result of `sync()`: the reconcile diff plus what the follow-up
/// compaction and rescoring did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    pub added: usize,
    pub updated: usize,
    pub removed: usize,
    pub unchanged: usize,
    /// File and compaction-group failures combined.
    pub errors: usize,
    pub compaction: CompactionReport,
    pub rescore: RescoreReport,
}

impl SyncReport {
    pub fn new(reconcile: &ReconcileReport, compaction: CompactionReport, rescore: RescoreReport) -> Self {
        Self {
            added: reconcile.added,
            updated: reconcile.updated,
            removed: reconcile.removed,
            unchanged: reconcile.unchanged,
            errors: reconcile.errors + compaction.errors,
            compaction,
            rescore,
        }
    }
}

/// Aggregate view returned by `status()`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusReport {
    pub total: usize,
    pub by_type: BTreeMap<String, usize>,
    pub by_level: BTreeMap<u8, usize>,
    /// Distinct tags in the catalogue.
    pub tags: usize,
    pub top_tags: Vec<Tag>,
    pub access_log_entries: usize,
    pub relations: usize,
    pub fts_enabled: bool,
    pub watching: bool,
}
