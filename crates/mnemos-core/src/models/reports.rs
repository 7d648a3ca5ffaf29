use serde::{Deserialize, Serialize};

/// Outcome of one compaction run. Per-group failures are counted in
/// `errors`; nothing is rolled back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompactionReport {
    pub weekly_summaries: usize,
    pub monthly_summaries: usize,
    /// Weekly sources bumped to level 1 (retained).
    pub sources_marked: usize,
    /// Monthly sources removed.
    pub sources_deleted: usize,
    pub archived: usize,
    /// Groups below the minimum size, or with no summary produced.
    pub skipped_groups: usize,
    pub errors: usize,
}

impl CompactionReport {
    /// Total summary records created.
    pub fn summaries_created(&self) -> usize {
        self.weekly_summaries + self.monthly_summaries
    }

    pub fn merge(&mut self, other: &CompactionReport) {
        self.weekly_summaries += other.weekly_summaries;
        self.monthly_summaries += other.monthly_summaries;
        self.sources_marked += other.sources_marked;
        self.sources_deleted += other.sources_deleted;
        self.archived += other.archived;
        self.skipped_groups += other.skipped_groups;
        self.errors += other.errors;
    }
}

/// Outcome of one reconciliation pass, counted in records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileReport {
    pub added: usize,
    pub updated: usize,
    pub removed: usize,
    pub unchanged: usize,
    /// Files that could not be read or applied.
    pub errors: usize,
}

impl ReconcileReport {
    /// True if the pass changed the store.
    pub fn has_changes(&self) -> bool {
        self.added + self.updated + self.removed > 0
    }

    pub fn merge(&mut self, other: &ReconcileReport) {
        self.added += other.added;
        self.updated += other.updated;
        self.removed += other.removed;
        self.unchanged += other.unchanged;
        self.errors += other.errors;
    }
}

/// Outcome of a background importance recalculation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RescoreReport {
    pub scanned: usize,
    pub changed: usize,
}
