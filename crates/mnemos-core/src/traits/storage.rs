use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::errors::MnemosResult;
use crate::memory::{
    AccessAction, AccessLogEntry, Memory, MemoryUpdate, NewMemory, Relation, RelationType, Tag,
};
use crate::models::{CompactionCursor, IntegrityReport, SearchFilter, StoreStats};

/// CRUD + access tracking + query + relations + aggregation.
///
/// Every write is individually atomic. Nothing spans several records, so a
/// batch caller (compaction, reconciliation) must tolerate partial progress.
pub trait IMemoryStore: Send + Sync {
    // --- CRUD ---
    fn create(&self, memory: &NewMemory) -> MnemosResult<Memory>;
    fn get(&self, id: &str) -> MnemosResult<Option<Memory>>;
    /// Returns `None` if the id is unknown.
    fn update(&self, id: &str, update: &MemoryUpdate) -> MnemosResult<Option<Memory>>;
    /// Cascades to tag links, access log rows and relation edges.
    /// Returns `false` if the id is unknown.
    fn delete(&self, id: &str) -> MnemosResult<bool>;
    /// Delete a record folded into `summary_id` and remember its
    /// `(source_path, content_hash)` so reconciliation does not re-import
    /// the same section. Returns `false` if the id is unknown.
    fn absorb(&self, id: &str, summary_id: &str) -> MnemosResult<bool>;
    /// Content hashes absorbed into summaries for a logical path.
    fn absorbed_hashes(&self, source_path: &str) -> MnemosResult<HashSet<String>>;

    // --- Access ---
    /// Bumps `accessed_at`/`access_count` and appends a log row.
    fn record_access(
        &self,
        id: &str,
        action: AccessAction,
        query: Option<&str>,
    ) -> MnemosResult<bool>;
    fn access_log(&self, id: &str) -> MnemosResult<Vec<AccessLogEntry>>;

    // --- Query ---
    fn search(&self, filter: &SearchFilter) -> MnemosResult<Vec<Memory>>;
    /// Non-summary records created before `older_than` with
    /// `compression_level <= max_level`, ordered by `(created_at, id)`.
    /// Pass the last record of the previous page as `after` to continue.
    fn list_for_compaction(
        &self,
        older_than: DateTime<Utc>,
        max_level: u8,
        after: Option<&CompactionCursor>,
        limit: usize,
    ) -> MnemosResult<Vec<Memory>>;
    /// Level-2, non-archive records created before `older_than` and not
    /// accessed since, oldest first.
    fn list_archive_candidates(
        &self,
        older_than: DateTime<Utc>,
        limit: usize,
    ) -> MnemosResult<Vec<Memory>>;
    /// All records for a logical path, in creation order.
    fn list_by_source(&self, source_path: &str) -> MnemosResult<Vec<Memory>>;
    /// Distinct logical paths present in the store.
    fn source_paths(&self) -> MnemosResult<Vec<String>>;
    fn list_all(&self) -> MnemosResult<Vec<Memory>>;

    // --- Scoring ---
    /// Refresh the derived score (and level) without touching the base
    /// importance or `updated_at`. Returns `false` if the id is unknown.
    fn set_importance(&self, id: &str, score: f64) -> MnemosResult<bool>;

    // --- Compaction ---
    /// Raise `compression_level` without touching `updated_at`. Never
    /// lowers it. Returns `false` if the id is unknown or already at or
    /// above `level`.
    fn set_compression_level(&self, id: &str, level: u8) -> MnemosResult<bool>;

    // --- Relations ---
    fn add_relation(&self, relation: &Relation) -> MnemosResult<()>;
    /// Edges where the memory is either endpoint.
    fn relations_for(&self, id: &str) -> MnemosResult<Vec<Relation>>;
    fn remove_relation(
        &self,
        source_id: &str,
        target_id: &str,
        relation_type: RelationType,
    ) -> MnemosResult<bool>;

    // --- Aggregation ---
    fn top_tags(&self, limit: usize) -> MnemosResult<Vec<Tag>>;
    fn stats(&self) -> MnemosResult<StoreStats>;
    fn integrity_report(&self) -> MnemosResult<IntegrityReport>;
}
