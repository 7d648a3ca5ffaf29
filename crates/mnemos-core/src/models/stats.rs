use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Aggregate counts over the whole store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreStats {
    pub total: usize,
    /// Memory type name → count.
    pub by_type: BTreeMap<String, usize>,
    /// Compression level → count.
    pub by_level: BTreeMap<u8, usize>,
    /// Distinct tags in the catalogue.
    pub tags: usize,
    pub access_log_entries: usize,
    pub relations: usize,
}

/// Referential-integrity findings. A healthy store reports all zeros and
/// `sqlite_ok = true`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrityReport {
    pub orphaned_tag_links: usize,
    pub orphaned_access_entries: usize,
    pub orphaned_relations: usize,
    /// Catalogue entries whose count differs from the live link count.
    pub tag_count_drift: usize,
    pub sqlite_ok: bool,
}

impl IntegrityReport {
    pub fn is_healthy(&self) -> bool {
        self.sqlite_ok
            && self.orphaned_tag_links == 0
            && self.orphaned_access_entries == 0
            && self.orphaned_relations == 0
            && self.tag_count_drift == 0
    }
}
