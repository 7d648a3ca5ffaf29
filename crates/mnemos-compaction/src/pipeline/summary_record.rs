//! Building the summary record for one group.

use mnemos_core::constants::COMPACTION_PATH_PREFIX;
use mnemos_core::memory::{normalize_tags, Memory, MemoryType, NewMemory};
use mnemos_core::traits::Granularity;

/// `_compaction/<granularity>/<bucket>`.
pub fn source_path(granularity: Granularity, bucket: &str) -> String {
    format!("{COMPACTION_PATH_PREFIX}/{granularity}/{bucket}")
}

/// A `summary` record at `level` folding in `group`: importance is the
/// group maximum, tags are the union plus the granularity tag, and
/// `created_at` is the newest source's so the summary sits in the period it
/// covers.
pub fn build(
    text: String,
    group: &[Memory],
    granularity: Granularity,
    bucket: &str,
    level: u8,
) -> NewMemory {
    let importance = group
        .iter()
        .map(|m| m.importance_score)
        .fold(0.0_f64, f64::max);
    let tags = normalize_tags(
        group
            .iter()
            .flat_map(|m| m.tags.iter().map(String::as_str))
            .chain(std::iter::once(granularity.as_str())),
    );
    let ids = group.iter().map(|m| m.id.clone()).collect();

    let mut record = NewMemory::new(text, source_path(granularity, bucket))
        .with_type(MemoryType::Summary)
        .with_importance(importance)
        .with_compression(level, ids)
        .with_tags(tags);
    if let Some(latest) = group.iter().map(|m| m.created_at).max() {
        record = record.created_at(latest);
    }
    record
}
