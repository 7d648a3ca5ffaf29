use chrono::{Duration, Utc};
use mnemos_core::memory::{AccessAction, MemoryType, MemoryUpdate};
use mnemos_core::models::CompactionCursor;
use mnemos_core::traits::IMemoryStore;
use mnemos_storage::StorageEngine;

use super::{aged, summary_record};

#[test]
fn compaction_candidates_exclude_summaries_and_recent() {
    let store = StorageEngine::open_in_memory().unwrap();
    let now = Utc::now();
    let old = store.create(&aged("old original note", 10, now)).unwrap();
    store.create(&aged("recent original note", 2, now)).unwrap();
    store
        .create(&summary_record("weekly digest", 1, vec![old.id.clone()]).created_at(now - Duration::days(9)))
        .unwrap();

    let cutoff = now - Duration::days(7);
    let found = store.list_for_compaction(cutoff, 0, None, 100).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, old.id);

    let found = store.list_for_compaction(cutoff, 1, None, 100).unwrap();
    assert_eq!(found.len(), 1, "summaries never re-enter compaction");
}

#[test]
fn compaction_candidates_respect_the_level_ceiling() {
    let store = StorageEngine::open_in_memory().unwrap();
    let now = Utc::now();
    let lonely = store.create(&aged("untouched original", 60, now)).unwrap();
    let weekly = store.create(&aged("weekly-compacted original", 20, now)).unwrap();
    assert!(store.set_compression_level(&weekly.id, 1).unwrap());

    let upto1 = store.list_for_compaction(now, 1, None, 100).unwrap();
    let ids: Vec<&str> = upto1.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec![lonely.id.as_str(), weekly.id.as_str()]);

    let level0 = store.list_for_compaction(now, 0, None, 100).unwrap();
    assert_eq!(level0.len(), 1);
    assert_eq!(level0[0].id, lonely.id);
}

#[test]
fn compaction_candidates_are_oldest_first_and_limited() {
    let store = StorageEngine::open_in_memory().unwrap();
    let now = Utc::now();
    for days in [20, 40, 30] {
        store.create(&aged(&format!("note aged {days}"), days, now)).unwrap();
    }
    let found = store.list_for_compaction(now, 0, None, 2).unwrap();
    assert_eq!(found.len(), 2);
    assert!(found[0].content.ends_with("40"));
    assert!(found[1].content.ends_with("30"));
}

#[test]
fn compaction_cursor_pages_through_ties() {
    let store = StorageEngine::open_in_memory().unwrap();
    let at = Utc::now() - Duration::days(30);
    for n in 0..5 {
        store
            .create(&aged(&format!("same instant note {n}"), 0, at))
            .unwrap();
    }

    let mut seen = Vec::new();
    let mut cursor: Option<CompactionCursor> = None;
    loop {
        let page = store
            .list_for_compaction(Utc::now(), 0, cursor.as_ref(), 2)
            .unwrap();
        let Some(last) = page.last() else { break };
        cursor = Some(CompactionCursor::after(last));
        seen.extend(page.into_iter().map(|m| m.id));
    }
    assert_eq!(seen.len(), 5);
    let mut sorted = seen.clone();
    sorted.sort();
    assert_eq!(seen, sorted, "ties are broken by id");
}

#[test]
fn set_compression_level_keeps_updated_at() {
    let store = StorageEngine::open_in_memory().unwrap();
    let now = Utc::now();
    let note = store.create(&aged("note to compact", 10, now)).unwrap();

    assert!(store.set_compression_level(&note.id, 1).unwrap());
    let after = store.get(&note.id).unwrap().unwrap();
    assert_eq!(after.compression_level, 1);
    assert_eq!(after.updated_at, note.updated_at);

    assert!(!store.set_compression_level(&note.id, 0).unwrap(), "never lowered");
    assert!(!store.set_compression_level("missing", 1).unwrap());
    assert_eq!(store.get(&note.id).unwrap().unwrap().compression_level, 1);
}

#[test]
fn absorb_deletes_and_remembers_the_section() {
    let store = StorageEngine::open_in_memory().unwrap();
    let now = Utc::now();
    let note = store.create(&aged("section folded into a summary", 40, now)).unwrap();
    let digest = store.create(&summary_record("monthly digest", 2, vec![note.id.clone()])).unwrap();

    assert!(store.absorb(&note.id, &digest.id).unwrap());
    assert!(store.get(&note.id).unwrap().is_none());
    let hashes = store.absorbed_hashes("memory/log.md").unwrap();
    assert!(hashes.contains(&note.content_hash));
    assert!(store.absorbed_hashes("MEMORY.md").unwrap().is_empty());

    assert!(!store.absorb(&note.id, &digest.id).unwrap());
    assert!(!store.absorb("missing", &digest.id).unwrap());
}

#[test]
fn archive_candidates_skip_recently_accessed() {
    let store = StorageEngine::open_in_memory().unwrap();
    let now = Utc::now();
    let cold = store
        .create(&summary_record("cold monthly digest", 2, vec![]).created_at(now - Duration::days(120)))
        .unwrap();
    let warm = store
        .create(&summary_record("warm monthly digest", 2, vec![]).created_at(now - Duration::days(120)))
        .unwrap();
    store.create(&summary_record("young monthly digest", 2, vec![])).unwrap();
    store.record_access(&warm.id, AccessAction::Read, None).unwrap();

    let found = store.list_archive_candidates(now - Duration::days(90), 10).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, cold.id);

    store
        .update(
            &cold.id,
            &MemoryUpdate {
                memory_type: Some(MemoryType::Archive),
                ..Default::default()
            },
        )
        .unwrap();
    assert!(store.list_archive_candidates(now - Duration::days(90), 10).unwrap().is_empty());
}

#[test]
fn source_listing() {
    let store = StorageEngine::open_in_memory().unwrap();
    let now = Utc::now();
    store.create(&aged("first section of log", 3, now)).unwrap();
    store.create(&aged("second section of log", 1, now)).unwrap();
    store
        .create(&mnemos_core::memory::NewMemory::new("top-level note", "MEMORY.md"))
        .unwrap();

    assert_eq!(store.source_paths().unwrap(), vec!["MEMORY.md", "memory/log.md"]);
    let log = store.list_by_source("memory/log.md").unwrap();
    assert_eq!(log.len(), 2);
    assert!(log[0].content.starts_with("first"));
    assert_eq!(store.list_all().unwrap().len(), 3);

    let stats = store.stats().unwrap();
    assert_eq!(stats.by_level.get(&0), Some(&3));
    assert_eq!(stats.by_type.get("note"), Some(&3));
}
