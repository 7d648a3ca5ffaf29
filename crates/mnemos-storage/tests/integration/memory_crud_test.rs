use mnemos_core::errors::MnemosError;
use mnemos_core::memory::{AccessAction, ImportanceLevel, Memory, MemoryType, MemoryUpdate};
use mnemos_core::traits::IMemoryStore;
use mnemos_storage::StorageEngine;

use super::make_memory;

#[test]
fn create_assigns_id_hash_and_defaults() {
    let store = StorageEngine::open_in_memory().unwrap();
    let created = store
        .create(&make_memory("We chose SQLite for storage.", "MEMORY.md").with_tags(["DB", "#arch"]))
        .unwrap();

    assert_eq!(created.id.len(), 36);
    assert_eq!(created.content_hash, Memory::compute_content_hash("We chose SQLite for storage."));
    assert_eq!(created.compression_level, 0);
    assert_eq!(created.access_count, 0);
    assert!(created.accessed_at.is_none());
    assert_eq!(created.tags, vec!["arch", "db"]);

    let loaded = store.get(&created.id).unwrap().unwrap();
    assert_eq!(loaded.content, created.content);
    assert_eq!(loaded.tags, created.tags);
    assert_eq!(loaded.memory_type, MemoryType::Note);
    assert_eq!(loaded.created_at, created.created_at);
}

#[test]
fn empty_content_is_rejected() {
    let store = StorageEngine::open_in_memory().unwrap();
    let err = store.create(&make_memory("   ", "MEMORY.md")).unwrap_err();
    assert!(matches!(err, MnemosError::InvalidMemory { .. }));
    assert_eq!(store.stats().unwrap().total, 0);
}

#[test]
fn get_unknown_is_none() {
    let store = StorageEngine::open_in_memory().unwrap();
    assert!(store.get("missing").unwrap().is_none());
    assert!(store.update("missing", &MemoryUpdate::default()).unwrap().is_none());
    assert!(!store.delete("missing").unwrap());
}

#[test]
fn update_rehashes_and_bumps_updated_at() {
    let store = StorageEngine::open_in_memory().unwrap();
    let created = store.create(&make_memory("first version of the note", "a.md")).unwrap();

    let updated = store
        .update(
            &created.id,
            &MemoryUpdate {
                content: Some("second version of the note".to_string()),
                importance: Some(0.9),
                ..Default::default()
            },
        )
        .unwrap()
        .unwrap();

    assert_eq!(updated.content_hash, Memory::compute_content_hash("second version of the note"));
    assert!(updated.updated_at >= created.updated_at);
    assert_eq!(updated.importance_level, ImportanceLevel::Critical);
    assert_eq!(updated.base_importance, 0.9);
    assert_eq!(updated.created_at, created.created_at);
}

#[test]
fn compression_level_never_decreases() {
    let store = StorageEngine::open_in_memory().unwrap();
    let created = store
        .create(&make_memory("already compacted once", "a.md").with_compression(1, vec![]))
        .unwrap();

    let err = store
        .update(
            &created.id,
            &MemoryUpdate {
                compression_level: Some(0),
                ..Default::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, MnemosError::InvalidMemory { .. }));
    assert_eq!(store.get(&created.id).unwrap().unwrap().compression_level, 1);
}

#[test]
fn tag_catalogue_counts_follow_links() {
    let store = StorageEngine::open_in_memory().unwrap();
    let a = store.create(&make_memory("alpha note body", "a.md").with_tags(["rust", "db"])).unwrap();
    store.create(&make_memory("beta note body", "b.md").with_tags(["rust"])).unwrap();

    let top = store.top_tags(10).unwrap();
    assert_eq!(top[0].name, "rust");
    assert_eq!(top[0].count, 2);
    assert_eq!(top[1].name, "db");
    assert_eq!(top[1].count, 1);

    store
        .update(
            &a.id,
            &MemoryUpdate {
                tags: Some(vec!["cli".to_string()]),
                ..Default::default()
            },
        )
        .unwrap();

    let top = store.top_tags(10).unwrap();
    let names: Vec<_> = top.iter().map(|t| (t.name.as_str(), t.count)).collect();
    assert_eq!(names, vec![("cli", 1), ("rust", 1)]);
    assert!(store.integrity_report().unwrap().is_healthy());
}

#[test]
fn record_access_bumps_counters_and_logs() {
    let store = StorageEngine::open_in_memory().unwrap();
    let m = store.create(&make_memory("something to look up later", "a.md")).unwrap();

    assert!(store.record_access(&m.id, AccessAction::Search, Some("look up")).unwrap());
    assert!(store.record_access(&m.id, AccessAction::Read, None).unwrap());
    assert!(!store.record_access("missing", AccessAction::Read, None).unwrap());

    let loaded = store.get(&m.id).unwrap().unwrap();
    assert_eq!(loaded.access_count, 2);
    assert!(loaded.accessed_at.is_some());

    let log = store.access_log(&m.id).unwrap();
    assert_eq!(log.len(), 2);
    assert_eq!(log[0].action, AccessAction::Search);
    assert_eq!(log[0].query.as_deref(), Some("look up"));
    assert_eq!(log[1].action, AccessAction::Read);
}

#[test]
fn access_log_is_append_only() {
    let store = StorageEngine::open_in_memory().unwrap();
    let m = store.create(&make_memory("entry for the log", "a.md")).unwrap();
    store.record_access(&m.id, AccessAction::Read, None).unwrap();

    let result = store.pool().writer.with_conn_sync(|conn| {
        Ok(conn.execute("UPDATE access_log SET action = 'search'", []))
    });
    assert!(result.unwrap().is_err());
}

#[test]
fn set_importance_keeps_base_and_updated_at() {
    let store = StorageEngine::open_in_memory().unwrap();
    let m = store
        .create(&make_memory("a decision worth keeping", "a.md").with_importance(0.8))
        .unwrap();

    assert!(store.set_importance(&m.id, 0.2).unwrap());
    let loaded = store.get(&m.id).unwrap().unwrap();
    assert_eq!(loaded.importance_score, 0.2);
    assert_eq!(loaded.importance_level, ImportanceLevel::Low);
    assert_eq!(loaded.base_importance, 0.8);
    assert_eq!(loaded.updated_at, m.updated_at);

    assert!(!store.set_importance("missing", 0.5).unwrap());
}
