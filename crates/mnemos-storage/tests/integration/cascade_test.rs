use chrono::Utc;
use mnemos_core::memory::{AccessAction, Relation, RelationType};
use mnemos_core::traits::IMemoryStore;
use mnemos_storage::pool::pragmas::foreign_keys_enabled;
use mnemos_storage::StorageEngine;

use super::make_memory;

#[test]
fn foreign_keys_are_enforced() {
    let store = StorageEngine::open_in_memory().unwrap();
    let on = store.pool().writer.with_conn_sync(foreign_keys_enabled).unwrap();
    assert!(on);
}

#[test]
fn delete_leaves_no_orphans() {
    let store = StorageEngine::open_in_memory().unwrap();
    let a = store
        .create(&make_memory("memory with everything attached", "a.md").with_tags(["x", "y"]))
        .unwrap();
    let b = store.create(&make_memory("neighbour memory", "b.md").with_tags(["y"])).unwrap();

    store.record_access(&a.id, AccessAction::Search, Some("everything")).unwrap();
    store.record_access(&a.id, AccessAction::Read, None).unwrap();
    store
        .add_relation(&Relation {
            source_id: b.id.clone(),
            target_id: a.id.clone(),
            relation_type: RelationType::References,
            created_at: Utc::now(),
        })
        .unwrap();

    assert!(store.delete(&a.id).unwrap());

    assert!(store.access_log(&a.id).unwrap().is_empty());
    assert!(store.relations_for(&b.id).unwrap().is_empty());

    let stats = store.stats().unwrap();
    assert_eq!(stats.total, 1);
    assert_eq!(stats.access_log_entries, 0);
    assert_eq!(stats.relations, 0);
    assert_eq!(stats.tags, 1);

    let top = store.top_tags(10).unwrap();
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].name, "y");
    assert_eq!(top[0].count, 1);

    let report = store.integrity_report().unwrap();
    assert!(report.is_healthy(), "{report:?}");
}

#[test]
fn relation_to_unknown_memory_is_rejected() {
    let store = StorageEngine::open_in_memory().unwrap();
    let a = store.create(&make_memory("lonely memory", "a.md")).unwrap();
    let result = store.add_relation(&Relation {
        source_id: a.id.clone(),
        target_id: "missing".to_string(),
        relation_type: RelationType::Related,
        created_at: Utc::now(),
    });
    assert!(result.is_err());
}

#[test]
fn relations_are_deduplicated_and_removable() {
    let store = StorageEngine::open_in_memory().unwrap();
    let a = store.create(&make_memory("summary record", "s.md")).unwrap();
    let b = store.create(&make_memory("source record", "a.md")).unwrap();
    let edge = Relation {
        source_id: a.id.clone(),
        target_id: b.id.clone(),
        relation_type: RelationType::DerivedFrom,
        created_at: Utc::now(),
    };
    store.add_relation(&edge).unwrap();
    store.add_relation(&edge).unwrap();

    assert_eq!(store.relations_for(&b.id).unwrap().len(), 1);
    assert!(store.remove_relation(&a.id, &b.id, RelationType::DerivedFrom).unwrap());
    assert!(!store.remove_relation(&a.id, &b.id, RelationType::DerivedFrom).unwrap());
    assert!(store.relations_for(&a.id).unwrap().is_empty());
}
