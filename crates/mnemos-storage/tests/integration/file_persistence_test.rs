use mnemos_core::config::StorageConfig;
use mnemos_core::models::SearchFilter;
use mnemos_core::traits::IMemoryStore;
use mnemos_storage::migrations::{current_version, LATEST_VERSION};
use mnemos_storage::StorageEngine;

use super::make_memory;

#[test]
fn data_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mnemos.db");

    let id = {
        let store = StorageEngine::open(&path).unwrap();
        let m = store
            .create(&make_memory("persisted across restarts", "MEMORY.md").with_tags(["keep"]))
            .unwrap();
        m.id
    };

    let store = StorageEngine::open(&path).unwrap();
    let loaded = store.get(&id).unwrap().unwrap();
    assert_eq!(loaded.content, "persisted across restarts");
    assert_eq!(loaded.tags, vec!["keep"]);

    let version = store.pool().writer.with_conn_sync(current_version).unwrap();
    assert_eq!(version, LATEST_VERSION);
}

#[test]
fn read_pool_sees_writer_commits() {
    let dir = tempfile::tempdir().unwrap();
    let config = StorageConfig {
        db_path: dir.path().join("pool.db").to_string_lossy().into_owned(),
        read_pool_size: 2,
        default_page_size: 5,
    };
    let store = StorageEngine::from_config(&config).unwrap();
    assert_eq!(store.pool().readers.as_ref().map(|r| r.size()), Some(2));

    for i in 0..8 {
        store
            .create(&make_memory(&format!("pooled entry number {i}"), "memory/p.md"))
            .unwrap();
    }
    let hits = store.search(&SearchFilter::text("pooled")).unwrap();
    assert_eq!(hits.len(), 5, "default page size applies");
}

#[test]
fn in_memory_config_has_no_readers() {
    let config = StorageConfig {
        db_path: ":memory:".to_string(),
        ..Default::default()
    };
    let store = StorageEngine::from_config(&config).unwrap();
    assert!(store.pool().readers.is_none());
}
