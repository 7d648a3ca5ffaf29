use chrono::{Duration, Utc};
use mnemos_core::memory::{MemoryType, MemoryUpdate};
use mnemos_core::models::{SearchFilter, SearchOrder};
use mnemos_core::traits::IMemoryStore;
use mnemos_storage::StorageEngine;

use super::{aged, make_memory};

fn seeded() -> StorageEngine {
    let store = StorageEngine::open_in_memory().unwrap();
    store
        .create(
            &make_memory("Decided to use tokio for the async runtime", "memory/a.md")
                .with_type(MemoryType::Decision)
                .with_tags(["rust", "async"])
                .with_importance(0.9),
        )
        .unwrap();
    store
        .create(
            &make_memory("Prefer short commit messages", "memory/b.md")
                .with_type(MemoryType::Preference)
                .with_tags(["git"])
                .with_importance(0.4),
        )
        .unwrap();
    store
        .create(
            &make_memory("Todo: benchmark the sqlite pool", "memory/c.md")
                .with_type(MemoryType::Todo)
                .with_tags(["rust", "perf"])
                .with_importance(0.6),
        )
        .unwrap();
    store
}

#[test]
fn text_filter_matches_any_token() {
    let store = seeded();
    let hits = store.search(&SearchFilter::text("tokio commit")).unwrap();
    assert_eq!(hits.len(), 2);

    let hits = store.search(&SearchFilter::text("Tokio")).unwrap();
    assert_eq!(hits.len(), 1);
    assert!(hits[0].content.contains("tokio"));

    assert!(store.search(&SearchFilter::text("kubernetes")).unwrap().is_empty());
}

#[test]
fn text_filter_matches_inside_words() {
    let store = seeded();
    let hits = store.search(&SearchFilter::text("sync")).unwrap();
    assert_eq!(hits.len(), 1);
    assert!(hits[0].content.contains("async"));
    assert_eq!(store.search(&SearchFilter::text("SYNC")).unwrap().len(), 1);
    assert_eq!(store.search(&SearchFilter::text("enchmar")).unwrap().len(), 1);
}

#[test]
fn short_tokens_still_match_as_substrings() {
    let store = seeded();
    let hits = store.search(&SearchFilter::text("ql")).unwrap();
    assert_eq!(hits.len(), 1);
    assert!(hits[0].content.contains("sqlite"));

    let hits = store.search(&SearchFilter::text("ql changelog")).unwrap();
    assert_eq!(hits.len(), 1, "short and long tokens are OR-ed");
}

#[test]
fn text_filter_sees_updated_content() {
    let store = seeded();
    let hit = store.search(&SearchFilter::text("commit")).unwrap().remove(0);
    store
        .update(
            &hit.id,
            &MemoryUpdate {
                content: Some("Prefer descriptive changelog entries".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

    assert!(store.search(&SearchFilter::text("commit")).unwrap().is_empty());
    assert_eq!(store.search(&SearchFilter::text("changelog")).unwrap().len(), 1);
}

#[test]
fn tag_filter_requires_every_tag() {
    let store = seeded();
    let filter = SearchFilter {
        tags: vec!["rust".to_string()],
        ..Default::default()
    };
    assert_eq!(store.search(&filter).unwrap().len(), 2);

    let filter = SearchFilter {
        tags: vec!["rust".to_string(), "#Perf".to_string()],
        ..Default::default()
    };
    let hits = store.search(&filter).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].memory_type, MemoryType::Todo);
}

#[test]
fn type_and_importance_filters() {
    let store = seeded();
    let filter = SearchFilter {
        memory_type: Some(MemoryType::Preference),
        ..Default::default()
    };
    assert_eq!(store.search(&filter).unwrap().len(), 1);

    let filter = SearchFilter {
        min_importance: Some(0.5),
        order: SearchOrder::Importance,
        ..Default::default()
    };
    let hits = store.search(&filter).unwrap();
    assert_eq!(hits.len(), 2);
    assert!(hits[0].importance_score >= hits[1].importance_score);
}

#[test]
fn creation_window_is_half_open() {
    let store = StorageEngine::open_in_memory().unwrap();
    let now = Utc::now();
    let old = store.create(&aged("ten days old", 10, now)).unwrap();
    store.create(&aged("two days old", 2, now)).unwrap();

    let filter = SearchFilter {
        created_after: Some(old.created_at),
        created_before: Some(now - Duration::days(5)),
        ..Default::default()
    };
    let hits = store.search(&filter).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, old.id);

    let filter = SearchFilter {
        created_before: Some(old.created_at),
        ..Default::default()
    };
    assert!(store.search(&filter).unwrap().is_empty());
}

#[test]
fn recency_order_and_limit() {
    let store = StorageEngine::open_in_memory().unwrap();
    let now = Utc::now();
    for days in [5, 1, 3] {
        store.create(&aged(&format!("entry from {days} days ago"), days, now)).unwrap();
    }
    let filter = SearchFilter {
        order: SearchOrder::Recency,
        limit: Some(2),
        ..Default::default()
    };
    let hits = store.search(&filter).unwrap();
    assert_eq!(hits.len(), 2);
    assert!(hits[0].content.contains("1 days"));
    assert!(hits[1].content.contains("3 days"));
}
