//! Property tests: create/get round trip, tag counts match links.

use proptest::prelude::*;

use mnemos_core::memory::{normalize_tags, NewMemory};
use mnemos_core::traits::IMemoryStore;
use mnemos_storage::StorageEngine;

proptest! {
    #[test]
    fn prop_create_get_roundtrip(content in "[a-zA-Z0-9][a-zA-Z0-9 ]{0,99}") {
        let store = StorageEngine::open_in_memory().unwrap();
        let created = store.create(&NewMemory::new(content.clone(), "p.md")).unwrap();
        let loaded = store.get(&created.id).unwrap().unwrap();
        prop_assert_eq!(loaded.content, content);
        prop_assert_eq!(loaded.content_hash, created.content_hash);
    }

    #[test]
    fn prop_tag_counts_match_links(
        tag_sets in prop::collection::vec(prop::collection::vec("[a-d]", 0..4), 1..8),
        delete_mask in prop::collection::vec(any::<bool>(), 8),
    ) {
        let store = StorageEngine::open_in_memory().unwrap();
        let mut live: Vec<Vec<String>> = Vec::new();
        for (i, tags) in tag_sets.iter().enumerate() {
            let m = store
                .create(&NewMemory::new(format!("memory {i}"), "p.md").with_tags(tags))
                .unwrap();
            if delete_mask[i] {
                store.delete(&m.id).unwrap();
            } else {
                live.push(normalize_tags(tags));
            }
        }

        for tag in store.top_tags(100).unwrap() {
            let expected = live.iter().filter(|set| set.contains(&tag.name)).count() as u64;
            prop_assert_eq!(tag.count, expected);
        }
        prop_assert!(store.integrity_report().unwrap().is_healthy());
    }
}
