//! Property tests: each stage only touches records at its own level.

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;

use mnemos_compaction::{CompactionEngine, HeuristicSummarizer};
use mnemos_core::config::CompactionConfig;
use mnemos_core::memory::NewMemory;
use mnemos_core::traits::IMemoryStore;
use mnemos_storage::StorageEngine;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_stages_respect_levels(
        records in prop::collection::vec((0u8..=2, 0i64..200), 1..30),
    ) {
        let store = StorageEngine::open_in_memory().unwrap();
        let now = Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap();
        let mut by_level = [Vec::new(), Vec::new(), Vec::new()];
        for (i, (level, days)) in records.iter().enumerate() {
            let m = store
                .create(
                    &NewMemory::new(format!("record {i}"), "p.md")
                        .with_compression(*level, vec![])
                        .created_at(now - Duration::days(*days)),
                )
                .unwrap();
            by_level[*level as usize].push(m.id);
        }
        let engine = CompactionEngine::new(CompactionConfig::default(), Arc::new(HeuristicSummarizer));

        let config = engine.config().clone();
        let weekly_cutoff = now - config.weekly_age.as_chrono();
        let weekly = engine.compact_weekly(&store, now).unwrap();
        // Level-1 and level-2 records are untouched by the weekly stage.
        for id in by_level[1].iter().chain(&by_level[2]) {
            let m = store.get(id).unwrap().unwrap();
            prop_assert!(m.compression_level >= 1);
        }
        prop_assert!(weekly.sources_marked <= by_level[0].len());

        let monthly = engine.compact_monthly(&store, now).unwrap();
        // Level-2 originals survive the monthly stage.
        for id in &by_level[2] {
            prop_assert!(store.get(id).unwrap().is_some());
        }
        prop_assert!(monthly.sources_deleted <= by_level[0].len() + by_level[1].len());

        let archived = engine.archive(&store, now).unwrap();
        for m in store.list_all().unwrap() {
            if m.memory_type == mnemos_core::memory::MemoryType::Archive {
                prop_assert_eq!(m.compression_level, 2);
            }
            if m.compression_level == 0 {
                prop_assert!(m.created_at >= weekly_cutoff || weekly.skipped_groups > 0);
            }
        }
        prop_assert!(archived.archived <= store.stats().unwrap().total);
    }
}
