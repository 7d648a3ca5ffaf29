//! Property tests: scores stay in [0, 1]; recalculation never rises with
//! age for an unaccessed record.

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;

use mnemos_core::config::ScoringConfig;
use mnemos_core::memory::{ImportanceLevel, Memory, MemoryType};
use mnemos_scoring::formula;

fn make_memory(importance: f64, access_count: u64, days_ago: i64) -> Memory {
    let now = Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap();
    let created = now - Duration::days(days_ago);
    Memory {
        id: "prop".to_string(),
        content: "proptest memory body".to_string(),
        summary: None,
        source_path: "p.md".to_string(),
        memory_type: MemoryType::Note,
        importance_level: ImportanceLevel::from_score(importance),
        importance_score: importance,
        base_importance: importance,
        compression_level: 0,
        compressed_from: vec![],
        tags: vec![],
        content_hash: String::new(),
        created_at: created,
        updated_at: created,
        accessed_at: None,
        access_count,
    }
}

fn config(wi: f64, wr: f64, decay: f64, access_boost: f64, recency_boost: f64) -> ScoringConfig {
    ScoringConfig {
        importance_weight: wi,
        recency_weight: wr * (1.0 - wi),
        decay_factor: decay,
        access_boost,
        recency_boost,
        ..Default::default()
    }
}

proptest! {
    #[test]
    fn prop_scores_in_unit_interval(
        importance in 0.0f64..=1.0,
        access in 0u64..10_000,
        days in 0i64..2000,
        wi in 0.0f64..=1.0,
        wr in 0.0f64..=1.0,
        decay in 0.01f64..0.99,
        access_boost in 0.0f64..=1.0,
        recency_boost in 0.0f64..=1.0,
        query in "[a-z ]{0,20}",
    ) {
        let cfg = config(wi, wr, decay, access_boost, recency_boost);
        let memory = make_memory(importance, access, days);
        let now = Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap();

        let recalculated = formula::recalculate(&memory, &cfg, now);
        prop_assert!((0.0..=1.0).contains(&recalculated));

        let queried = formula::query_score(&memory, &query, &cfg, now);
        prop_assert!((0.0..=1.0).contains(&queried));
    }

    #[test]
    fn prop_unaccessed_recalculation_non_increasing(
        importance in 0.0f64..=1.0,
        decay in 0.01f64..0.99,
        start in 0i64..500,
        step in 1i64..100,
    ) {
        let cfg = config(0.3, 0.2, decay, 0.01, 0.1);
        let memory = make_memory(importance, 0, 0);
        let base = Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap();

        let earlier = formula::recalculate(&memory, &cfg, base + Duration::days(start));
        let later = formula::recalculate(&memory, &cfg, base + Duration::days(start + step));
        prop_assert!(later <= earlier);
    }
}
