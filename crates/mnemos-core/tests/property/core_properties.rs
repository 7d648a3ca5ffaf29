//! Property tests: duration grammar, tag normalization, importance buckets.

use proptest::prelude::*;

use mnemos_core::config::DurationSpec;
use mnemos_core::memory::{clamp01, normalize_tags, ImportanceLevel};

proptest! {
    #[test]
    fn prop_duration_display_parses_back(amount in 0u64..10_000_000, unit in "[dhm]") {
        let text = format!("{amount}{unit}");
        let spec = DurationSpec::parse(&text).unwrap();
        prop_assert_eq!(spec.to_string(), text.clone());
        prop_assert_eq!(DurationSpec::parse(&spec.to_string()).unwrap(), spec);
    }

    #[test]
    fn prop_duration_rejects_outside_grammar(text in "[0-9]{0,4}[a-z ]{0,2}[0-9]{0,2}") {
        let well_formed = text.len() >= 2
            && text[..text.len() - 1].bytes().all(|b| b.is_ascii_digit())
            && matches!(text.as_bytes()[text.len() - 1], b'd' | b'h' | b'm');
        prop_assert_eq!(DurationSpec::parse(&text).is_ok(), well_formed);
    }

    #[test]
    fn prop_normalize_tags_is_idempotent(tags in prop::collection::vec("[ #]{0,2}[a-zA-Z]{0,6}[ ]{0,2}", 0..8)) {
        let once = normalize_tags(&tags);
        prop_assert_eq!(normalize_tags(&once), once.clone());
        prop_assert!(once.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(once.iter().all(|t| !t.is_empty() && !t.starts_with('#')));
    }

    #[test]
    fn prop_importance_level_floor_bounds_score(score in prop::num::f64::ANY) {
        let clamped = clamp01(score);
        prop_assert!((0.0..=1.0).contains(&clamped));
        let level = ImportanceLevel::from_score(score);
        prop_assert!(level.floor() <= clamped);
        prop_assert_eq!(ImportanceLevel::from_score(clamped), level);
    }
}
