use chrono::{DateTime, Utc};

use mnemos_core::config::ScoringConfig;
use mnemos_core::memory::{clamp01, Memory};

use crate::factors;

/// Query-time relevance.
///
/// ```text
/// score = importance × Wi + recency × Wr + textMatch × (1 − Wi − Wr)
/// ```
///
/// Clamped to [0.0, 1.0].
pub fn query_score(memory: &Memory, query: &str, config: &ScoringConfig, now: DateTime<Utc>) -> f64 {
    query_breakdown(memory, query, config, now).score
}

/// Per-factor values behind a query-time score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    pub importance: f64,
    pub recency: f64,
    pub text_match: f64,
    pub score: f64,
}

pub fn query_breakdown(
    memory: &Memory,
    query: &str,
    config: &ScoringConfig,
    now: DateTime<Utc>,
) -> ScoreBreakdown {
    let importance = clamp01(memory.importance_score);
    let recency = factors::recency::calculate(memory.age_days(now), config.recency_window_days);
    let text_match = factors::text_match::calculate(&memory.searchable_text(), query);

    let score = clamp01(
        importance * config.importance_weight
            + recency * config.recency_weight
            + text_match * config.text_weight(),
    );

    ScoreBreakdown {
        importance,
        recency,
        text_match,
        score,
    }
}

/// Background recalculation.
///
/// ```text
/// newScore = clamp01(base × decayFactor^ageDays
///                    + accessCount × accessBoost
///                    + recency × recencyBoost)
/// ```
///
/// `base` is the importance last set explicitly, so repeated runs with the
/// same `now` give the same result, and an unaccessed record trends down as
/// `now` advances.
pub fn recalculate(memory: &Memory, config: &ScoringConfig, now: DateTime<Utc>) -> f64 {
    let age = memory.age_days(now);
    let decayed = memory.base_importance * factors::decay::calculate(config.decay_factor, age);
    let access = factors::access::calculate(memory.access_count, config.access_boost);
    let recency = factors::recency::calculate(age, config.recency_window_days);
    clamp01(decayed + access + recency * config.recency_boost)
}
