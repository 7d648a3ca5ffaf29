use serde::{Deserialize, Serialize};

use super::defaults;

/// Relevance scorer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Query-time weight of the stored importance score (`Wi`).
    pub importance_weight: f64,
    /// Query-time weight of recency (`Wr`). Text match gets `1 - Wi - Wr`.
    pub recency_weight: f64,
    /// Age in days at which recency reaches zero.
    pub recency_window_days: f64,
    /// Daily retention factor for background recalculation, in (0, 1).
    pub decay_factor: f64,
    /// Score added per recorded access during recalculation.
    pub access_boost: f64,
    /// Weight of recency during recalculation.
    pub recency_boost: f64,
}

impl ScoringConfig {
    /// Weight left over for text matching.
    pub fn text_weight(&self) -> f64 {
        1.0 - self.importance_weight - self.recency_weight
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            importance_weight: defaults::DEFAULT_IMPORTANCE_WEIGHT,
            recency_weight: defaults::DEFAULT_RECENCY_WEIGHT,
            recency_window_days: defaults::DEFAULT_RECENCY_WINDOW_DAYS,
            decay_factor: defaults::DEFAULT_DECAY_FACTOR,
            access_boost: defaults::DEFAULT_ACCESS_BOOST,
            recency_boost: defaults::DEFAULT_RECENCY_BOOST,
        }
    }
}
