use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use tracing::{debug, info, info_span};

use mnemos_core::config::ScoringConfig;
use mnemos_core::errors::MnemosResult;
use mnemos_core::memory::Memory;
use mnemos_core::models::RescoreReport;
use mnemos_core::traits::IMemoryStore;

use crate::formula::{self, ScoreBreakdown};

/// Scores below this difference are not written back.
const RESCORE_EPSILON: f64 = 1e-9;

/// A memory paired with its query-time score.
#[derive(Debug, Clone)]
pub struct ScoredMemory {
    pub memory: Memory,
    pub score: f64,
}

/// Relevance scorer bound to one scoring configuration.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn score(&self, memory: &Memory, query: &str, now: DateTime<Utc>) -> f64 {
        formula::query_score(memory, query, &self.config, now)
    }

    pub fn breakdown(&self, memory: &Memory, query: &str, now: DateTime<Utc>) -> ScoreBreakdown {
        formula::query_breakdown(memory, query, &self.config, now)
    }

    /// Score and sort candidates, best first. Ties go to the newer record.
    pub fn rank(&self, candidates: Vec<Memory>, query: &str, now: DateTime<Utc>) -> Vec<ScoredMemory> {
        let mut scored: Vec<ScoredMemory> = candidates
            .into_iter()
            .map(|memory| {
                let score = self.score(&memory, query, now);
                ScoredMemory { memory, score }
            })
            .collect();
        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| b.memory.created_at.cmp(&a.memory.created_at))
        });
        scored
    }

    pub fn recalculate(&self, memory: &Memory, now: DateTime<Utc>) -> f64 {
        formula::recalculate(memory, &self.config, now)
    }

    /// Recalculate every stored record as of `now`, writing only changed
    /// scores.
    pub fn rescore_all(&self, store: &dyn IMemoryStore, now: DateTime<Utc>) -> MnemosResult<RescoreReport> {
        let _span = info_span!("mnemos.rescore").entered();
        let mut report = RescoreReport::default();
        for memory in store.list_all()? {
            report.scanned += 1;
            let next = self.recalculate(&memory, now);
            if (next - memory.importance_score).abs() > RESCORE_EPSILON
                && store.set_importance(&memory.id, next)?
            {
                debug!(id = %memory.id, from = memory.importance_score, to = next, "rescored");
                report.changed += 1;
            }
        }
        info!(scanned = report.scanned, changed = report.changed, "rescore complete");
        Ok(report)
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}
