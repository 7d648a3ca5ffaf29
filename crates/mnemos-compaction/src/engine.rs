//! CompactionEngine: single-execution guard around the pipeline.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};

use mnemos_core::config::CompactionConfig;
use mnemos_core::errors::{CompactionError, MnemosResult};
use mnemos_core::models::CompactionReport;
use mnemos_core::traits::{IMemoryStore, ISummaryGenerator};

use crate::pipeline::{self, StageContext};

/// Runs the compaction pipeline against a store. Only one run (full or
/// single stage) may be in flight per engine.
pub struct CompactionEngine {
    config: CompactionConfig,
    summarizer: Arc<dyn ISummaryGenerator>,
    is_running: Arc<AtomicBool>,
}

/// Clears the running flag when dropped, including on early return.
struct RunGuard<'a>(&'a AtomicBool);

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl CompactionEngine {
    pub fn new(config: CompactionConfig, summarizer: Arc<dyn ISummaryGenerator>) -> Self {
        Self {
            config,
            summarizer,
            is_running: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_running(&self) -> bool {
        self.is_running.load(Ordering::Relaxed)
    }

    pub fn config(&self) -> &CompactionConfig {
        &self.config
    }

    fn acquire(&self) -> MnemosResult<RunGuard<'_>> {
        if self
            .is_running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(CompactionError::AlreadyRunning.into());
        }
        Ok(RunGuard(&self.is_running))
    }

    fn context<'a>(&'a self, store: &'a dyn IMemoryStore, now: DateTime<Utc>) -> StageContext<'a> {
        StageContext {
            store,
            summarizer: &self.summarizer,
            config: &self.config,
            now,
        }
    }

    /// Run weekly, monthly and archive stages in order as of `now`.
    pub fn compact(&self, store: &dyn IMemoryStore, now: DateTime<Utc>) -> MnemosResult<CompactionReport> {
        let _guard = self.acquire()?;
        pipeline::run_pipeline(&self.context(store, now))
    }

    pub fn compact_weekly(&self, store: &dyn IMemoryStore, now: DateTime<Utc>) -> MnemosResult<CompactionReport> {
        let _guard = self.acquire()?;
        pipeline::stage_weekly::run(&self.context(store, now))
    }

    pub fn compact_monthly(&self, store: &dyn IMemoryStore, now: DateTime<Utc>) -> MnemosResult<CompactionReport> {
        let _guard = self.acquire()?;
        pipeline::stage_monthly::run(&self.context(store, now))
    }

    pub fn archive(&self, store: &dyn IMemoryStore, now: DateTime<Utc>) -> MnemosResult<CompactionReport> {
        let _guard = self.acquire()?;
        pipeline::stage_archive::run(&self.context(store, now))
    }
}
