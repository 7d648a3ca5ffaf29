//! MemoryBackend: owns every engine and exposes search, read, sync,
//! compaction and status.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, info, info_span, warn};

use mnemos_compaction::{CompactionEngine, HeuristicSummarizer};
use mnemos_core::config::MnemosConfig;
use mnemos_core::errors::{MnemosError, MnemosResult};
use mnemos_core::memory::{normalize_tags, AccessAction};
use mnemos_core::models::{CompactionReport, SearchFilter, SearchOrder};
use mnemos_core::traits::{IFileTree, IMemoryStore, ISummaryGenerator};
use mnemos_markdown::{spawn_watcher, LocalFileTree, Reconciler, WatchHandle};
use mnemos_scoring::ScoringEngine;
use mnemos_storage::StorageEngine;

use crate::jobs::{join_error, run_worker, Job};
use crate::models::{SearchHit, SearchOptions, StatusReport, SyncReport};
use crate::snippet;

/// The engines shared between the façade, the job worker and blocking
/// tasks.
pub(crate) struct Components {
    config: MnemosConfig,
    store: StorageEngine,
    tree: Arc<dyn IFileTree>,
    scorer: ScoringEngine,
    compactor: CompactionEngine,
    reconciler: Reconciler,
}

impl Components {
    /// Reconcile, then compact, then rescore.
    pub(crate) fn run_sync(&self, now: DateTime<Utc>) -> MnemosResult<SyncReport> {
        let _span = info_span!("mnemos.sync").entered();
        let reconcile = self.reconciler.reconcile(&self.store, self.tree.as_ref())?;
        let compaction = self.compactor.compact(&self.store, now)?;
        let rescore = self.scorer.rescore_all(&self.store, now)?;

        let report = SyncReport::new(&reconcile, compaction, rescore);
        info!(
            added = report.added,
            updated = report.updated,
            removed = report.removed,
            unchanged = report.unchanged,
            summaries = report.compaction.summaries_created(),
            rescored = report.rescore.changed,
            errors = report.errors,
            "sync complete"
        );
        Ok(report)
    }

    pub(crate) fn run_compaction(&self, now: DateTime<Utc>) -> MnemosResult<CompactionReport> {
        self.compactor.compact(&self.store, now)
    }

    fn search(&self, query: &str, options: &SearchOptions, now: DateTime<Utc>) -> MnemosResult<Vec<SearchHit>> {
        let _span = info_span!("mnemos.search", query = %query).entered();
        let limit = options.limit.unwrap_or(self.config.storage.default_page_size);
        if limit == 0 {
            return Ok(Vec::new());
        }
        let backend = &self.config.backend;
        let text = query.trim();

        let filter = SearchFilter {
            text: (!text.is_empty()).then(|| text.to_string()),
            tags: normalize_tags(&options.tags),
            memory_type: options.memory_type,
            min_importance: options.min_importance,
            created_after: options.created_after,
            created_before: options.created_before,
            order: SearchOrder::Relevance,
            limit: Some(limit.saturating_mul(backend.candidate_multiplier)),
        };
        let candidates = self.store.search(&filter)?;
        let scanned = candidates.len();

        let hits: Vec<SearchHit> = self
            .scorer
            .rank(candidates, text, now)
            .into_iter()
            .take(limit)
            .map(|scored| SearchHit {
                snippet: snippet::extract(
                    &scored.memory.content,
                    text,
                    backend.snippet_before,
                    backend.snippet_after,
                ),
                score: scored.score,
                memory: scored.memory,
            })
            .collect();

        let logged_query = (!text.is_empty()).then_some(text);
        for hit in &hits {
            if let Err(e) = self
                .store
                .record_access(&hit.memory.id, AccessAction::Search, logged_query)
            {
                warn!(id = %hit.memory.id, error = %e, "failed to log search access");
            }
        }
        debug!(scanned, returned = hits.len(), "search complete");
        Ok(hits)
    }

    fn read_path(&self, path: &str, range: Option<(usize, usize)>) -> MnemosResult<Option<String>> {
        let records = self.store.list_by_source(path)?;
        let text = if records.is_empty() {
            if !self.tree.owns(path) {
                return Ok(None);
            }
            match self.tree.read(path) {
                Ok(text) => text,
                Err(e @ MnemosError::Io { .. }) => {
                    debug!(path, error = %e, "nothing stored or on disk");
                    return Ok(None);
                }
                Err(e) => return Err(e),
            }
        } else {
            for record in &records {
                if let Err(e) = self.store.record_access(&record.id, AccessAction::Read, None) {
                    warn!(id = %record.id, error = %e, "failed to log read access");
                }
            }
            records
                .iter()
                .map(|m| m.content.as_str())
                .collect::<Vec<_>>()
                .join("\n\n")
        };

        Ok(Some(match range {
            Some((start_line, line_count)) => slice_lines(&text, start_line, line_count),
            None => text,
        }))
    }

    fn status(&self) -> MnemosResult<StatusReport> {
        let stats = self.store.stats()?;
        Ok(StatusReport {
            total: stats.total,
            by_type: stats.by_type,
            by_level: stats.by_level,
            tags: stats.tags,
            top_tags: self.store.top_tags(self.config.backend.top_tags)?,
            access_log_entries: stats.access_log_entries,
            relations: stats.relations,
            fts_enabled: self.store.fts_enabled(),
            watching: false,
        })
    }
}

/// `line_count` lines starting at 1-based `start_line`. Line 0 is read as 1.
pub fn slice_lines(text: &str, start_line: usize, line_count: usize) -> String {
    text.lines()
        .skip(start_line.saturating_sub(1))
        .take(line_count)
        .collect::<Vec<_>>()
        .join("\n")
}

/// The backend façade.
///
/// Reads (`search`, `read_path`, `status`) run on the blocking pool and may
/// overlap with a running sync. `sync` and `compact` are queued on a single
/// worker, as are watcher-triggered syncs.
pub struct MemoryBackend {
    components: Arc<Components>,
    jobs: Mutex<Option<mpsc::Sender<Job>>>,
    worker: tokio::sync::Mutex<Option<JoinHandle<()>>>,
    watcher: tokio::sync::Mutex<Option<WatchHandle>>,
    closed: AtomicBool,
}

impl MemoryBackend {
    /// Open the configured store and wire it to `tree` and `summarizer`.
    /// Must be called from within a tokio runtime.
    pub fn open(
        config: MnemosConfig,
        tree: Arc<dyn IFileTree>,
        summarizer: Arc<dyn ISummaryGenerator>,
    ) -> MnemosResult<Self> {
        config.validate()?;
        let store = StorageEngine::from_config(&config.storage)?;
        Self::with_store(config, store, tree, summarizer)
    }

    /// Open with the local Markdown tree and the heuristic summarizer.
    pub fn open_local(config: MnemosConfig) -> MnemosResult<Self> {
        let tree = Arc::new(LocalFileTree::new(&config.markdown));
        Self::open(config, tree, Arc::new(HeuristicSummarizer))
    }

    /// Wire an already-opened store.
    pub fn with_store(
        config: MnemosConfig,
        store: StorageEngine,
        tree: Arc<dyn IFileTree>,
        summarizer: Arc<dyn ISummaryGenerator>,
    ) -> MnemosResult<Self> {
        let runtime = Handle::try_current().map_err(|e| MnemosError::TaskFailed {
            reason: e.to_string(),
        })?;

        let components = Arc::new(Components {
            scorer: ScoringEngine::new(config.scoring.clone()),
            compactor: CompactionEngine::new(config.compaction.clone(), summarizer),
            reconciler: Reconciler::new(&config.markdown),
            store,
            tree,
            config,
        });

        let (tx, rx) = mpsc::channel(components.config.backend.queue_capacity);
        let worker = runtime.spawn(run_worker(Arc::clone(&components), rx));
        info!("memory backend ready");

        Ok(Self {
            components,
            jobs: Mutex::new(Some(tx)),
            worker: tokio::sync::Mutex::new(Some(worker)),
            watcher: tokio::sync::Mutex::new(None),
            closed: AtomicBool::new(false),
        })
    }

    pub fn config(&self) -> &MnemosConfig {
        &self.components.config
    }

    /// Direct store access for seeding and inspection.
    pub fn store(&self) -> &StorageEngine {
        &self.components.store
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn ensure_open(&self) -> MnemosResult<()> {
        if self.is_closed() {
            Err(MnemosError::Shutdown)
        } else {
            Ok(())
        }
    }

    fn sender(&self) -> MnemosResult<mpsc::Sender<Job>> {
        self.jobs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(MnemosError::Shutdown)
    }

    async fn blocking<T, F>(&self, f: F) -> MnemosResult<T>
    where
        F: FnOnce(&Components) -> MnemosResult<T> + Send + 'static,
        T: Send + 'static,
    {
        self.ensure_open()?;
        let components = Arc::clone(&self.components);
        tokio::task::spawn_blocking(move || f(components.as_ref()))
            .await
            .map_err(join_error)?
    }

    /// Ranked, snippet-extracted hits. Each hit is logged as a `search`
    /// access.
    pub async fn search(&self, query: &str, options: SearchOptions) -> MnemosResult<Vec<SearchHit>> {
        let query = query.to_string();
        self.blocking(move |c| c.search(&query, &options, Utc::now())).await
    }

    /// Every record stored for `path`, joined by blank lines, optionally
    /// sliced to `(start_line, line_count)`. Falls back to the file itself
    /// when nothing is stored. `None` if neither exists.
    pub async fn read_path(&self, path: &str, range: Option<(usize, usize)>) -> MnemosResult<Option<String>> {
        let path = path.to_string();
        self.blocking(move |c| c.read_path(&path, range)).await
    }

    /// Queue a reconcile + compact + rescore pass and wait for it.
    pub async fn sync(&self) -> MnemosResult<SyncReport> {
        self.ensure_open()?;
        let (reply, rx) = oneshot::channel();
        self.sender()?
            .send(Job::Sync { reply: Some(reply) })
            .await
            .map_err(|_| MnemosError::Shutdown)?;
        rx.await.map_err(|_| MnemosError::Shutdown)?
    }

    /// Queue a compaction run and wait for it.
    pub async fn compact(&self) -> MnemosResult<CompactionReport> {
        self.ensure_open()?;
        let (reply, rx) = oneshot::channel();
        self.sender()?
            .send(Job::Compact { reply })
            .await
            .map_err(|_| MnemosError::Shutdown)?;
        rx.await.map_err(|_| MnemosError::Shutdown)?
    }

    pub async fn status(&self) -> MnemosResult<StatusReport> {
        let mut report = self.blocking(|c| c.status()).await?;
        report.watching = self.is_watching().await;
        Ok(report)
    }

    pub async fn is_watching(&self) -> bool {
        self.watcher
            .lock()
            .await
            .as_ref()
            .is_some_and(WatchHandle::is_running)
    }

    /// Start the debounced watcher. Each settled change queues a sync;
    /// a change arriving while the queue is full is dropped, since the
    /// queued sync will pick it up. No-op if already watching.
    pub async fn start_watching(&self) -> MnemosResult<()> {
        self.ensure_open()?;
        let jobs = self.sender()?;
        let mut watcher = self.watcher.lock().await;
        if watcher.as_ref().is_some_and(WatchHandle::is_running) {
            return Ok(());
        }
        let handle = spawn_watcher(
            Arc::clone(&self.components.tree),
            &self.components.config.markdown,
            move || match jobs.try_send(Job::Sync { reply: None }) {
                Ok(()) => debug!("watcher queued sync"),
                Err(TrySendError::Full(_)) => debug!("sync queue full, change coalesced"),
                Err(TrySendError::Closed(_)) => debug!("job queue closed, change dropped"),
            },
        );
        *watcher = Some(handle);
        info!("watching started");
        Ok(())
    }

    /// Stop the watcher and drop any pending debounce deadline.
    pub async fn stop_watching(&self) {
        let handle = self.watcher.lock().await.take();
        if let Some(handle) = handle {
            handle.stop().await;
            info!("watching stopped");
        }
    }

    /// Stop watching, let queued jobs finish, then shut the worker down.
    /// Later calls return `MnemosError::Shutdown`; closing twice is a no-op.
    pub async fn close(&self) -> MnemosResult<()> {
        if self.closed.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        self.stop_watching().await;
        drop(self.jobs.lock().unwrap_or_else(PoisonError::into_inner).take());
        let worker = self.worker.lock().await.take();
        if let Some(worker) = worker {
            worker.await.map_err(join_error)?;
        }
        info!("memory backend closed");
        Ok(())
    }
}
