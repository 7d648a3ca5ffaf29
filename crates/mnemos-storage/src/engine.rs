//! StorageEngine: owns the connection pool, runs migrations at startup and
//! implements `IMemoryStore`.

use std::collections::HashSet;
use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use mnemos_core::config::{defaults, StorageConfig};
use mnemos_core::errors::MnemosResult;
use mnemos_core::memory::{
    AccessAction, AccessLogEntry, Memory, MemoryUpdate, NewMemory, Relation, RelationType, Tag,
};
use mnemos_core::models::{CompactionCursor, IntegrityReport, SearchFilter, StoreStats};
use mnemos_core::traits::IMemoryStore;

use crate::migrations;
use crate::pool::ConnectionPool;
use crate::queries::{
    access_ops, aggregation, compaction_ops, maintenance, memory_crud, memory_search,
    relationship_ops, tag_ops,
};

pub struct StorageEngine {
    pool: ConnectionPool,
    fts_enabled: bool,
    default_page_size: usize,
}

impl StorageEngine {
    /// Open a file-backed store with default pool and page sizes.
    pub fn open(path: &Path) -> MnemosResult<Self> {
        Self::open_with(path, defaults::DEFAULT_READ_POOL_SIZE, defaults::DEFAULT_PAGE_SIZE)
    }

    /// Open a private in-memory store. All reads go through the writer.
    pub fn open_in_memory() -> MnemosResult<Self> {
        let pool = ConnectionPool::open_in_memory()?;
        Self::initialize(pool, 0, defaults::DEFAULT_PAGE_SIZE)
    }

    pub fn from_config(config: &StorageConfig) -> MnemosResult<Self> {
        if config.is_in_memory() {
            let pool = ConnectionPool::open_in_memory()?;
            Self::initialize(pool, 0, config.default_page_size)
        } else {
            Self::open_with(
                Path::new(&config.db_path),
                config.read_pool_size,
                config.default_page_size,
            )
        }
    }

    fn open_with(path: &Path, read_pool_size: usize, page_size: usize) -> MnemosResult<Self> {
        let pool = ConnectionPool::open(path)?;
        Self::initialize(pool, read_pool_size, page_size)
    }

    fn initialize(
        mut pool: ConnectionPool,
        read_pool_size: usize,
        default_page_size: usize,
    ) -> MnemosResult<Self> {
        let (applied, fts_enabled) = pool.writer.with_conn_sync(|conn| {
            let applied = migrations::run_migrations(conn)?;
            Ok((applied, migrations::fts_available(conn)?))
        })?;
        pool.attach_readers(read_pool_size)?;
        info!(
            applied,
            fts_enabled,
            readers = pool.readers.as_ref().map_or(0, |r| r.size()),
            "storage engine ready"
        );
        Ok(Self {
            pool,
            fts_enabled,
            default_page_size,
        })
    }

    /// Whether text search runs on the FTS5 index.
    pub fn fts_enabled(&self) -> bool {
        self.fts_enabled
    }

    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    /// Read on the pool when file-backed, otherwise on the writer.
    fn with_reader<F, T>(&self, f: F) -> MnemosResult<T>
    where
        F: FnOnce(&rusqlite::Connection) -> MnemosResult<T>,
    {
        match &self.pool.readers {
            Some(readers) => readers.with_conn(f),
            None => self.pool.writer.with_conn_sync(f),
        }
    }
}

impl IMemoryStore for StorageEngine {
    fn create(&self, memory: &NewMemory) -> MnemosResult<Memory> {
        let created = self
            .pool
            .writer
            .with_conn_sync(|conn| memory_crud::insert_memory(conn, memory, Utc::now()))?;
        debug!(id = %created.id, path = %created.source_path, "memory created");
        Ok(created)
    }

    fn get(&self, id: &str) -> MnemosResult<Option<Memory>> {
        self.with_reader(|conn| memory_crud::get_memory(conn, id))
    }

    fn update(&self, id: &str, update: &MemoryUpdate) -> MnemosResult<Option<Memory>> {
        self.pool
            .writer
            .with_conn_sync(|conn| memory_crud::update_memory(conn, id, update, Utc::now()))
    }

    fn delete(&self, id: &str) -> MnemosResult<bool> {
        let removed = self
            .pool
            .writer
            .with_conn_sync(|conn| memory_crud::delete_memory(conn, id))?;
        if removed {
            debug!(id, "memory deleted");
        }
        Ok(removed)
    }

    fn absorb(&self, id: &str, summary_id: &str) -> MnemosResult<bool> {
        let absorbed = self
            .pool
            .writer
            .with_conn_sync(|conn| compaction_ops::absorb(conn, id, summary_id, Utc::now()))?;
        if absorbed {
            debug!(id, summary_id, "memory absorbed into summary");
        }
        Ok(absorbed)
    }

    fn absorbed_hashes(&self, source_path: &str) -> MnemosResult<HashSet<String>> {
        self.with_reader(|conn| compaction_ops::absorbed_hashes(conn, source_path))
    }

    fn record_access(
        &self,
        id: &str,
        action: AccessAction,
        query: Option<&str>,
    ) -> MnemosResult<bool> {
        self.pool
            .writer
            .with_conn_sync(|conn| access_ops::record_access(conn, id, action, query, Utc::now()))
    }

    fn access_log(&self, id: &str) -> MnemosResult<Vec<AccessLogEntry>> {
        self.with_reader(|conn| access_ops::access_log(conn, id))
    }

    fn search(&self, filter: &SearchFilter) -> MnemosResult<Vec<Memory>> {
        self.with_reader(|conn| {
            memory_search::search(conn, filter, self.fts_enabled, self.default_page_size)
        })
    }

    fn list_for_compaction(
        &self,
        older_than: DateTime<Utc>,
        max_level: u8,
        after: Option<&CompactionCursor>,
        limit: usize,
    ) -> MnemosResult<Vec<Memory>> {
        self.with_reader(|conn| {
            compaction_ops::list_for_compaction(conn, older_than, max_level, after, limit)
        })
    }

    fn list_archive_candidates(
        &self,
        older_than: DateTime<Utc>,
        limit: usize,
    ) -> MnemosResult<Vec<Memory>> {
        self.with_reader(|conn| compaction_ops::list_archive_candidates(conn, older_than, limit))
    }

    fn list_by_source(&self, source_path: &str) -> MnemosResult<Vec<Memory>> {
        self.with_reader(|conn| compaction_ops::list_by_source(conn, source_path))
    }

    fn source_paths(&self) -> MnemosResult<Vec<String>> {
        self.with_reader(compaction_ops::source_paths)
    }

    fn list_all(&self) -> MnemosResult<Vec<Memory>> {
        self.with_reader(compaction_ops::list_all)
    }

    fn set_importance(&self, id: &str, score: f64) -> MnemosResult<bool> {
        self.pool
            .writer
            .with_conn_sync(|conn| memory_crud::set_importance(conn, id, score))
    }

    fn set_compression_level(&self, id: &str, level: u8) -> MnemosResult<bool> {
        self.pool
            .writer
            .with_conn_sync(|conn| memory_crud::set_compression_level(conn, id, level))
    }

    fn add_relation(&self, relation: &Relation) -> MnemosResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| relationship_ops::add_relation(conn, relation))
    }

    fn relations_for(&self, id: &str) -> MnemosResult<Vec<Relation>> {
        self.with_reader(|conn| relationship_ops::relations_for(conn, id))
    }

    fn remove_relation(
        &self,
        source_id: &str,
        target_id: &str,
        relation_type: RelationType,
    ) -> MnemosResult<bool> {
        self.pool.writer.with_conn_sync(|conn| {
            relationship_ops::remove_relation(conn, source_id, target_id, relation_type)
        })
    }

    fn top_tags(&self, limit: usize) -> MnemosResult<Vec<Tag>> {
        self.with_reader(|conn| tag_ops::top_tags(conn, limit))
    }

    fn stats(&self) -> MnemosResult<StoreStats> {
        self.with_reader(aggregation::stats)
    }

    fn integrity_report(&self) -> MnemosResult<IntegrityReport> {
        self.with_reader(maintenance::integrity_report)
    }
}
