//! Candidate selection for the compaction pipeline and source listings for
//! reconciliation.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rusqlite::types::ToSql;
use rusqlite::{params, Connection};

use mnemos_core::errors::MnemosResult;
use mnemos_core::memory::{Memory, MemoryType};
use mnemos_core::models::CompactionCursor;

use super::memory_crud::{self, collect_memories, MEMORY_COLUMNS};
use crate::codec::fmt_ts;
use crate::to_storage_err;

/// Non-summary records created before `older_than` at or below
/// `max_level`, ordered by `(created_at, id)` and starting strictly after
/// `after`.
pub fn list_for_compaction(
    conn: &Connection,
    older_than: DateTime<Utc>,
    max_level: u8,
    after: Option<&CompactionCursor>,
    limit: usize,
) -> MnemosResult<Vec<Memory>> {
    let sql = format!(
        "SELECT {MEMORY_COLUMNS} FROM memories
         WHERE created_at < ?1 AND compression_level <= ?2
           AND memory_type NOT IN (?3, ?4)
           AND (?5 IS NULL OR created_at > ?5 OR (created_at = ?5 AND id > ?6))
         ORDER BY created_at ASC, id ASC
         LIMIT ?7"
    );
    let cutoff = fmt_ts(older_than);
    let after_ts = after.map(|c| fmt_ts(c.created_at));
    let after_id = after.map(|c| c.id.clone());
    let limit = limit as i64;
    let params: [&dyn ToSql; 7] = [
        &cutoff,
        &max_level,
        &MemoryType::Summary.as_str(),
        &MemoryType::Archive.as_str(),
        &after_ts,
        &after_id,
        &limit,
    ];
    collect_memories(conn, &sql, &params)
}

/// Record a tombstone for the record's `(source_path, content_hash)` and
/// delete it, in one transaction.
pub fn absorb(
    conn: &Connection,
    id: &str,
    summary_id: &str,
    now: DateTime<Utc>,
) -> MnemosResult<bool> {
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| to_storage_err(format!("absorb begin: {e}")))?;
    let result = (|| -> MnemosResult<bool> {
        let inserted = tx
            .execute(
                "INSERT OR REPLACE INTO absorbed_sections
                     (source_path, content_hash, summary_id, absorbed_at)
                 SELECT source_path, content_hash, ?2, ?3 FROM memories WHERE id = ?1",
                params![id, summary_id, fmt_ts(now)],
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
        if inserted == 0 {
            return Ok(false);
        }
        memory_crud::delete_rows(&tx, id)
    })();
    match result {
        Ok(removed) => {
            tx.commit()
                .map_err(|e| to_storage_err(format!("absorb commit: {e}")))?;
            Ok(removed)
        }
        Err(e) => {
            let _ = tx.rollback();
            Err(e)
        }
    }
}

pub fn absorbed_hashes(conn: &Connection, source_path: &str) -> MnemosResult<HashSet<String>> {
    let mut stmt = conn
        .prepare("SELECT content_hash FROM absorbed_sections WHERE source_path = ?1")
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![source_path], |row| row.get::<_, String>(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    rows.collect::<rusqlite::Result<HashSet<_>>>()
        .map_err(|e| to_storage_err(e.to_string()))
}

/// Level-2, non-archive records created before `older_than` and neither
/// accessed since nor ever.
pub fn list_archive_candidates(
    conn: &Connection,
    older_than: DateTime<Utc>,
    limit: usize,
) -> MnemosResult<Vec<Memory>> {
    let sql = format!(
        "SELECT {MEMORY_COLUMNS} FROM memories
         WHERE compression_level = 2 AND memory_type != ?1
           AND created_at < ?2
           AND (accessed_at IS NULL OR accessed_at < ?2)
         ORDER BY created_at ASC, seq ASC
         LIMIT ?3"
    );
    let cutoff = fmt_ts(older_than);
    let limit = limit as i64;
    let params: [&dyn ToSql; 3] = [&MemoryType::Archive.as_str(), &cutoff, &limit];
    collect_memories(conn, &sql, &params)
}

pub fn list_by_source(conn: &Connection, source_path: &str) -> MnemosResult<Vec<Memory>> {
    let sql = format!(
        "SELECT {MEMORY_COLUMNS} FROM memories WHERE source_path = ?1
         ORDER BY created_at ASC, seq ASC"
    );
    collect_memories(conn, &sql, &[&source_path])
}

pub fn source_paths(conn: &Connection) -> MnemosResult<Vec<String>> {
    let mut stmt = conn
        .prepare("SELECT DISTINCT source_path FROM memories ORDER BY source_path")
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![], |row| row.get::<_, String>(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    rows.collect::<rusqlite::Result<Vec<_>>>()
        .map_err(|e| to_storage_err(e.to_string()))
}

pub fn list_all(conn: &Connection) -> MnemosResult<Vec<Memory>> {
    let sql = format!("SELECT {MEMORY_COLUMNS} FROM memories ORDER BY seq ASC");
    collect_memories(conn, &sql, &[])
}
