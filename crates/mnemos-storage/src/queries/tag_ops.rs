//! Memory↔tag links. Catalogue counts are maintained by the link triggers.

use rusqlite::{params, Connection};

use mnemos_core::errors::MnemosResult;
use mnemos_core::memory::Tag;

use crate::to_storage_err;

pub fn link_tags(conn: &Connection, memory_id: &str, tags: &[String]) -> MnemosResult<()> {
    for tag in tags {
        conn.execute(
            "INSERT OR IGNORE INTO memory_tags (memory_id, tag) VALUES (?1, ?2)",
            params![memory_id, tag],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    }
    Ok(())
}

/// Replace the full tag set of a memory.
pub fn replace_tags(conn: &Connection, memory_id: &str, tags: &[String]) -> MnemosResult<()> {
    conn.execute(
        "DELETE FROM memory_tags WHERE memory_id = ?1",
        params![memory_id],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    link_tags(conn, memory_id, tags)
}

/// Tags of one memory, sorted.
pub fn tags_for(conn: &Connection, memory_id: &str) -> MnemosResult<Vec<String>> {
    let mut stmt = conn
        .prepare_cached("SELECT tag FROM memory_tags WHERE memory_id = ?1 ORDER BY tag")
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![memory_id], |row| row.get::<_, String>(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    rows.collect::<rusqlite::Result<Vec<_>>>()
        .map_err(|e| to_storage_err(e.to_string()))
}

/// Most-used tags, highest count first, name as tie-break.
pub fn top_tags(conn: &Connection, limit: usize) -> MnemosResult<Vec<Tag>> {
    let mut stmt = conn
        .prepare("SELECT name, count FROM tags WHERE count > 0 ORDER BY count DESC, name ASC LIMIT ?1")
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![limit as i64], |row| {
            Ok(Tag {
                name: row.get(0)?,
                count: row.get::<_, i64>(1)?.max(0) as u64,
            })
        })
        .map_err(|e| to_storage_err(e.to_string()))?;
    rows.collect::<rusqlite::Result<Vec<_>>>()
        .map_err(|e| to_storage_err(e.to_string()))
}
