//! Integrity checks.

use rusqlite::{params, Connection};

use mnemos_core::errors::MnemosResult;
use mnemos_core::models::IntegrityReport;

use crate::to_storage_err;

fn count(conn: &Connection, sql: &str) -> MnemosResult<usize> {
    conn.query_row(sql, params![], |row| row.get::<_, i64>(0))
        .map(|n| n.max(0) as usize)
        .map_err(|e| to_storage_err(e.to_string()))
}

/// Orphan and catalogue-drift counts plus SQLite integrity check.
pub fn integrity_report(conn: &Connection) -> MnemosResult<IntegrityReport> {
    let quick: String = conn
        .query_row("PRAGMA integrity_check", params![], |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;

    Ok(IntegrityReport {
        orphaned_tag_links: count(
            conn,
            "SELECT COUNT(*) FROM memory_tags t
             WHERE NOT EXISTS (SELECT 1 FROM memories m WHERE m.id = t.memory_id)",
        )?,
        orphaned_access_entries: count(
            conn,
            "SELECT COUNT(*) FROM access_log a
             WHERE NOT EXISTS (SELECT 1 FROM memories m WHERE m.id = a.memory_id)",
        )?,
        orphaned_relations: count(
            conn,
            "SELECT COUNT(*) FROM relations r
             WHERE NOT EXISTS (SELECT 1 FROM memories m WHERE m.id = r.source_id)
                OR NOT EXISTS (SELECT 1 FROM memories m WHERE m.id = r.target_id)",
        )?,
        tag_count_drift: count(
            conn,
            "SELECT COUNT(*) FROM (
                SELECT name FROM tags
                WHERE count != (SELECT COUNT(*) FROM memory_tags t WHERE t.tag = tags.name)
                UNION ALL
                SELECT DISTINCT t.tag FROM memory_tags t
                WHERE NOT EXISTS (SELECT 1 FROM tags WHERE tags.name = t.tag)
             )",
        )?,
        sqlite_ok: quick == "ok",
    })
}
