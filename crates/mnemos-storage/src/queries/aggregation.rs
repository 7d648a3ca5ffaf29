//! Store-wide counts.

use std::collections::BTreeMap;

use rusqlite::{params, Connection};

use mnemos_core::errors::MnemosResult;
use mnemos_core::models::StoreStats;

use crate::to_storage_err;

fn count(conn: &Connection, sql: &str) -> MnemosResult<usize> {
    conn.query_row(sql, params![], |row| row.get::<_, i64>(0))
        .map(|n| n.max(0) as usize)
        .map_err(|e| to_storage_err(e.to_string()))
}

pub fn stats(conn: &Connection) -> MnemosResult<StoreStats> {
    let mut by_type = BTreeMap::new();
    {
        let mut stmt = conn
            .prepare("SELECT memory_type, COUNT(*) FROM memories GROUP BY memory_type")
            .map_err(|e| to_storage_err(e.to_string()))?;
        let rows = stmt
            .query_map(params![], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
            })
            .map_err(|e| to_storage_err(e.to_string()))?;
        for row in rows {
            let (kind, n) = row.map_err(|e| to_storage_err(e.to_string()))?;
            by_type.insert(kind, n.max(0) as usize);
        }
    }

    let mut by_level = BTreeMap::new();
    {
        let mut stmt = conn
            .prepare("SELECT compression_level, COUNT(*) FROM memories GROUP BY compression_level")
            .map_err(|e| to_storage_err(e.to_string()))?;
        let rows = stmt
            .query_map(params![], |row| Ok((row.get::<_, u8>(0)?, row.get::<_, i64>(1)?)))
            .map_err(|e| to_storage_err(e.to_string()))?;
        for row in rows {
            let (level, n) = row.map_err(|e| to_storage_err(e.to_string()))?;
            by_level.insert(level, n.max(0) as usize);
        }
    }

    Ok(StoreStats {
        total: count(conn, "SELECT COUNT(*) FROM memories")?,
        by_type,
        by_level,
        tags: count(conn, "SELECT COUNT(*) FROM tags WHERE count > 0")?,
        access_log_entries: count(conn, "SELECT COUNT(*) FROM access_log")?,
        relations: count(conn, "SELECT COUNT(*) FROM relations")?,
    })
}
