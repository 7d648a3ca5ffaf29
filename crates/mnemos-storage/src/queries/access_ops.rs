//! Access tracking: counter bump plus an append-only log row.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use mnemos_core::errors::MnemosResult;
use mnemos_core::memory::{AccessAction, AccessLogEntry};

use crate::codec::{corrupt, fmt_ts, parse_ts};
use crate::to_storage_err;

/// Record one access. Returns `false` (and logs nothing) if the memory is gone.
pub fn record_access(
    conn: &Connection,
    memory_id: &str,
    action: AccessAction,
    query: Option<&str>,
    now: DateTime<Utc>,
) -> MnemosResult<bool> {
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| to_storage_err(format!("record_access begin: {e}")))?;
    let ts = fmt_ts(now);
    let result = (|| -> MnemosResult<bool> {
        let touched = tx
            .execute(
                "UPDATE memories SET accessed_at = ?2, access_count = access_count + 1 WHERE id = ?1",
                params![memory_id, ts],
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
        if touched == 0 {
            return Ok(false);
        }
        tx.execute(
            "INSERT INTO access_log (memory_id, timestamp, action, query) VALUES (?1, ?2, ?3, ?4)",
            params![memory_id, ts, action.as_str(), query],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
        Ok(true)
    })();
    match result {
        Ok(found) => {
            tx.commit()
                .map_err(|e| to_storage_err(format!("record_access commit: {e}")))?;
            Ok(found)
        }
        Err(e) => {
            let _ = tx.rollback();
            Err(e)
        }
    }
}

/// Log entries for one memory, oldest first.
pub fn access_log(conn: &Connection, memory_id: &str) -> MnemosResult<Vec<AccessLogEntry>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, memory_id, timestamp, action, query FROM access_log
             WHERE memory_id = ?1 ORDER BY id ASC",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![memory_id], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, Option<String>>(4)?,
            ))
        })
        .map_err(|e| to_storage_err(e.to_string()))?
        .collect::<rusqlite::Result<Vec<_>>>()
        .map_err(|e| to_storage_err(e.to_string()))?;

    rows.into_iter()
        .map(|(id, memory_id, timestamp, action, query)| {
            Ok(AccessLogEntry {
                id,
                memory_id,
                timestamp: parse_ts("access_log.timestamp", &timestamp)?,
                action: AccessAction::parse(&action)
                    .ok_or_else(|| corrupt("access_log.action", action.clone()))?,
                query,
            })
        })
        .collect()
}
