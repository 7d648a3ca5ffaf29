//! PRAGMA configuration applied to every SQLite connection.
//!
//! Writer: WAL, NORMAL sync, foreign keys ON (cascades depend on it),
//! 5s busy timeout. Readers: query-only with the same busy timeout.

use rusqlite::Connection;

use mnemos_core::errors::MnemosResult;

use crate::to_storage_err;

/// Apply write-connection pragmas.
pub fn apply_pragmas(conn: &Connection) -> MnemosResult<()> {
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA cache_size = -16000;
        PRAGMA busy_timeout = 5000;
        PRAGMA foreign_keys = ON;
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Apply read-connection pragmas.
pub fn apply_read_pragmas(conn: &Connection) -> MnemosResult<()> {
    conn.execute_batch(
        "
        PRAGMA busy_timeout = 5000;
        PRAGMA cache_size = -8000;
        PRAGMA query_only = ON;
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Whether foreign-key enforcement is active on a connection.
pub fn foreign_keys_enabled(conn: &Connection) -> MnemosResult<bool> {
    let on: i64 = conn
        .pragma_query_value(None, "foreign_keys", |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(on == 1)
}
