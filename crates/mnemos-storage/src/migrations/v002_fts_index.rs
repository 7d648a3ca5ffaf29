//! v002: FTS5 external-content index over content/summary/source_path,
//! kept in sync by triggers on `memories`.
//!
//! If the SQLite build has no FTS5 module the index is skipped and the
//! store falls back to substring matching.

use rusqlite::Connection;
use tracing::warn;

use mnemos_core::errors::MnemosResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> MnemosResult<()> {
    if let Err(e) = conn.execute_batch(
        "CREATE VIRTUAL TABLE IF NOT EXISTS memory_fts USING fts5(
            content, summary, source_path,
            content = 'memories', content_rowid = 'seq'
        );",
    ) {
        warn!(error = %e, "FTS5 unavailable, falling back to substring search");
        return Ok(());
    }
    create_triggers(conn)
}

/// Sync triggers from `memories` into `memory_fts`, then a full rebuild.
pub(crate) fn create_triggers(conn: &Connection) -> MnemosResult<()> {
    conn.execute_batch(
        "
        CREATE TRIGGER IF NOT EXISTS memories_fts_ai AFTER INSERT ON memories BEGIN
            INSERT INTO memory_fts (rowid, content, summary, source_path)
            VALUES (NEW.seq, NEW.content, coalesce(NEW.summary, ''), NEW.source_path);
        END;

        CREATE TRIGGER IF NOT EXISTS memories_fts_ad AFTER DELETE ON memories BEGIN
            INSERT INTO memory_fts (memory_fts, rowid, content, summary, source_path)
            VALUES ('delete', OLD.seq, OLD.content, coalesce(OLD.summary, ''), OLD.source_path);
        END;

        CREATE TRIGGER IF NOT EXISTS memories_fts_au
        AFTER UPDATE OF content, summary, source_path ON memories BEGIN
            INSERT INTO memory_fts (memory_fts, rowid, content, summary, source_path)
            VALUES ('delete', OLD.seq, OLD.content, coalesce(OLD.summary, ''), OLD.source_path);
            INSERT INTO memory_fts (rowid, content, summary, source_path)
            VALUES (NEW.seq, NEW.content, coalesce(NEW.summary, ''), NEW.source_path);
        END;

        INSERT INTO memory_fts (memory_fts) VALUES ('rebuild');
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
