//! v004: rebuild the FTS5 index with the trigram tokenizer so any
//! substring of three or more characters matches, not just word prefixes.
//!
//! SQLite builds without trigram support (before 3.34) or without FTS5 end
//! up with no index and the store uses substring matching.

use rusqlite::Connection;
use tracing::warn;

use mnemos_core::errors::MnemosResult;

use super::v002_fts_index;
use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> MnemosResult<()> {
    conn.execute_batch(
        "
        DROP TRIGGER IF EXISTS memories_fts_ai;
        DROP TRIGGER IF EXISTS memories_fts_ad;
        DROP TRIGGER IF EXISTS memories_fts_au;
        DROP TABLE IF EXISTS memory_fts;
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    if let Err(e) = conn.execute_batch(
        "CREATE VIRTUAL TABLE IF NOT EXISTS memory_fts USING fts5(
            content, summary, source_path,
            content = 'memories', content_rowid = 'seq',
            tokenize = 'trigram'
        );",
    ) {
        warn!(error = %e, "FTS5 trigram tokenizer unavailable, falling back to substring search");
        return Ok(());
    }
    v002_fts_index::create_triggers(conn)
}
