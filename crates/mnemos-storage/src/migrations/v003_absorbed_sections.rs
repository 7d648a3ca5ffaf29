//! v003: tombstones for sections folded into monthly summaries, keyed by
//! logical path and content hash.

use rusqlite::Connection;

use mnemos_core::errors::MnemosResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> MnemosResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS absorbed_sections (
            source_path  TEXT NOT NULL,
            content_hash TEXT NOT NULL,
            summary_id   TEXT NOT NULL,
            absorbed_at  TEXT NOT NULL,
            PRIMARY KEY (source_path, content_hash)
        );
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))
}
