//! Versioned schema migrations tracked with `PRAGMA user_version`.

pub mod v001_core_tables;
pub mod v002_fts_index;
pub mod v003_absorbed_sections;
pub mod v004_trigram_fts;

use rusqlite::Connection;
use tracing::info;

use mnemos_core::errors::{MnemosError, MnemosResult, StorageError};

use crate::to_storage_err;

type Migration = fn(&Connection) -> MnemosResult<()>;

const MIGRATIONS: &[(u32, Migration)] = &[
    (1, v001_core_tables::migrate),
    (2, v002_fts_index::migrate),
    (3, v003_absorbed_sections::migrate),
    (4, v004_trigram_fts::migrate),
];

/// Latest schema version.
pub const LATEST_VERSION: u32 = 4;

/// Current schema version of a database.
pub fn current_version(conn: &Connection) -> MnemosResult<u32> {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))
}

/// Apply every migration newer than the database's version, in order.
/// Returns the number applied.
pub fn run_migrations(conn: &Connection) -> MnemosResult<usize> {
    let current = current_version(conn)?;
    let mut applied = 0;
    for (version, migrate) in MIGRATIONS.iter().filter(|(v, _)| *v > current) {
        migrate(conn).map_err(|e| {
            MnemosError::StorageError(StorageError::MigrationFailed {
                version: *version,
                reason: e.to_string(),
            })
        })?;
        conn.pragma_update(None, "user_version", version)
            .map_err(|e| to_storage_err(e.to_string()))?;
        info!(version, "applied migration");
        applied += 1;
    }
    Ok(applied)
}

/// Whether the FTS5 index exists (it is skipped when the SQLite build lacks FTS5).
pub fn fts_available(conn: &Connection) -> MnemosResult<bool> {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'memory_fts'",
            [],
            |row| row.get(0),
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(count > 0)
}
