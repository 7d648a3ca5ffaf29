//! v001: memories, tag catalogue + links, access log, relations.

use rusqlite::Connection;

use mnemos_core::errors::MnemosResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> MnemosResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS memories (
            seq               INTEGER PRIMARY KEY AUTOINCREMENT,
            id                TEXT NOT NULL UNIQUE,
            content           TEXT NOT NULL CHECK (length(trim(content)) > 0),
            summary           TEXT,
            source_path       TEXT NOT NULL DEFAULT '',
            memory_type       TEXT NOT NULL,
            importance_level  TEXT NOT NULL,
            importance_score  REAL NOT NULL CHECK (importance_score BETWEEN 0.0 AND 1.0),
            base_importance   REAL NOT NULL CHECK (base_importance BETWEEN 0.0 AND 1.0),
            compression_level INTEGER NOT NULL DEFAULT 0 CHECK (compression_level BETWEEN 0 AND 2),
            compressed_from   TEXT NOT NULL DEFAULT '[]',
            content_hash      TEXT NOT NULL,
            created_at        TEXT NOT NULL,
            updated_at        TEXT NOT NULL,
            accessed_at       TEXT,
            access_count      INTEGER NOT NULL DEFAULT 0
        );

        CREATE INDEX IF NOT EXISTS idx_memories_source ON memories(source_path);
        CREATE INDEX IF NOT EXISTS idx_memories_compaction ON memories(compression_level, created_at);
        CREATE INDEX IF NOT EXISTS idx_memories_importance ON memories(importance_score);
        CREATE INDEX IF NOT EXISTS idx_memories_created ON memories(created_at);
        CREATE INDEX IF NOT EXISTS idx_memories_type ON memories(memory_type);

        CREATE TABLE IF NOT EXISTS tags (
            name  TEXT PRIMARY KEY,
            count INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS memory_tags (
            memory_id TEXT NOT NULL REFERENCES memories(id) ON DELETE CASCADE,
            tag       TEXT NOT NULL,
            PRIMARY KEY (memory_id, tag)
        );

        CREATE INDEX IF NOT EXISTS idx_memory_tags_tag ON memory_tags(tag);

        CREATE TRIGGER IF NOT EXISTS memory_tags_ai AFTER INSERT ON memory_tags BEGIN
            INSERT OR IGNORE INTO tags (name, count) VALUES (NEW.tag, 0);
            UPDATE tags SET count = count + 1 WHERE name = NEW.tag;
        END;

        CREATE TRIGGER IF NOT EXISTS memory_tags_ad AFTER DELETE ON memory_tags BEGIN
            UPDATE tags SET count = count - 1 WHERE name = OLD.tag;
            DELETE FROM tags WHERE name = OLD.tag AND count <= 0;
        END;

        CREATE TABLE IF NOT EXISTS access_log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            memory_id TEXT NOT NULL REFERENCES memories(id) ON DELETE CASCADE,
            timestamp TEXT NOT NULL,
            action    TEXT NOT NULL,
            query     TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_access_memory ON access_log(memory_id);

        CREATE TRIGGER IF NOT EXISTS access_log_append_only BEFORE UPDATE ON access_log BEGIN
            SELECT RAISE(ABORT, 'access_log is append-only');
        END;

        CREATE TABLE IF NOT EXISTS relations (
            source_id     TEXT NOT NULL REFERENCES memories(id) ON DELETE CASCADE,
            target_id     TEXT NOT NULL REFERENCES memories(id) ON DELETE CASCADE,
            relation_type TEXT NOT NULL,
            created_at    TEXT NOT NULL,
            PRIMARY KEY (source_id, target_id, relation_type)
        );

        CREATE INDEX IF NOT EXISTS idx_relations_target ON relations(target_id);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
