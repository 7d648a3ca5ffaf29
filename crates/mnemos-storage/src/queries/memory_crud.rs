//! Insert, get, update, delete for memories.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

use mnemos_core::errors::MnemosResult;
use mnemos_core::memory::{ImportanceLevel, Memory, MemoryType, MemoryUpdate, NewMemory};

use super::tag_ops;
use crate::codec::{corrupt, decode_ids, encode_ids, fmt_ts, parse_ts, truncate_ms};
use crate::to_storage_err;

/// SELECT list shared by every memory query (15 columns, indices 0-14).
pub const MEMORY_COLUMNS: &str = "id, content, summary, source_path, memory_type, importance_level,
     importance_score, base_importance, compression_level, compressed_from,
     content_hash, created_at, updated_at, accessed_at, access_count";

/// Same list qualified with the `m.` alias, for joins.
pub const MEMORY_COLUMNS_M: &str = "m.id, m.content, m.summary, m.source_path, m.memory_type,
     m.importance_level, m.importance_score, m.base_importance, m.compression_level,
     m.compressed_from, m.content_hash, m.created_at, m.updated_at, m.accessed_at,
     m.access_count";

/// Raw column values, decoded outside the rusqlite closure so that decode
/// failures surface as integrity errors rather than SQLite errors.
struct RawRow {
    id: String,
    content: String,
    summary: Option<String>,
    source_path: String,
    memory_type: String,
    importance_score: f64,
    base_importance: f64,
    compression_level: i64,
    compressed_from: String,
    content_hash: String,
    created_at: String,
    updated_at: String,
    accessed_at: Option<String>,
    access_count: i64,
}

fn read_raw(row: &Row<'_>) -> rusqlite::Result<RawRow> {
    Ok(RawRow {
        id: row.get(0)?,
        content: row.get(1)?,
        summary: row.get(2)?,
        source_path: row.get(3)?,
        memory_type: row.get(4)?,
        importance_score: row.get(6)?,
        base_importance: row.get(7)?,
        compression_level: row.get(8)?,
        compressed_from: row.get(9)?,
        content_hash: row.get(10)?,
        created_at: row.get(11)?,
        updated_at: row.get(12)?,
        accessed_at: row.get(13)?,
        access_count: row.get(14)?,
    })
}

fn decode(raw: RawRow) -> MnemosResult<Memory> {
    let memory_type: MemoryType = raw
        .memory_type
        .parse()
        .map_err(|_| corrupt("memory_type", raw.memory_type.clone()))?;
    let compression_level = u8::try_from(raw.compression_level)
        .map_err(|_| corrupt("compression_level", raw.compression_level.to_string()))?;
    let accessed_at = match raw.accessed_at.as_deref() {
        Some(ts) => Some(parse_ts("accessed_at", ts)?),
        None => None,
    };
    Ok(Memory {
        compressed_from: decode_ids("compressed_from", &raw.compressed_from)?,
        created_at: parse_ts("created_at", &raw.created_at)?,
        updated_at: parse_ts("updated_at", &raw.updated_at)?,
        importance_level: ImportanceLevel::from_score(raw.importance_score),
        id: raw.id,
        content: raw.content,
        summary: raw.summary,
        source_path: raw.source_path,
        memory_type,
        importance_score: raw.importance_score,
        base_importance: raw.base_importance,
        compression_level,
        tags: Vec::new(),
        content_hash: raw.content_hash,
        accessed_at,
        access_count: raw.access_count.max(0) as u64,
    })
}

/// Run a prepared memory query and decode every row, loading tags.
pub fn collect_memories(
    conn: &Connection,
    sql: &str,
    params: &[&dyn rusqlite::types::ToSql],
) -> MnemosResult<Vec<Memory>> {
    let mut stmt = conn.prepare(sql).map_err(|e| to_storage_err(e.to_string()))?;
    let raws = stmt
        .query_map(params, read_raw)
        .map_err(|e| to_storage_err(e.to_string()))?
        .collect::<rusqlite::Result<Vec<_>>>()
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut out = Vec::with_capacity(raws.len());
    for raw in raws {
        let mut memory = decode(raw)?;
        memory.tags = tag_ops::tags_for(conn, &memory.id)?;
        out.push(memory);
    }
    Ok(out)
}

/// Insert a new record with a fresh id. Memory row and tag links commit
/// together.
pub fn insert_memory(
    conn: &Connection,
    new: &NewMemory,
    now: DateTime<Utc>,
) -> MnemosResult<Memory> {
    new.validate()?;
    let now = truncate_ms(now);
    let importance = new.resolved_importance();
    let memory = Memory {
        id: Uuid::new_v4().to_string(),
        content: new.content.clone(),
        summary: new.summary.clone(),
        source_path: new.source_path.clone(),
        memory_type: new.memory_type,
        importance_level: ImportanceLevel::from_score(importance),
        importance_score: importance,
        base_importance: importance,
        compression_level: new.compression_level,
        compressed_from: new.compressed_from.clone(),
        tags: mnemos_core::memory::normalize_tags(&new.tags),
        content_hash: Memory::compute_content_hash(&new.content),
        created_at: new.created_at.map(truncate_ms).unwrap_or(now),
        updated_at: now,
        accessed_at: None,
        access_count: 0,
    };

    let tx = conn
        .unchecked_transaction()
        .map_err(|e| to_storage_err(format!("insert_memory begin: {e}")))?;
    match insert_row(&tx, &memory).and_then(|()| tag_ops::link_tags(&tx, &memory.id, &memory.tags))
    {
        Ok(()) => {
            tx.commit()
                .map_err(|e| to_storage_err(format!("insert_memory commit: {e}")))?;
            Ok(memory)
        }
        Err(e) => {
            let _ = tx.rollback();
            Err(e)
        }
    }
}

fn insert_row(conn: &Connection, memory: &Memory) -> MnemosResult<()> {
    conn.execute(
        "INSERT INTO memories (
            id, content, summary, source_path, memory_type, importance_level,
            importance_score, base_importance, compression_level, compressed_from,
            content_hash, created_at, updated_at, accessed_at, access_count
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
        params![
            memory.id,
            memory.content,
            memory.summary,
            memory.source_path,
            memory.memory_type.as_str(),
            memory.importance_level.as_str(),
            memory.importance_score,
            memory.base_importance,
            memory.compression_level,
            encode_ids(&memory.compressed_from)?,
            memory.content_hash,
            fmt_ts(memory.created_at),
            fmt_ts(memory.updated_at),
            memory.accessed_at.map(fmt_ts),
            memory.access_count as i64,
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Get a single memory by id, with tags.
pub fn get_memory(conn: &Connection, id: &str) -> MnemosResult<Option<Memory>> {
    let raw = conn
        .query_row(
            &format!("SELECT {MEMORY_COLUMNS} FROM memories WHERE id = ?1"),
            params![id],
            read_raw,
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    match raw {
        Some(raw) => {
            let mut memory = decode(raw)?;
            memory.tags = tag_ops::tags_for(conn, &memory.id)?;
            Ok(Some(memory))
        }
        None => Ok(None),
    }
}

/// Apply a partial update. Returns the stored record after the change, or
/// `None` if the id is unknown. An empty update leaves `updated_at` alone.
pub fn update_memory(
    conn: &Connection,
    id: &str,
    update: &MemoryUpdate,
    now: DateTime<Utc>,
) -> MnemosResult<Option<Memory>> {
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| to_storage_err(format!("update_memory begin: {e}")))?;
    match update_inner(&tx, id, update, now) {
        Ok(Some(())) => {
            tx.commit()
                .map_err(|e| to_storage_err(format!("update_memory commit: {e}")))?;
            get_memory(conn, id)
        }
        Ok(None) => {
            let _ = tx.rollback();
            Ok(None)
        }
        Err(e) => {
            let _ = tx.rollback();
            Err(e)
        }
    }
}

fn update_inner(
    conn: &Connection,
    id: &str,
    update: &MemoryUpdate,
    now: DateTime<Utc>,
) -> MnemosResult<Option<()>> {
    let Some(mut memory) = get_memory(conn, id)? else {
        return Ok(None);
    };
    if update.is_empty() {
        return Ok(Some(()));
    }
    update.apply_to(&mut memory)?;
    memory.updated_at = truncate_ms(now);

    conn.execute(
        "UPDATE memories SET
            content = ?2, summary = ?3, source_path = ?4, memory_type = ?5,
            importance_level = ?6, importance_score = ?7, base_importance = ?8,
            compression_level = ?9, content_hash = ?10, updated_at = ?11
         WHERE id = ?1",
        params![
            memory.id,
            memory.content,
            memory.summary,
            memory.source_path,
            memory.memory_type.as_str(),
            memory.importance_level.as_str(),
            memory.importance_score,
            memory.base_importance,
            memory.compression_level,
            memory.content_hash,
            fmt_ts(memory.updated_at),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    if update.tags.is_some() {
        tag_ops::replace_tags(conn, &memory.id, &memory.tags)?;
    }
    Ok(Some(()))
}

/// Delete a memory. Tag links go first so the catalogue counts drop through
/// their trigger; access log rows and relation edges cascade.
pub fn delete_memory(conn: &Connection, id: &str) -> MnemosResult<bool> {
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| to_storage_err(format!("delete_memory begin: {e}")))?;
    match delete_rows(&tx, id) {
        Ok(removed) => {
            tx.commit()
                .map_err(|e| to_storage_err(format!("delete_memory commit: {e}")))?;
            Ok(removed)
        }
        Err(e) => {
            let _ = tx.rollback();
            Err(e)
        }
    }
}

pub(crate) fn delete_rows(conn: &Connection, id: &str) -> MnemosResult<bool> {
    conn.execute("DELETE FROM memory_tags WHERE memory_id = ?1", params![id])
        .map_err(|e| to_storage_err(e.to_string()))?;
    let removed = conn
        .execute("DELETE FROM memories WHERE id = ?1", params![id])
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(removed > 0)
}

/// Overwrite the derived score and level only.
pub fn set_importance(conn: &Connection, id: &str, score: f64) -> MnemosResult<bool> {
    let score = mnemos_core::memory::clamp01(score);
    let changed = conn
        .execute(
            "UPDATE memories SET importance_score = ?2, importance_level = ?3 WHERE id = ?1",
            params![id, score, ImportanceLevel::from_score(score).as_str()],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(changed > 0)
}

/// Raise the compression level only; `updated_at` keeps tracking content
/// edits.
pub fn set_compression_level(conn: &Connection, id: &str, level: u8) -> MnemosResult<bool> {
    let changed = conn
        .execute(
            "UPDATE memories SET compression_level = ?2 WHERE id = ?1 AND compression_level < ?2",
            params![id, level],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(changed > 0)
}
