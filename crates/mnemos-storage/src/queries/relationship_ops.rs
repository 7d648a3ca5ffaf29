//! Directed relation edges between memories.

use rusqlite::{params, Connection};

use mnemos_core::errors::{MnemosError, MnemosResult};
use mnemos_core::memory::{Relation, RelationType};

use crate::codec::{corrupt, fmt_ts, parse_ts};
use crate::to_storage_err;

/// Insert an edge. Re-adding an existing edge is a no-op; an unknown
/// endpoint is rejected.
pub fn add_relation(conn: &Connection, relation: &Relation) -> MnemosResult<()> {
    if relation.source_id == relation.target_id {
        return Err(MnemosError::InvalidMemory {
            reason: format!("self-relation on {}", relation.source_id),
        });
    }
    conn.execute(
        "INSERT OR IGNORE INTO relations (source_id, target_id, relation_type, created_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            relation.source_id,
            relation.target_id,
            relation.relation_type.as_str(),
            fmt_ts(relation.created_at),
        ],
    )
    .map_err(|e| to_storage_err(format!("add_relation: {e}")))?;
    Ok(())
}

/// Edges where `id` is either endpoint, oldest first.
pub fn relations_for(conn: &Connection, id: &str) -> MnemosResult<Vec<Relation>> {
    let mut stmt = conn
        .prepare(
            "SELECT source_id, target_id, relation_type, created_at FROM relations
             WHERE source_id = ?1 OR target_id = ?1
             ORDER BY created_at ASC, source_id ASC, target_id ASC",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
            ))
        })
        .map_err(|e| to_storage_err(e.to_string()))?
        .collect::<rusqlite::Result<Vec<_>>>()
        .map_err(|e| to_storage_err(e.to_string()))?;

    rows.into_iter()
        .map(|(source_id, target_id, kind, created_at)| {
            Ok(Relation {
                source_id,
                target_id,
                relation_type: RelationType::parse(&kind)
                    .ok_or_else(|| corrupt("relations.relation_type", kind.clone()))?,
                created_at: parse_ts("relations.created_at", &created_at)?,
            })
        })
        .collect()
}

pub fn remove_relation(
    conn: &Connection,
    source_id: &str,
    target_id: &str,
    relation_type: RelationType,
) -> MnemosResult<bool> {
    let removed = conn
        .execute(
            "DELETE FROM relations WHERE source_id = ?1 AND target_id = ?2 AND relation_type = ?3",
            params![source_id, target_id, relation_type.as_str()],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(removed > 0)
}
