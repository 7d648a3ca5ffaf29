//! Filtered search: text (trigram FTS5 or substring), tags, type, importance,
//! creation window, ordering.

use rusqlite::types::ToSql;
use rusqlite::Connection;

use mnemos_core::errors::MnemosResult;
use mnemos_core::memory::{normalize_tags, Memory};
use mnemos_core::models::{SearchFilter, SearchOrder};

use super::memory_crud::{collect_memories, MEMORY_COLUMNS_M};
use crate::codec::fmt_ts;

/// Shortest token the trigram index can answer; shorter ones go through
/// `LIKE`.
const MIN_FTS_TOKEN_CHARS: usize = 3;

/// Build an FTS5 MATCH expression over the trigram index: every token of at
/// least three characters becomes a quoted substring term, OR-ed together.
/// Returns `None` if no token qualifies.
pub fn fts_query(tokens: &[&str]) -> Option<String> {
    let terms: Vec<String> = tokens
        .iter()
        .filter(|t| t.chars().count() >= MIN_FTS_TOKEN_CHARS)
        .map(|t| format!("\"{}\"", t.replace('"', "\"\"")))
        .collect();
    if terms.is_empty() {
        None
    } else {
        Some(terms.join(" OR "))
    }
}

fn like_pattern(token: &str) -> String {
    let escaped = token
        .to_lowercase()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

pub fn search(
    conn: &Connection,
    filter: &SearchFilter,
    fts_enabled: bool,
    default_limit: usize,
) -> MnemosResult<Vec<Memory>> {
    let mut clauses: Vec<String> = Vec::new();
    let mut params: Vec<Box<dyn ToSql>> = Vec::new();

    let tokens = filter.tokens();
    if !tokens.is_empty() {
        let mut any = Vec::with_capacity(tokens.len());
        let fts_expr = if fts_enabled { fts_query(&tokens) } else { None };
        let like_tokens: Vec<&str> = match fts_expr {
            Some(expr) => {
                params.push(Box::new(expr));
                any.push(format!(
                    "m.seq IN (SELECT rowid FROM memory_fts WHERE memory_fts MATCH ?{})",
                    params.len()
                ));
                tokens
                    .iter()
                    .copied()
                    .filter(|t| t.chars().count() < MIN_FTS_TOKEN_CHARS)
                    .collect()
            }
            None => tokens,
        };
        for token in like_tokens {
            params.push(Box::new(like_pattern(token)));
            let idx = params.len();
            any.push(format!(
                "(lower(m.content) LIKE ?{idx} ESCAPE '\\'
                  OR lower(coalesce(m.summary, '')) LIKE ?{idx} ESCAPE '\\'
                  OR lower(m.source_path) LIKE ?{idx} ESCAPE '\\')"
            ));
        }
        clauses.push(format!("({})", any.join(" OR ")));
    }

    for tag in normalize_tags(&filter.tags) {
        params.push(Box::new(tag));
        clauses.push(format!(
            "EXISTS (SELECT 1 FROM memory_tags t WHERE t.memory_id = m.id AND t.tag = ?{})",
            params.len()
        ));
    }

    if let Some(memory_type) = filter.memory_type {
        params.push(Box::new(memory_type.as_str().to_string()));
        clauses.push(format!("m.memory_type = ?{}", params.len()));
    }
    if let Some(min) = filter.min_importance {
        params.push(Box::new(min));
        clauses.push(format!("m.importance_score >= ?{}", params.len()));
    }
    if let Some(after) = filter.created_after {
        params.push(Box::new(fmt_ts(after)));
        clauses.push(format!("m.created_at >= ?{}", params.len()));
    }
    if let Some(before) = filter.created_before {
        params.push(Box::new(fmt_ts(before)));
        clauses.push(format!("m.created_at < ?{}", params.len()));
    }

    let where_sql = if clauses.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", clauses.join(" AND "))
    };
    let order_sql = match filter.order {
        SearchOrder::Importance => "m.importance_score DESC, m.seq ASC",
        SearchOrder::Recency => "m.created_at DESC, m.seq DESC",
        SearchOrder::Relevance => "m.importance_score DESC, m.created_at DESC, m.seq DESC",
    };
    let limit = filter.limit.unwrap_or(default_limit);
    params.push(Box::new(limit as i64));

    let sql = format!(
        "SELECT {MEMORY_COLUMNS_M} FROM memories m {where_sql} ORDER BY {order_sql} LIMIT ?{}",
        params.len()
    );
    let refs: Vec<&dyn ToSql> = params.iter().map(|p| p.as_ref()).collect();
    collect_memories(conn, &sql, &refs)
}
