//! Column encodings shared by all queries.
//!
//! Timestamps are stored as RFC 3339 UTC with millisecond precision so that
//! lexicographic order equals chronological order. Array-valued attributes
//! are stored as JSON text.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};

use mnemos_core::errors::{MnemosError, MnemosResult, StorageError};

/// Drop sub-millisecond precision so a value survives a store round trip
/// unchanged.
pub fn truncate_ms(ts: DateTime<Utc>) -> DateTime<Utc> {
    ts.trunc_subsecs(3)
}

pub fn fmt_ts(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn parse_ts(column: &str, raw: &str) -> MnemosResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| corrupt(column, format!("{raw:?}: {e}")))
}

pub fn encode_ids(ids: &[String]) -> MnemosResult<String> {
    Ok(serde_json::to_string(ids)?)
}

pub fn decode_ids(column: &str, raw: &str) -> MnemosResult<Vec<String>> {
    serde_json::from_str(raw).map_err(|e| corrupt(column, e.to_string()))
}

pub fn corrupt(column: &str, reason: impl Into<String>) -> MnemosError {
    MnemosError::StorageError(StorageError::CorruptBlob {
        column: column.to_string(),
        reason: reason.into(),
    })
}
