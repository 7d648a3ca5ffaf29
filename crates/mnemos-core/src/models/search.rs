use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::memory::{Memory, MemoryType};

/// Ordering applied to store search results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchOrder {
    /// Importance score, highest first.
    Importance,
    /// Creation time, newest first.
    Recency,
    /// Importance first, recency as tie-break.
    #[default]
    Relevance,
}

/// Store-level search filter. Every field is optional; an empty filter
/// returns the most relevant records up to the default page size.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchFilter {
    /// Free text; a record matches if any whitespace token occurs as a
    /// case-insensitive substring of its content, summary or path.
    pub text: Option<String>,
    /// Records must carry every listed tag.
    pub tags: Vec<String>,
    pub memory_type: Option<MemoryType>,
    /// Minimum `importance_score`.
    pub min_importance: Option<f64>,
    /// Inclusive lower bound on `created_at`.
    pub created_after: Option<DateTime<Utc>>,
    /// Exclusive upper bound on `created_at`.
    pub created_before: Option<DateTime<Utc>>,
    pub order: SearchOrder,
    /// Falls back to the configured default page size.
    pub limit: Option<usize>,
}

impl SearchFilter {
    pub fn text(query: impl Into<String>) -> Self {
        Self {
            text: Some(query.into()),
            ..Self::default()
        }
    }

    /// Whitespace tokens of the text filter, empty if there is none.
    pub fn tokens(&self) -> Vec<&str> {
        self.text
            .as_deref()
            .map(|t| t.split_whitespace().collect())
            .unwrap_or_default()
    }
}

/// Keyset position for paging compaction candidates: the last record of the
/// previous page. Candidates come back ordered by `(created_at, id)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompactionCursor {
    pub created_at: DateTime<Utc>,
    pub id: String,
}

impl CompactionCursor {
    pub fn after(memory: &Memory) -> Self {
        Self {
            created_at: memory.created_at,
            id: memory.id.clone(),
        }
    }
}
