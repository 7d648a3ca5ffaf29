use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::importance::{clamp01, ImportanceLevel};
use super::tag::normalize_tags;
use super::types::MemoryType;
use crate::constants::LEVEL_ORIGINAL;
use crate::errors::{MnemosError, MnemosResult};

/// A stored memory record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Memory {
    /// UUID v4 identifier, immutable.
    pub id: String,
    /// Full text body, never empty.
    pub content: String,
    /// Optional condensed text.
    pub summary: Option<String>,
    /// Logical origin (file-like path). Shared by all sections of one file.
    pub source_path: String,
    pub memory_type: MemoryType,
    /// Bucket of `importance_score`, kept in step by the store.
    pub importance_level: ImportanceLevel,
    /// Current score in [0, 1]. Decays, boosted by access and recency.
    pub importance_score: f64,
    /// Score last supplied explicitly; recalculation derives
    /// `importance_score` from it.
    pub base_importance: f64,
    /// 0 = original, 1 = weekly-compacted, 2 = monthly-compacted.
    pub compression_level: u8,
    /// Ids folded into this record, in order. Empty unless this is a summary.
    pub compressed_from: Vec<String>,
    /// Normalized tag set.
    pub tags: Vec<String>,
    /// blake3 hash of `content`.
    pub content_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Last search/read access, if any.
    pub accessed_at: Option<DateTime<Utc>>,
    pub access_count: u64,
}

impl Memory {
    /// Compute the blake3 content hash.
    pub fn compute_content_hash(content: &str) -> String {
        blake3::hash(content.as_bytes()).to_hex().to_string()
    }

    /// Fractional age in days relative to `now`, never negative.
    pub fn age_days(&self, now: DateTime<Utc>) -> f64 {
        (now - self.created_at).num_milliseconds().max(0) as f64 / crate::constants::MILLIS_PER_DAY as f64
    }

    /// Text considered by query-time matching: content plus summary.
    pub fn searchable_text(&self) -> String {
        match &self.summary {
            Some(summary) if !summary.is_empty() => format!("{}\n{}", self.content, summary),
            _ => self.content.clone(),
        }
    }

    /// True if the record was accessed at or after `cutoff`.
    pub fn accessed_since(&self, cutoff: DateTime<Utc>) -> bool {
        self.accessed_at.is_some_and(|t| t >= cutoff)
    }
}

/// Identity equality: two memories are equal if they have the same id.
impl PartialEq for Memory {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

/// Input for `create`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMemory {
    pub content: String,
    pub summary: Option<String>,
    pub source_path: String,
    pub memory_type: MemoryType,
    /// Defaults to the type's starting importance.
    pub importance: Option<f64>,
    pub compression_level: u8,
    pub compressed_from: Vec<String>,
    pub tags: Vec<String>,
    /// Defaults to the time of insertion.
    pub created_at: Option<DateTime<Utc>>,
}

impl NewMemory {
    pub fn new(content: impl Into<String>, source_path: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            summary: None,
            source_path: source_path.into(),
            memory_type: MemoryType::Note,
            importance: None,
            compression_level: LEVEL_ORIGINAL,
            compressed_from: Vec::new(),
            tags: Vec::new(),
            created_at: None,
        }
    }

    pub fn with_type(mut self, memory_type: MemoryType) -> Self {
        self.memory_type = memory_type;
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_importance(mut self, importance: f64) -> Self {
        self.importance = Some(importance);
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.tags = normalize_tags(tags);
        self
    }

    pub fn with_compression(mut self, level: u8, compressed_from: Vec<String>) -> Self {
        self.compression_level = level;
        self.compressed_from = compressed_from;
        self
    }

    pub fn created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = Some(at);
        self
    }

    /// Resolved starting importance, clamped.
    pub fn resolved_importance(&self) -> f64 {
        clamp01(
            self.importance
                .unwrap_or_else(|| self.memory_type.default_importance()),
        )
    }

    /// Reject records the store must never hold.
    pub fn validate(&self) -> MnemosResult<()> {
        if self.content.trim().is_empty() {
            return Err(MnemosError::InvalidMemory {
                reason: "content must not be empty".to_string(),
            });
        }
        if self.compression_level > crate::constants::MAX_COMPRESSION_LEVEL {
            return Err(MnemosError::InvalidMemory {
                reason: format!("compression level {} out of range", self.compression_level),
            });
        }
        Ok(())
    }
}

/// Partial update. Only `Some` fields change; `tags` replaces the whole set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryUpdate {
    pub content: Option<String>,
    /// `Some(None)` clears the summary.
    pub summary: Option<Option<String>>,
    pub source_path: Option<String>,
    pub memory_type: Option<MemoryType>,
    /// Sets both the base and the current importance.
    pub importance: Option<f64>,
    /// May only move forward.
    pub compression_level: Option<u8>,
    pub tags: Option<Vec<String>>,
}

impl MemoryUpdate {
    pub fn is_empty(&self) -> bool {
        self.content.is_none()
            && self.summary.is_none()
            && self.source_path.is_none()
            && self.memory_type.is_none()
            && self.importance.is_none()
            && self.compression_level.is_none()
            && self.tags.is_none()
    }

    /// Apply this update to a loaded record, enforcing the record invariants.
    /// Does not touch timestamps.
    pub fn apply_to(&self, memory: &mut Memory) -> MnemosResult<()> {
        if let Some(content) = &self.content {
            if content.trim().is_empty() {
                return Err(MnemosError::InvalidMemory {
                    reason: "content must not be empty".to_string(),
                });
            }
            memory.content = content.clone();
            memory.content_hash = Memory::compute_content_hash(content);
        }
        if let Some(summary) = &self.summary {
            memory.summary = summary.clone();
        }
        if let Some(path) = &self.source_path {
            memory.source_path = path.clone();
        }
        if let Some(memory_type) = self.memory_type {
            memory.memory_type = memory_type;
        }
        if let Some(importance) = self.importance {
            let score = clamp01(importance);
            memory.base_importance = score;
            memory.importance_score = score;
            memory.importance_level = ImportanceLevel::from_score(score);
        }
        if let Some(level) = self.compression_level {
            if level < memory.compression_level {
                return Err(MnemosError::InvalidMemory {
                    reason: format!(
                        "compression level cannot decrease ({} -> {level})",
                        memory.compression_level
                    ),
                });
            }
            if level > crate::constants::MAX_COMPRESSION_LEVEL {
                return Err(MnemosError::InvalidMemory {
                    reason: format!("compression level {level} out of range"),
                });
            }
            memory.compression_level = level;
        }
        if let Some(tags) = &self.tags {
            memory.tags = normalize_tags(tags);
        }
        Ok(())
    }
}
