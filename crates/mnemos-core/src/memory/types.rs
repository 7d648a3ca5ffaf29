use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::MnemosError;

/// Kind of a memory record.
///
/// `Summary` and `Archive` are produced by the compaction pipeline or by
/// explicit classification, never by plain ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryType {
    Note,
    Summary,
    Archive,
    Decision,
    Preference,
    Todo,
}

impl MemoryType {
    pub const ALL: [MemoryType; 6] = [
        Self::Note,
        Self::Summary,
        Self::Archive,
        Self::Decision,
        Self::Preference,
        Self::Todo,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Note => "note",
            Self::Summary => "summary",
            Self::Archive => "archive",
            Self::Decision => "decision",
            Self::Preference => "preference",
            Self::Todo => "todo",
        }
    }

    /// Starting importance for records of this type when none is supplied.
    pub fn default_importance(self) -> f64 {
        match self {
            Self::Decision => 0.7,
            Self::Preference | Self::Todo | Self::Summary => 0.6,
            Self::Note => 0.5,
            Self::Archive => 0.2,
        }
    }
}

impl fmt::Display for MemoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MemoryType {
    type Err = MnemosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| MnemosError::InvalidMemory {
                reason: format!("unknown memory type {s:?}"),
            })
    }
}
