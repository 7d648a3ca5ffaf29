use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Type of a directed edge between two memories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationType {
    /// Target was folded into source by compaction.
    DerivedFrom,
    Related,
    Supersedes,
    References,
}

impl RelationType {
    pub const ALL: [RelationType; 4] = [
        Self::DerivedFrom,
        Self::Related,
        Self::Supersedes,
        Self::References,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::DerivedFrom => "derived_from",
            Self::Related => "related",
            Self::Supersedes => "supersedes",
            Self::References => "references",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A directed `(source, target, type)` edge. Cascades with either endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    pub source_id: String,
    pub target_id: String,
    pub relation_type: RelationType,
    pub created_at: DateTime<Utc>,
}
