use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::MnemosResult;
use crate::memory::Memory;

/// Time bucket a summary covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    Weekly,
    Monthly,
}

impl Granularity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Produces summary text for a group of records.
///
/// `Ok(None)` means "skip this group, create nothing". Must be deterministic
/// for fixed input so tests can rely on it.
pub trait ISummaryGenerator: Send + Sync {
    fn generate(&self, records: &[Memory], granularity: Granularity)
        -> MnemosResult<Option<String>>;
}
