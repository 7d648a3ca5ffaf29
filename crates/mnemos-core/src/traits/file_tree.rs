use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::MnemosResult;

/// A file in the external tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Logical, root-relative path with `/` separators.
    pub path: String,
    pub modified: DateTime<Utc>,
}

/// The external, human-editable text tree.
pub trait IFileTree: Send + Sync {
    /// Current files, sorted by path.
    fn list(&self) -> MnemosResult<Vec<FileEntry>>;
    /// Full text of one file.
    fn read(&self, path: &str) -> MnemosResult<String>;
    /// Whether a stored `source_path` belongs to this tree. Records under
    /// paths the tree does not own are never removed by reconciliation.
    fn owns(&self, path: &str) -> bool;
}
