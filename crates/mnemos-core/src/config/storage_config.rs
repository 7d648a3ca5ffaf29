use serde::{Deserialize, Serialize};

use super::defaults;

/// Entity store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// SQLite database path. `":memory:"` opens a private in-memory store.
    pub db_path: String,
    /// Number of read-only connections in file-backed mode.
    pub read_pool_size: usize,
    /// Page size used by `search` when the caller gives no limit.
    pub default_page_size: usize,
}

impl StorageConfig {
    pub fn is_in_memory(&self) -> bool {
        self.db_path == ":memory:"
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: defaults::DEFAULT_DB_PATH.to_string(),
            read_pool_size: defaults::DEFAULT_READ_POOL_SIZE,
            default_page_size: defaults::DEFAULT_PAGE_SIZE,
        }
    }
}
