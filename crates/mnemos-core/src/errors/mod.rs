mod compaction_error;
mod config_error;
mod storage_error;

pub use compaction_error::CompactionError;
pub use config_error::ConfigError;
pub use storage_error::StorageError;

/// Top-level error for every mnemos operation.
///
/// Subsystem errors convert in via `From`, so callers can use `?` freely.
/// A missing record is *not* an error on probing operations (`get`, `update`,
/// `delete`, `record_access`); those return `None`/`false` instead.
#[derive(Debug, thiserror::Error)]
pub enum MnemosError {
    #[error("invalid memory: {reason}")]
    InvalidMemory { reason: String },

    #[error("storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("configuration error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("compaction error: {0}")]
    CompactionError(#[from] CompactionError),

    #[error("I/O error on {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("background task failed: {reason}")]
    TaskFailed { reason: String },

    #[error("backend has been shut down")]
    Shutdown,
}

impl MnemosError {
    /// Transient failures are skipped per unit (one file, one group) and counted,
    /// never propagated out of a sync or compaction pass.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            MnemosError::Io { .. }
                | MnemosError::CompactionError(CompactionError::SummaryTimeout { .. })
                | MnemosError::CompactionError(CompactionError::SummaryFailed { .. })
        )
    }
}

/// Convenience alias used across all crates.
pub type MnemosResult<T> = Result<T, MnemosError>;
