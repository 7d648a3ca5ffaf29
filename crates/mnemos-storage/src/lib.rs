//! # mnemos-storage
//!
//! SQLite-backed entity store: memories, tag catalogue, append-only access
//! log, relation edges. One writer connection, a read pool in file-backed
//! mode, versioned migrations, and an FTS5 index kept in sync by triggers.

pub mod codec;
pub mod engine;
pub mod migrations;
pub mod pool;
pub mod queries;

pub use engine::StorageEngine;

use mnemos_core::errors::{MnemosError, StorageError};

/// Map any displayable SQLite failure into the storage error variant.
pub(crate) fn to_storage_err(message: impl Into<String>) -> MnemosError {
    MnemosError::StorageError(StorageError::Sqlite {
        message: message.into(),
    })
}
