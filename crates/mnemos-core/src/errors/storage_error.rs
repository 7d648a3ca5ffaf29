/// Storage-layer errors for SQLite operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    Sqlite { message: String },

    #[error("migration failed at version {version}: {reason}")]
    MigrationFailed { version: u32, reason: String },

    #[error("corrupt value in column {column}: {reason}")]
    CorruptBlob { column: String, reason: String },

    #[error("connection lock poisoned: {context}")]
    LockPoisoned { context: String },
}
