//! Connection pool: one serialized writer plus round-robin readers.

pub mod pragmas;
pub mod read_pool;
pub mod write_connection;

use std::path::{Path, PathBuf};

use mnemos_core::errors::MnemosResult;

pub use read_pool::ReadPool;
pub use write_connection::WriteConnection;

/// Owns the single write connection and, when file-backed, the read pool.
pub struct ConnectionPool {
    pub writer: WriteConnection,
    /// `None` in in-memory mode: a private in-memory database is invisible
    /// to any other connection, so reads go through the writer.
    pub readers: Option<ReadPool>,
    pub db_path: Option<PathBuf>,
}

impl ConnectionPool {
    /// Open the writer for `path`. Readers are attached separately, after
    /// migrations have created the schema.
    pub fn open(path: &Path) -> MnemosResult<Self> {
        let writer = WriteConnection::open(path)?;
        Ok(Self {
            writer,
            readers: None,
            db_path: Some(path.to_path_buf()),
        })
    }

    pub fn open_in_memory() -> MnemosResult<Self> {
        let writer = WriteConnection::open_in_memory()?;
        Ok(Self {
            writer,
            readers: None,
            db_path: None,
        })
    }

    /// Attach `size` read-only connections. No-op in in-memory mode.
    pub fn attach_readers(&mut self, size: usize) -> MnemosResult<()> {
        if let Some(path) = &self.db_path {
            self.readers = Some(ReadPool::open(path, size)?);
        }
        Ok(())
    }
}
