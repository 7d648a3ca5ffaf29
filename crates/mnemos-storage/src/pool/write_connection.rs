//! The single write connection. All mutations serialize through its mutex.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;

use mnemos_core::errors::{MnemosError, MnemosResult, StorageError};

use super::pragmas::apply_pragmas;
use crate::to_storage_err;

pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    pub fn open(path: &Path) -> MnemosResult<Self> {
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory() -> MnemosResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Run `f` with exclusive access to the writer.
    pub fn with_conn_sync<F, T>(&self, f: F) -> MnemosResult<T>
    where
        F: FnOnce(&Connection) -> MnemosResult<T>,
    {
        let guard = self.conn.lock().map_err(|e| {
            MnemosError::StorageError(StorageError::LockPoisoned {
                context: format!("writer: {e}"),
            })
        })?;
        f(&guard)
    }
}
