//! SQLite key/value backend

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension};

use super::{PROGRESS_KEY, ProgressStore, StorageError};
use crate::progress::ProgressState;

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS kv_store (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at INTEGER NOT NULL
);
"#;

/// Stores the progress blob in a `kv_store` table
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open or create the database at `path`
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
        }

        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        Self::with_connection(conn)
    }

    /// In-memory database, gone when dropped
    pub fn open_in_memory() -> Result<Self, StorageError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, StorageError> {
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, StorageError> {
        self.conn
            .lock()
            .map_err(|_| StorageError::Unavailable("progress db lock poisoned".to_string()))
    }

    /// Raw blob as stored, if any
    pub fn raw_value(&self) -> Result<Option<String>, StorageError> {
        let conn = self.conn()?;
        let value = conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                [PROGRESS_KEY],
                |r| r.get(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Overwrite the raw blob (used to import browser exports)
    pub fn put_raw(&self, value: &str) -> Result<(), StorageError> {
        let conn = self.conn()?;
        conn.execute(
            r#"INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
               ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = ?3"#,
            rusqlite::params![PROGRESS_KEY, value, Utc::now().timestamp_millis()],
        )?;
        Ok(())
    }
}

impl ProgressStore for SqliteStore {
    fn load(&self) -> Result<Option<ProgressState>, StorageError> {
        match self.raw_value()? {
            Some(json) => Ok(Some(ProgressState::from_json(&json)?)),
            None => Ok(None),
        }
    }

    fn save(&self, state: &ProgressState) -> Result<(), StorageError> {
        self.put_raw(&state.to_json()?)
    }

    fn clear(&self) -> Result<(), StorageError> {
        let conn = self.conn()?;
        conn.execute("DELETE FROM kv_store WHERE key = ?1", [PROGRESS_KEY])?;
        Ok(())
    }
}
