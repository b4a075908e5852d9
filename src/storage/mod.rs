//! Progress persistence
//!
//! The engine stores one blob under a fixed key. Backends:
//! - [`JsonFileStore`]: `<data_dir>/ecoProgress.json`
//! - [`SqliteStore`]: key/value table in `<data_dir>/progress.db`
//! - [`MemoryStore`]: in-process, used by tests and embedders

mod json;
mod memory;
mod sqlite;

pub use json::JsonFileStore;
pub(crate) use json::write_atomic;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::progress::ProgressState;

/// Fixed key the progress blob is stored under
pub const PROGRESS_KEY: &str = "ecoProgress";

/// Storage errors
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Stored progress is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl StorageError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Read/write access to the persisted progress blob
pub trait ProgressStore {
    /// Load stored progress; `Ok(None)` if nothing was stored yet
    fn load(&self) -> Result<Option<ProgressState>, StorageError>;

    /// Replace stored progress with `state`
    fn save(&self, state: &ProgressState) -> Result<(), StorageError>;

    /// Remove stored progress
    fn clear(&self) -> Result<(), StorageError>;
}

impl<T: ProgressStore + ?Sized> ProgressStore for Box<T> {
    fn load(&self) -> Result<Option<ProgressState>, StorageError> {
        (**self).load()
    }

    fn save(&self, state: &ProgressState) -> Result<(), StorageError> {
        (**self).save(state)
    }

    fn clear(&self) -> Result<(), StorageError> {
        (**self).clear()
    }
}

/// Which backend the CLI persists to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Json,
    Sqlite,
}

impl StorageBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Sqlite => "sqlite",
        }
    }
}

/// Open the configured backend inside `data_dir`
pub fn open_store(
    backend: StorageBackend,
    data_dir: &Path,
) -> Result<Box<dyn ProgressStore + Send>, StorageError> {
    let store: Box<dyn ProgressStore + Send> = match backend {
        StorageBackend::Json => Box::new(JsonFileStore::in_dir(data_dir)),
        StorageBackend::Sqlite => Box::new(SqliteStore::open(&data_dir.join("progress.db"))?),
    };
    Ok(store)
}
