//! JSON file backend

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::debug;

use super::{PROGRESS_KEY, ProgressStore, StorageError};
use crate::progress::ProgressState;

/// Stores the progress blob as a single JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<dir>/ecoProgress.json`
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(format!("{PROGRESS_KEY}.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProgressStore for JsonFileStore {
    fn load(&self) -> Result<Option<ProgressState>, StorageError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| StorageError::io(&self.path, e))?;
        Ok(Some(ProgressState::from_json(&content)?))
    }

    fn save(&self, state: &ProgressState) -> Result<(), StorageError> {
        let content = serde_json::to_vec_pretty(state)?;
        write_atomic(&self.path, &content)?;
        debug!(path = %self.path.display(), "Progress saved");
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::io(&self.path, e)),
        }
    }
}

/// Write `content` to `path` under an exclusive lock, via temp file + rename.
///
/// The lock lives in a sibling `.lock` file so the rename cannot drop it.
pub(crate) fn write_atomic(path: &Path, content: &[u8]) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
    }

    let lock_path = path.with_extension("lock");
    let lock_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&lock_path)
        .map_err(|e| StorageError::io(&lock_path, e))?;
    lock_file
        .lock_exclusive()
        .map_err(|e| StorageError::io(&lock_path, e))?;

    let temp_path = path.with_extension("tmp");
    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .map_err(|e| StorageError::io(&temp_path, e))?;
    temp_file
        .write_all(content)
        .and_then(|_| temp_file.sync_all())
        .map_err(|e| StorageError::io(&temp_path, e))?;

    std::fs::rename(&temp_path, path).map_err(|e| StorageError::io(path, e))?;

    // Lock released when lock_file drops
    Ok(())
}
