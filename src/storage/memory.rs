//! In-memory backend

use std::sync::{Arc, Mutex, MutexGuard};

use super::{ProgressStore, StorageError};
use crate::progress::ProgressState;

#[derive(Debug, Default)]
struct Inner {
    blob: Option<String>,
    fail_saves: bool,
    save_count: usize,
}

/// Keeps the serialized blob in memory.
///
/// Clones share the same storage, so a test can hand one clone to the engine
/// and inspect or sabotage the store through another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a raw blob, valid or not
    pub fn with_blob(blob: impl Into<String>) -> Self {
        let store = Self::default();
        store.inner().blob = Some(blob.into());
        store
    }

    /// Store pre-seeded with `state`
    pub fn with_state(state: &ProgressState) -> Result<Self, StorageError> {
        Ok(Self::with_blob(state.to_json()?))
    }

    fn inner(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|p| p.into_inner())
    }

    /// Make subsequent saves fail
    pub fn set_fail_saves(&self, fail: bool) {
        self.inner().fail_saves = fail;
    }

    pub fn blob(&self) -> Option<String> {
        self.inner().blob.clone()
    }

    /// Last successfully saved state
    pub fn stored_state(&self) -> Option<ProgressState> {
        self.blob().and_then(|b| ProgressState::from_json(&b).ok())
    }

    /// Number of successful saves
    pub fn save_count(&self) -> usize {
        self.inner().save_count
    }
}

impl ProgressStore for MemoryStore {
    fn load(&self) -> Result<Option<ProgressState>, StorageError> {
        match self.blob() {
            Some(blob) => Ok(Some(ProgressState::from_json(&blob)?)),
            None => Ok(None),
        }
    }

    fn save(&self, state: &ProgressState) -> Result<(), StorageError> {
        let blob = state.to_json()?;
        let mut inner = self.inner();
        if inner.fail_saves {
            return Err(StorageError::Unavailable("storage quota exceeded".to_string()));
        }
        inner.blob = Some(blob);
        inner.save_count += 1;
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.inner().blob = None;
        Ok(())
    }
}
