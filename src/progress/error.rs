//! Progress engine errors

use crate::storage::StorageError;

/// Errors raised by [`ProgressEngine`](super::ProgressEngine) operations.
///
/// Input errors leave the progress state untouched.
#[derive(Debug, thiserror::Error)]
pub enum ProgressError {
    /// Activity label was empty or whitespace
    #[error("Activity label must not be empty")]
    EmptyLabel,

    /// Point value was not a finite, non-negative whole number
    #[error("Invalid point value: {0}")]
    InvalidPoints(String),

    /// Awarding the points would overflow the running total
    #[error("Awarding {award} points would overflow the total of {total}")]
    PointsOverflow { total: u64, award: u32 },

    /// Achievement id not present in the catalog
    #[error("Unknown achievement: {0}")]
    UnknownAchievement(String),

    /// Persistence failed on an operation that requires it
    #[error(transparent)]
    Storage(#[from] StorageError),
}
