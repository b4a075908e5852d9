//! Gamification system: points, levels, streaks and achievements
//!
//! Every activity (waste scan, carbon calculation, challenge) flows through
//! [`ProgressEngine::record_activity`], which appends to the history, updates
//! the daily streak, applies level-ups, unlocks achievements and persists the
//! result.
//!
//! ```text
//! record_activity ─► history + points ─► streak ─► levels ─► achievements ─┐
//!                          ▲                                               │
//!                          └───────── "Achievement: <title>" award ◄───────┘
//!                                             │
//!                                             ▼
//!                                      store.save() ─► Refresh event
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let mut engine = ProgressEngine::new(JsonFileStore::new(path));
//! let outcome = engine.record_activity("waste_scan", 10)?;
//! for event in &outcome.events { /* render */ }
//! ```

mod checker;
mod definitions;
mod engine;
mod error;
mod events;
mod levels;
mod state;
mod streaks;

pub use checker::{
    criteria_met, ActivityStats, CARBON_CALC_TAG, CHALLENGE_TAG, WASTE_SCAN_TAG,
};
pub use definitions::{Achievement, AchievementCategory, AchievementId, ACHIEVEMENTS};
pub use engine::{
    parse_points, AchievementStatus, ProgressEngine, SharedProgressEngine,
    ACHIEVEMENT_LABEL_PREFIX,
};
pub use error::ProgressError;
pub use events::{ActivityOutcome, DisplaySnapshot, LevelUp, ProgressEvent, UnlockedAchievement};
pub use levels::{Level, LevelProgress, LEVELS};
pub use state::{ActivityRecord, ProgressState};
pub use streaks::{StreakChange, StreakState};
