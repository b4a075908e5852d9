//! EcoTrack - progress tracking for waste and carbon habits
//!
//! Users earn points for classifying waste, calculating their carbon
//! footprint and completing eco challenges. Points drive levels, consecutive
//! active days build a streak, and activity milestones unlock achievements.
//!
//! ## Layout
//!
//! - [`progress`]: the gamification engine (points, levels, streaks, achievements)
//! - [`storage`]: where the progress blob lives (JSON file, SQLite, memory)
//! - [`config`]: `~/.ecotrack/config.toml` loading and saving

pub mod config;
pub mod progress;
pub mod storage;

pub use config::Config;
pub use progress::{ActivityOutcome, ProgressEngine, ProgressError, ProgressEvent, ProgressState};
pub use storage::{ProgressStore, StorageError};
