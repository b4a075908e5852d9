//! Notification events emitted by the engine for the UI to render

use chrono::{DateTime, Utc};

use super::definitions::Achievement;

/// An achievement that was just unlocked
#[derive(Debug, Clone)]
pub struct UnlockedAchievement {
    pub achievement: &'static Achievement,
    pub unlocked_at: DateTime<Utc>,
}

/// A level up event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelUp {
    pub old_level: u32,
    pub new_level: u32,
    pub new_title: &'static str,
}

/// Values shown in the points/level/streak display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplaySnapshot {
    pub points: u64,
    pub level_title: &'static str,
    pub current_streak: u32,
}

/// Events produced by one `record_activity` call, in emission order
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    LevelUp(LevelUp),
    AchievementUnlocked(UnlockedAchievement),
    /// Always the last event of a call
    Refresh(DisplaySnapshot),
}

/// Result of recording one activity
#[derive(Debug, Clone)]
pub struct ActivityOutcome {
    pub events: Vec<ProgressEvent>,
    /// False if the store rejected the write; the in-memory state is still current
    pub persisted: bool,
}

impl ActivityOutcome {
    pub fn level_ups(&self) -> impl Iterator<Item = &LevelUp> {
        self.events.iter().filter_map(|e| match e {
            ProgressEvent::LevelUp(l) => Some(l),
            _ => None,
        })
    }

    pub fn unlocked(&self) -> impl Iterator<Item = &UnlockedAchievement> {
        self.events.iter().filter_map(|e| match e {
            ProgressEvent::AchievementUnlocked(u) => Some(u),
            _ => None,
        })
    }

    pub fn snapshot(&self) -> Option<&DisplaySnapshot> {
        self.events.iter().rev().find_map(|e| match e {
            ProgressEvent::Refresh(s) => Some(s),
            _ => None,
        })
    }
}
