//! Persisted progress record
//!
//! Field names follow the browser `ecoProgress` blob, so existing exports
//! (including the browser's `lastActivity` date text) load as-is.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::checker::ActivityStats;
use super::definitions::AchievementId;
use super::levels::Level;
use super::streaks::StreakState;

/// One recorded activity. Never mutated once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "activity")]
    pub activity_label: String,
    #[serde(rename = "points")]
    pub points_awarded: u32,
}

/// Aggregate root of a user's progress
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressState {
    #[serde(default)]
    pub(crate) points: u64,
    #[serde(default = "default_level")]
    pub(crate) level: u32,
    #[serde(rename = "achievements", default)]
    pub(crate) unlocked: Vec<String>,
    #[serde(default)]
    pub(crate) history: Vec<ActivityRecord>,
    #[serde(rename = "streaks", default)]
    pub(crate) streak: StreakState,
}

fn default_level() -> u32 {
    1
}

impl Default for ProgressState {
    fn default() -> Self {
        Self {
            points: 0,
            level: default_level(),
            unlocked: Vec::new(),
            history: Vec::new(),
            streak: StreakState::default(),
        }
    }
}

impl ProgressState {
    pub fn points(&self) -> u64 {
        self.points
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn level_title(&self) -> &'static str {
        Level::title_for(self.level)
    }

    pub fn history(&self) -> &[ActivityRecord] {
        &self.history
    }

    pub fn streak(&self) -> &StreakState {
        &self.streak
    }

    /// Unlocked achievement ids in unlock order
    pub fn unlocked_ids(&self) -> &[String] {
        &self.unlocked
    }

    pub fn is_unlocked(&self, id: AchievementId) -> bool {
        self.unlocked.iter().any(|u| u == id.as_str())
    }

    /// Unlocked achievements as typed ids
    pub fn unlocked(&self) -> Vec<AchievementId> {
        self.unlocked
            .iter()
            .filter_map(|s| AchievementId::from_str(s))
            .collect()
    }

    /// Aggregated statistics over the history
    pub fn stats(&self) -> ActivityStats {
        ActivityStats::from_history(&self.history)
    }

    /// Sum of all points recorded in the history
    pub fn history_total(&self) -> u64 {
        self.history.iter().map(|h| h.points_awarded as u64).sum()
    }

    /// Parse a stored progress blob
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub(crate) fn unlock(&mut self, id: AchievementId) -> bool {
        if self.is_unlocked(id) {
            return false;
        }
        self.unlocked.push(id.as_str().to_string());
        true
    }

    /// Repair a freshly loaded state so every invariant holds.
    ///
    /// Returns true if anything had to change.
    pub(crate) fn normalize(&mut self) -> bool {
        let mut repaired = false;

        let mut seen = BTreeSet::new();
        let before = self.unlocked.len();
        self.unlocked.retain(|id| {
            if AchievementId::from_str(id).is_none() {
                warn!(achievement = %id, "Dropping unknown achievement id from stored progress");
                return false;
            }
            seen.insert(id.clone())
        });
        repaired |= self.unlocked.len() != before;

        let total = self.history_total();
        if self.points != total {
            warn!(
                stored = self.points,
                history = total,
                "Stored points disagree with history, using history total"
            );
            self.points = total;
            repaired = true;
        }

        let level = Level::for_points(self.points).level;
        if self.level != level {
            self.level = level;
            repaired = true;
        }

        repaired |= self.streak.normalize();
        repaired
    }
}
