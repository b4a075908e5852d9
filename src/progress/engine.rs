//! Progress engine - core gamification logic
//!
//! Handles point awards, streak updates, level-ups and achievement unlocks,
//! then persists the state through the injected store.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Local, Utc};
use tracing::{debug, info, warn};

use super::checker::{self, ActivityStats};
use super::definitions::{ACHIEVEMENTS, Achievement, AchievementId};
use super::error::ProgressError;
use super::events::{ActivityOutcome, DisplaySnapshot, LevelUp, ProgressEvent, UnlockedAchievement};
use super::levels::{Level, LevelProgress};
use super::state::{ActivityRecord, ProgressState};
use crate::storage::{ProgressStore, StorageError};

/// Label prefix for points awarded by an achievement unlock
pub const ACHIEVEMENT_LABEL_PREFIX: &str = "Achievement: ";

/// Unlock status of one catalog entry
#[derive(Debug, Clone)]
pub struct AchievementStatus {
    pub achievement: &'static Achievement,
    pub unlocked: bool,
    pub current: u64,
    /// None for achievements not driven by activity counts
    pub target: Option<u64>,
}

/// Owns one user's progress and the store it is persisted to
pub struct ProgressEngine<S: ProgressStore> {
    store: S,
    state: ProgressState,
}

impl<S: ProgressStore> ProgressEngine<S> {
    /// Create an engine, hydrating state from `store`.
    ///
    /// Missing or unreadable data yields the zero state.
    pub fn new(store: S) -> Self {
        let mut state = match store.load() {
            Ok(Some(state)) => state,
            Ok(None) => {
                debug!("No stored progress, starting fresh");
                ProgressState::default()
            }
            Err(e) => {
                warn!(error = %e, "Stored progress unreadable, starting fresh");
                ProgressState::default()
            }
        };

        if state.normalize() {
            warn!("Stored progress was inconsistent and has been repaired");
        }

        Self { store, state }
    }

    pub fn state(&self) -> &ProgressState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn stats(&self) -> ActivityStats {
        self.state.stats()
    }

    /// Record an activity at the current local time
    pub fn record_activity(
        &mut self,
        activity_label: &str,
        points: u32,
    ) -> Result<ActivityOutcome, ProgressError> {
        self.record_activity_at(activity_label, points, Local::now())
    }

    /// Record an activity happening at `now`.
    ///
    /// Runs the full cascade (history, streak, levels, achievements), then
    /// persists once and appends a refresh event. A failed save is logged and
    /// reported through [`ActivityOutcome::persisted`]; the next call retries.
    pub fn record_activity_at(
        &mut self,
        activity_label: &str,
        points: u32,
        now: DateTime<Local>,
    ) -> Result<ActivityOutcome, ProgressError> {
        let label = activity_label.trim();
        if label.is_empty() {
            return Err(ProgressError::EmptyLabel);
        }

        let checkpoint = self.state.clone();
        let mut events = Vec::new();
        if let Err(e) = self.apply_award(label, points, now, &mut events) {
            self.state = checkpoint;
            return Err(e);
        }

        let persisted = self.persist();
        events.push(ProgressEvent::Refresh(self.display_snapshot()));

        Ok(ActivityOutcome { events, persisted })
    }

    /// Award points and cascade into streak, level and achievement updates.
    ///
    /// Recurses once per unlocked achievement; each id unlocks at most once so
    /// depth is bounded by the catalog size.
    fn apply_award(
        &mut self,
        label: &str,
        points: u32,
        now: DateTime<Local>,
        events: &mut Vec<ProgressEvent>,
    ) -> Result<(), ProgressError> {
        let total = self
            .state
            .points
            .checked_add(points as u64)
            .ok_or(ProgressError::PointsOverflow {
                total: self.state.points,
                award: points,
            })?;

        self.state.history.push(ActivityRecord {
            timestamp: now.with_timezone(&Utc),
            activity_label: label.to_string(),
            points_awarded: points,
        });
        self.state.points = total;
        debug!(activity = label, points, total, "Points awarded");

        let change = self.state.streak.record(now.date_naive());
        debug!(?change, streak = self.state.streak.current_streak, "Streak updated");

        self.check_level_up(events);

        while let Some(id) = checker::next_unlockable(&self.state) {
            let achievement = Achievement::get(id);
            self.state.unlock(id);
            info!(achievement = id.as_str(), reward = achievement.point_reward, "Achievement unlocked");

            let award_label = format!("{ACHIEVEMENT_LABEL_PREFIX}{}", achievement.title);
            self.apply_award(&award_label, achievement.point_reward, now, events)?;

            events.push(ProgressEvent::AchievementUnlocked(UnlockedAchievement {
                achievement,
                unlocked_at: now.with_timezone(&Utc),
            }));
        }

        Ok(())
    }

    /// Advance one level at a time while the next threshold is met
    fn check_level_up(&mut self, events: &mut Vec<ProgressEvent>) {
        while let Some(next) = Level::next(self.state.level) {
            if self.state.points < next.points_needed {
                break;
            }

            let old_level = self.state.level;
            self.state.level = next.level;
            info!(level = next.level, title = next.title, "Level up");
            events.push(ProgressEvent::LevelUp(LevelUp {
                old_level,
                new_level: next.level,
                new_title: next.title,
            }));
        }
    }

    fn persist(&self) -> bool {
        match self.store.save(&self.state) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Failed to persist progress, keeping in-memory state");
                false
            }
        }
    }

    /// Points, level title and current streak for display
    pub fn display_snapshot(&self) -> DisplaySnapshot {
        DisplaySnapshot {
            points: self.state.points,
            level_title: self.state.level_title(),
            current_streak: self.state.streak.current_streak,
        }
    }

    pub fn level_progress(&self) -> LevelProgress {
        LevelProgress::new(self.state.points)
    }

    /// Every catalog entry with its unlock status and count progress
    pub fn achievement_progress(&self) -> Vec<AchievementStatus> {
        let stats = self.state.stats();
        ACHIEVEMENTS
            .iter()
            .map(|achievement| self.status_of(achievement, &stats))
            .collect()
    }

    /// Status of a single achievement by its string id
    pub fn achievement_status(&self, id: &str) -> Result<AchievementStatus, ProgressError> {
        let achievement = Achievement::lookup(id)?;
        Ok(self.status_of(achievement, &self.state.stats()))
    }

    fn status_of(
        &self,
        achievement: &'static Achievement,
        stats: &ActivityStats,
    ) -> AchievementStatus {
        AchievementStatus {
            achievement,
            unlocked: self.state.is_unlocked(achievement.id),
            current: checker::current_count(achievement.id, stats),
            target: checker::target(achievement.id),
        }
    }

    /// Discard all progress and clear the store
    pub fn reset(&mut self) -> Result<(), StorageError> {
        self.store.clear()?;
        self.state = ProgressState::default();
        info!("Progress reset");
        Ok(())
    }

    pub fn unlocked(&self) -> Vec<AchievementId> {
        self.state.unlocked()
    }
}

/// Parse a point value supplied as text.
///
/// Rejects anything that is not a finite, non-negative whole number fitting in
/// `u32` (`NaN`, `inf`, `-5`, `2.5`).
pub fn parse_points(raw: &str) -> Result<u32, ProgressError> {
    let invalid = || ProgressError::InvalidPoints(raw.to_string());
    let value: f64 = raw.trim().parse().map_err(|_| invalid())?;

    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value > u32::MAX as f64 {
        return Err(invalid());
    }
    Ok(value as u32)
}

/// Engine behind a single lock, for hosts that record from several threads.
///
/// The lock is held for the whole cascade of one call.
pub struct SharedProgressEngine<S: ProgressStore> {
    inner: Arc<Mutex<ProgressEngine<S>>>,
}

impl<S: ProgressStore> Clone for SharedProgressEngine<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: ProgressStore> SharedProgressEngine<S> {
    pub fn new(engine: ProgressEngine<S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ProgressEngine<S>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn record_activity(
        &self,
        activity_label: &str,
        points: u32,
    ) -> Result<ActivityOutcome, ProgressError> {
        self.lock().record_activity(activity_label, points)
    }

    pub fn record_activity_at(
        &self,
        activity_label: &str,
        points: u32,
        now: DateTime<Local>,
    ) -> Result<ActivityOutcome, ProgressError> {
        self.lock().record_activity_at(activity_label, points, now)
    }

    pub fn display_snapshot(&self) -> DisplaySnapshot {
        self.lock().display_snapshot()
    }

    /// Run `f` with the engine locked
    pub fn with_engine<R>(&self, f: impl FnOnce(&ProgressEngine<S>) -> R) -> R {
        let engine = self.lock();
        f(&engine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use chrono::TimeZone;

    fn at(day: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap()
    }

    fn engine() -> ProgressEngine<MemoryStore> {
        ProgressEngine::new(MemoryStore::new())
    }

    fn assert_invariants(engine: &ProgressEngine<MemoryStore>) {
        let state = engine.state();
        assert_eq!(state.points(), state.history_total());
        assert_eq!(state.level(), Level::for_points(state.points()).level);
        let mut ids = state.unlocked_ids().to_vec();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), state.unlocked_ids().len());
        assert!(state.streak().longest_streak >= state.streak().current_streak);
    }

    #[test]
    fn first_scan_awards_bonus() {
        let mut engine = engine();
        let outcome = engine.record_activity_at("waste_scan", 10, at(1)).unwrap();

        assert_eq!(engine.state().points(), 60);
        assert_eq!(engine.state().level(), 1);
        assert_eq!(engine.unlocked(), vec![AchievementId::FirstScan]);
        assert_eq!(engine.state().history().len(), 2);
        assert_eq!(
            engine.state().history()[1].activity_label,
            "Achievement: First Scan"
        );

        let unlocked: Vec<_> = outcome.unlocked().map(|u| u.achievement.id).collect();
        assert_eq!(unlocked, vec![AchievementId::FirstScan]);
        assert_eq!(outcome.level_ups().count(), 0);
        assert!(outcome.persisted);
        assert!(matches!(outcome.events.last(), Some(ProgressEvent::Refresh(_))));
        assert_invariants(&engine);
    }

    #[test]
    fn unlocked_achievement_is_not_awarded_twice() {
        let mut engine = engine();
        engine.record_activity_at("waste_scan", 10, at(1)).unwrap();
        let outcome = engine.record_activity_at("waste_scan", 10, at(1)).unwrap();

        assert_eq!(outcome.unlocked().count(), 0);
        assert_eq!(engine.state().points(), 70);
        assert_invariants(&engine);
    }

    #[test]
    fn level_up_emitted_per_threshold() {
        let mut engine = engine();
        engine.record_activity_at("bonus", 90, at(1)).unwrap();
        let outcome = engine.record_activity_at("bonus", 560, at(1)).unwrap();

        let levels: Vec<_> = outcome.level_ups().map(|l| l.new_level).collect();
        assert_eq!(levels, vec![2, 3, 4]);
        assert_eq!(engine.state().level(), 4);
        assert_eq!(engine.display_snapshot().level_title, "Earth Guardian");
        assert_invariants(&engine);
    }

    #[test]
    fn rejects_empty_label_without_change() {
        let mut engine = engine();
        assert!(matches!(
            engine.record_activity_at("   ", 10, at(1)),
            Err(ProgressError::EmptyLabel)
        ));
        assert_eq!(engine.state(), &ProgressState::default());
        assert_eq!(engine.store().save_count(), 0);
    }

    #[test]
    fn overflow_rolls_back() {
        let mut engine = engine();
        engine.state.points = u64::MAX - 5;
        engine.state.level = Level::max_level();
        let before = engine.state().clone();

        let err = engine.record_activity_at("bonus", 10, at(1)).unwrap_err();
        assert!(matches!(err, ProgressError::PointsOverflow { award: 10, .. }));
        assert_eq!(engine.state(), &before);
    }

    #[test]
    fn failed_save_keeps_state_and_retries() {
        let store = MemoryStore::new();
        let mut engine = ProgressEngine::new(store.clone());

        store.set_fail_saves(true);
        let outcome = engine.record_activity_at("carbon_calc", 20, at(1)).unwrap();
        assert!(!outcome.persisted);
        assert_eq!(engine.state().points(), 120);
        assert!(store.stored_state().is_none());

        store.set_fail_saves(false);
        let outcome = engine.record_activity_at("carbon_calc", 20, at(1)).unwrap();
        assert!(outcome.persisted);
        assert_eq!(store.stored_state().unwrap().points(), 140);
    }

    #[test]
    fn challenges_alone_unlock_nothing() {
        let mut engine = engine();
        for _ in 0..10 {
            let outcome = engine.record_activity_at("challenge", 40, at(2)).unwrap();
            assert_eq!(outcome.unlocked().count(), 0);
        }
        assert!(engine.unlocked().is_empty());
        assert_eq!(engine.stats().challenges_completed, 10);
        assert_eq!(engine.state().points(), 400);
        assert_eq!(engine.state().level(), 3);
        assert_invariants(&engine);
    }

    #[test]
    fn hundred_scans_stop_at_recycling_pro() {
        let mut engine = engine();
        for _ in 0..100 {
            engine.record_activity_at("waste_scan", 1, at(2)).unwrap();
        }
        assert_eq!(
            engine.unlocked(),
            vec![AchievementId::FirstScan, AchievementId::RecyclingPro]
        );
        // 100 + 50 + 200
        assert_eq!(engine.state().points(), 350);
        assert_invariants(&engine);
    }

    #[test]
    fn parse_points_rejects_malformed_values() {
        assert_eq!(parse_points("10").unwrap(), 10);
        assert_eq!(parse_points(" 25.0 ").unwrap(), 25);
        for raw in ["NaN", "inf", "-inf", "-5", "2.5", "abc", "", "1e12"] {
            assert!(
                matches!(parse_points(raw), Err(ProgressError::InvalidPoints(_))),
                "{raw} accepted"
            );
        }
    }

    #[test]
    fn achievement_status_lookup() {
        let mut engine = engine();
        engine.record_activity_at("waste_scan", 5, at(1)).unwrap();

        let status = engine.achievement_status("recycling_pro").unwrap();
        assert!(!status.unlocked);
        assert_eq!((status.current, status.target), (1, Some(50)));

        assert!(matches!(
            engine.achievement_status("nope"),
            Err(ProgressError::UnknownAchievement(_))
        ));
        assert_eq!(engine.achievement_progress().len(), ACHIEVEMENTS.len());
    }

    #[test]
    fn reset_clears_state_and_store() {
        let store = MemoryStore::new();
        let mut engine = ProgressEngine::new(store.clone());
        engine.record_activity_at("waste_scan", 10, at(1)).unwrap();

        engine.reset().unwrap();
        assert_eq!(engine.state(), &ProgressState::default());
        assert!(store.blob().is_none());
    }
}
