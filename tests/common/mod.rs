//! Shared test utilities for progress engine tests

#![allow(dead_code)]

use chrono::{DateTime, Local, TimeZone};
use ecotrack::progress::{Level, ProgressEngine, ProgressState};
use ecotrack::storage::MemoryStore;

/// Noon on the given day of March 2024, local time
pub fn march(day: u32) -> DateTime<Local> {
    Local
        .with_ymd_and_hms(2024, 3, day, 12, 0, 0)
        .single()
        .expect("valid local time")
}

/// Engine over a fresh in-memory store, plus a handle to that store
pub fn fresh_engine() -> (ProgressEngine<MemoryStore>, MemoryStore) {
    let store = MemoryStore::new();
    (ProgressEngine::new(store.clone()), store)
}

/// Browser-style blob with `scans` prior waste scans of `points` each and
/// `first_scan` already unlocked
pub fn blob_with_scans(scans: usize, points: u32) -> String {
    let mut history: Vec<String> = (0..scans)
        .map(|_| {
            format!(
                r#"{{"timestamp":"2024-03-01T10:00:00Z","activity":"waste_scan","points":{points}}}"#
            )
        })
        .collect();
    if scans > 0 {
        history.insert(
            1,
            r#"{"timestamp":"2024-03-01T10:00:00Z","activity":"Achievement: First Scan","points":50}"#
                .to_string(),
        );
    }

    let total = scans as u64 * points as u64 + if scans > 0 { 50 } else { 0 };
    let achievements = if scans > 0 { r#"["first_scan"]"# } else { "[]" };
    format!(
        r#"{{"points":{total},"level":{level},"achievements":{achievements},"history":[{history}],"streaks":{{"current":1,"longest":1,"lastActivity":"2024-03-01"}}}}"#,
        level = Level::for_points(total).level,
        history = history.join(","),
    )
}

/// Assert every invariant of a progress record
pub fn assert_invariants(state: &ProgressState) {
    assert_eq!(
        state.points(),
        state.history_total(),
        "points must equal the history sum"
    );
    assert_eq!(
        state.level(),
        Level::for_points(state.points()).level,
        "level must match the level table"
    );

    let mut ids = state.unlocked_ids().to_vec();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), state.unlocked_ids().len(), "duplicate achievement ids");
    assert_eq!(state.unlocked().len(), ids.len(), "unknown achievement ids");

    let streak = state.streak();
    assert!(streak.longest_streak >= streak.current_streak);
}
