//! CLI command implementations

pub mod achievements;
pub mod history;
pub mod init;
pub mod record;
pub mod reset;
pub mod status;

use ecotrack::progress::{ActivityOutcome, DisplaySnapshot, ProgressEvent};

/// Print the notifications of one recorded activity
pub fn print_outcome(outcome: &ActivityOutcome) {
    for event in &outcome.events {
        match event {
            ProgressEvent::LevelUp(level_up) => {
                println!(
                    "  ⬆ Level Up! You've reached level {}: {}",
                    level_up.new_level, level_up.new_title
                );
            }
            ProgressEvent::AchievementUnlocked(unlocked) => {
                let a = unlocked.achievement;
                println!(
                    "  {} {} Unlocked! +{} points - {}",
                    a.icon, a.title, a.point_reward, a.description
                );
            }
            ProgressEvent::Refresh(snapshot) => print_snapshot(snapshot),
        }
    }

    if !outcome.persisted {
        eprintln!("Warning: progress could not be saved; it will be retried on the next activity.");
    }
}

pub fn print_snapshot(snapshot: &DisplaySnapshot) {
    println!(
        "Points: {}  |  Level: {}  |  Streak: {} day{}",
        snapshot.points,
        snapshot.level_title,
        snapshot.current_streak,
        if snapshot.current_streak == 1 { "" } else { "s" }
    );
}
