//! Status command implementation

use anyhow::Result;

use ecotrack::Config;

use super::print_snapshot;

/// Show points, level, streak and progress to the next level
pub fn status_command(config: &Config) -> Result<()> {
    let engine = config.open_engine()?;
    let state = engine.state();

    print_snapshot(&engine.display_snapshot());

    let progress = engine.level_progress();
    match progress.remaining() {
        Some(remaining) => println!(
            "Level {} ({:.0}% to next level, {} points to go)",
            progress.level,
            progress.fraction() * 100.0,
            remaining
        ),
        None => println!("Level {} (max level)", progress.level),
    }

    println!("Longest streak: {} days", state.streak().longest_streak);

    let stats = engine.stats();
    println!(
        "Scans: {}  |  Carbon calculations: {}  |  Challenges: {}",
        stats.total_scans, stats.carbon_calculations, stats.challenges_completed
    );
    let statuses = engine.achievement_progress();
    println!(
        "Achievements: {}/{}",
        statuses.iter().filter(|s| s.unlocked).count(),
        statuses.len()
    );

    let next_goal = statuses
        .iter()
        .filter(|s| !s.unlocked)
        .filter_map(|s| s.target.map(|target| (s, target)))
        .min_by_key(|(s, target)| target.saturating_sub(s.current));
    if let Some((status, target)) = next_goal {
        println!(
            "Next goal: {} {} ({}/{})",
            status.achievement.icon,
            status.achievement.title,
            status.current.min(target),
            target
        );
    }

    Ok(())
}
