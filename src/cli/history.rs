//! History command implementation

use anyhow::Result;
use chrono::Local;

use ecotrack::Config;

/// Show the most recent activities, newest first
pub fn history_command(config: &Config, limit: usize) -> Result<()> {
    let engine = config.open_engine()?;
    let history = engine.state().history();

    if history.is_empty() {
        println!("No activity recorded yet.");
        return Ok(());
    }

    println!("Activity ({} of {}):\n", limit.min(history.len()), history.len());
    for record in history.iter().rev().take(limit) {
        println!(
            "  {}  +{:<5} {}",
            record.timestamp.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
            record.points_awarded,
            record.activity_label
        );
    }

    Ok(())
}
