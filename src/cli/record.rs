//! Activity recording commands

use anyhow::{Context, Result};

use ecotrack::Config;
use ecotrack::progress::{CARBON_CALC_TAG, CHALLENGE_TAG, WASTE_SCAN_TAG, parse_points};

use super::print_outcome;

/// Record an activity with an explicit label and point value
pub fn record_command(config: &Config, label: &str, points: &str) -> Result<()> {
    let points = parse_points(points)?;
    record(config, label, points)
}

/// Record a waste classification
pub fn scan_command(config: &Config, item: Option<&str>) -> Result<()> {
    let label = tagged(WASTE_SCAN_TAG, item);
    record(config, &label, config.settings.rewards.waste_scan)
}

/// Record a carbon footprint calculation
pub fn carbon_command(config: &Config) -> Result<()> {
    record(config, CARBON_CALC_TAG, config.settings.rewards.carbon_calc)
}

/// Record a completed challenge
pub fn challenge_command(config: &Config, name: Option<&str>) -> Result<()> {
    let label = tagged(CHALLENGE_TAG, name);
    record(config, &label, config.settings.rewards.challenge)
}

fn record(config: &Config, label: &str, points: u32) -> Result<()> {
    let mut engine = config.open_engine()?;
    let outcome = engine
        .record_activity(label, points)
        .with_context(|| format!("Failed to record activity '{label}'"))?;

    println!("+{points} points for {label}");
    print_outcome(&outcome);
    Ok(())
}

/// Label carrying the recognised tag plus an optional detail
fn tagged(tag: &str, detail: Option<&str>) -> String {
    match detail.map(str::trim).filter(|d| !d.is_empty()) {
        Some(detail) => format!("{tag}: {detail}"),
        None => tag.to_string(),
    }
}
