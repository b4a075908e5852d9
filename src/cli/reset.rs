//! Reset command implementation

use anyhow::{Context, Result, bail};

use ecotrack::Config;

/// Delete all stored progress
pub fn reset_command(config: &Config, yes: bool) -> Result<()> {
    if !yes {
        bail!("This deletes all points, streaks and achievements.\nRe-run with --yes to confirm.");
    }

    let mut engine = config.open_engine()?;
    engine.reset().context("Failed to reset progress")?;
    println!("Progress reset.");
    Ok(())
}
