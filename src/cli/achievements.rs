//! Achievements command implementation

use anyhow::{Result, bail};

use ecotrack::Config;
use ecotrack::progress::{Achievement, AchievementCategory};

/// List achievements grouped by category
pub fn achievements_command(config: &Config, category: Option<&str>) -> Result<()> {
    let filter = match category {
        Some(name) => {
            let Some(category) = AchievementCategory::all()
                .iter()
                .find(|c| c.as_str() == name.to_lowercase())
            else {
                bail!(
                    "Unknown category: {name}\nExpected one of: waste_classification, carbon_reduction, challenges"
                );
            };
            Some(*category)
        }
        None => None,
    };

    let engine = config.open_engine()?;

    for category in AchievementCategory::all() {
        if filter.is_some_and(|f| f != *category) {
            continue;
        }

        println!("{}:", category.label());
        for a in Achievement::by_category(*category) {
            let status = engine.achievement_status(a.id.as_str())?;
            let mark = if status.unlocked { "✔" } else { " " };
            let progress = match status.target {
                Some(target) if !status.unlocked => {
                    format!(" ({}/{})", status.current.min(target), target)
                }
                _ => String::new(),
            };
            println!(
                "  [{mark}] {} {} - {} (+{}){progress}",
                a.icon, a.title, a.description, a.point_reward
            );
        }
        println!();
    }

    Ok(())
}
