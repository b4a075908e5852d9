//! Level system
//!
//! Defines level thresholds and titles. A level is always derived from the
//! point total, never stored independently of it.

/// Level definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level {
    pub level: u32,
    pub points_needed: u64,
    pub title: &'static str,
}

/// All level definitions (must be sorted by level, thresholds strictly increasing)
pub static LEVELS: &[Level] = &[
    Level {
        level: 1,
        points_needed: 0,
        title: "Eco Novice",
    },
    Level {
        level: 2,
        points_needed: 100,
        title: "Green Apprentice",
    },
    Level {
        level: 3,
        points_needed: 300,
        title: "Sustainability Scout",
    },
    Level {
        level: 4,
        points_needed: 600,
        title: "Earth Guardian",
    },
    Level {
        level: 5,
        points_needed: 1000,
        title: "Environmental Elite",
    },
];

impl Level {
    /// Highest level whose threshold is met by `points`
    pub fn for_points(points: u64) -> &'static Level {
        LEVELS
            .iter()
            .rev()
            .find(|l| points >= l.points_needed)
            .unwrap_or(&LEVELS[0])
    }

    /// Get a level definition by number
    pub fn get(level: u32) -> Option<&'static Level> {
        LEVELS.iter().find(|l| l.level == level)
    }

    /// The level directly above `current_level` (None if max level)
    pub fn next(current_level: u32) -> Option<&'static Level> {
        Self::get(current_level + 1)
    }

    /// Title for a level number, falling back to the first title
    pub fn title_for(level: u32) -> &'static str {
        Self::get(level).unwrap_or(&LEVELS[0]).title
    }

    /// Get max level
    pub fn max_level() -> u32 {
        LEVELS.last().map(|l| l.level).unwrap_or(1)
    }
}

/// Progress from the current level toward the next one
#[derive(Debug, Clone, PartialEq)]
pub struct LevelProgress {
    pub level: u32,
    pub title: &'static str,
    pub points: u64,
    pub current_level_points: u64,
    /// Points needed for next level (None if max)
    pub next_level_points: Option<u64>,
}

impl LevelProgress {
    pub fn new(points: u64) -> Self {
        let info = Level::for_points(points);
        Self {
            level: info.level,
            title: info.title,
            points,
            current_level_points: info.points_needed,
            next_level_points: Level::next(info.level).map(|l| l.points_needed),
        }
    }

    /// Calculate progress fraction to next level (0.0 - 1.0)
    pub fn fraction(&self) -> f32 {
        match self.next_level_points {
            Some(next) => {
                let in_level = self.points - self.current_level_points;
                let span = next - self.current_level_points;
                if span == 0 {
                    1.0
                } else {
                    in_level as f32 / span as f32
                }
            }
            None => 1.0,
        }
    }

    /// Points still missing for the next level
    pub fn remaining(&self) -> Option<u64> {
        self.next_level_points
            .map(|next| next.saturating_sub(self.points))
    }
}
