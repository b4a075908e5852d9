//! Achievement definitions and metadata
//!
//! The catalog is closed: every achievement is known at compile time and
//! addressed through [`AchievementId`]. String ids only appear at the storage
//! boundary.

use super::error::ProgressError;

/// Unique identifier for each achievement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AchievementId {
    // Waste classification
    FirstScan,
    RecyclingPro,
    WasteMaster,

    // Carbon reduction
    CarbonAware,
    EcoWarrior,
    PlanetSavior,

    // Challenges
    ChallengeStarter,
    ChallengeMaster,
    CommunityLeader,
}

impl AchievementId {
    /// Get the string ID used in the persisted progress blob
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstScan => "first_scan",
            Self::RecyclingPro => "recycling_pro",
            Self::WasteMaster => "waste_master",
            Self::CarbonAware => "carbon_aware",
            Self::EcoWarrior => "eco_warrior",
            Self::PlanetSavior => "planet_savior",
            Self::ChallengeStarter => "challenge_starter",
            Self::ChallengeMaster => "challenge_master",
            Self::CommunityLeader => "community_leader",
        }
    }

    /// Parse from a persisted string
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "first_scan" => Some(Self::FirstScan),
            "recycling_pro" => Some(Self::RecyclingPro),
            "waste_master" => Some(Self::WasteMaster),
            "carbon_aware" => Some(Self::CarbonAware),
            "eco_warrior" => Some(Self::EcoWarrior),
            "planet_savior" => Some(Self::PlanetSavior),
            "challenge_starter" => Some(Self::ChallengeStarter),
            "challenge_master" => Some(Self::ChallengeMaster),
            "community_leader" => Some(Self::CommunityLeader),
            _ => None,
        }
    }

    /// Get all achievement IDs in catalog order
    pub fn all() -> &'static [AchievementId] {
        &[
            Self::FirstScan,
            Self::RecyclingPro,
            Self::WasteMaster,
            Self::CarbonAware,
            Self::EcoWarrior,
            Self::PlanetSavior,
            Self::ChallengeStarter,
            Self::ChallengeMaster,
            Self::CommunityLeader,
        ]
    }
}

impl std::fmt::Display for AchievementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Achievement category for grouping in the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AchievementCategory {
    WasteClassification,
    CarbonReduction,
    Challenges,
}

impl AchievementCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WasteClassification => "waste_classification",
            Self::CarbonReduction => "carbon_reduction",
            Self::Challenges => "challenges",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::WasteClassification => "Waste Classification",
            Self::CarbonReduction => "Carbon Reduction",
            Self::Challenges => "Challenges",
        }
    }

    pub fn all() -> &'static [AchievementCategory] {
        &[
            Self::WasteClassification,
            Self::CarbonReduction,
            Self::Challenges,
        ]
    }
}

/// Achievement definition with all metadata
#[derive(Debug, Clone)]
pub struct Achievement {
    pub id: AchievementId,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub category: AchievementCategory,
    pub point_reward: u32,
}

/// All achievement definitions
pub static ACHIEVEMENTS: [Achievement; 9] = [
    // === WASTE CLASSIFICATION ===
    Achievement {
        id: AchievementId::FirstScan,
        title: "First Scan",
        description: "Classify your first waste item",
        icon: "🔍",
        category: AchievementCategory::WasteClassification,
        point_reward: 50,
    },
    Achievement {
        id: AchievementId::RecyclingPro,
        title: "Recycling Pro",
        description: "Classify 50 items correctly",
        icon: "♻️",
        category: AchievementCategory::WasteClassification,
        point_reward: 200,
    },
    Achievement {
        id: AchievementId::WasteMaster,
        title: "Waste Master",
        description: "Achieve 100 correct classifications",
        icon: "👑",
        category: AchievementCategory::WasteClassification,
        point_reward: 500,
    },
    // === CARBON REDUCTION ===
    Achievement {
        id: AchievementId::CarbonAware,
        title: "Carbon Aware",
        description: "Complete your first carbon footprint calculation",
        icon: "🌱",
        category: AchievementCategory::CarbonReduction,
        point_reward: 100,
    },
    Achievement {
        id: AchievementId::EcoWarrior,
        title: "Eco Warrior",
        description: "Reduce your carbon footprint by 20%",
        icon: "⚔️",
        category: AchievementCategory::CarbonReduction,
        point_reward: 300,
    },
    Achievement {
        id: AchievementId::PlanetSavior,
        title: "Planet Savior",
        description: "Maintain low carbon footprint for 30 days",
        icon: "🌍",
        category: AchievementCategory::CarbonReduction,
        point_reward: 1000,
    },
    // === CHALLENGES ===
    Achievement {
        id: AchievementId::ChallengeStarter,
        title: "Challenge Accepted",
        description: "Complete your first eco challenge",
        icon: "🎯",
        category: AchievementCategory::Challenges,
        point_reward: 75,
    },
    Achievement {
        id: AchievementId::ChallengeMaster,
        title: "Challenge Master",
        description: "Complete 10 eco challenges",
        icon: "🏆",
        category: AchievementCategory::Challenges,
        point_reward: 400,
    },
    Achievement {
        id: AchievementId::CommunityLeader,
        title: "Community Leader",
        description: "Lead a community challenge",
        icon: "👥",
        category: AchievementCategory::Challenges,
        point_reward: 800,
    },
];

impl Achievement {
    /// Get achievement definition by ID
    pub fn get(id: AchievementId) -> &'static Achievement {
        let index = match id {
            AchievementId::FirstScan => 0,
            AchievementId::RecyclingPro => 1,
            AchievementId::WasteMaster => 2,
            AchievementId::CarbonAware => 3,
            AchievementId::EcoWarrior => 4,
            AchievementId::PlanetSavior => 5,
            AchievementId::ChallengeStarter => 6,
            AchievementId::ChallengeMaster => 7,
            AchievementId::CommunityLeader => 8,
        };
        &ACHIEVEMENTS[index]
    }

    /// Look up a definition by its persisted string id
    pub fn lookup(id: &str) -> Result<&'static Achievement, ProgressError> {
        AchievementId::from_str(id)
            .map(Self::get)
            .ok_or_else(|| ProgressError::UnknownAchievement(id.to_string()))
    }

    /// Get all achievements in a category
    pub fn by_category(category: AchievementCategory) -> impl Iterator<Item = &'static Achievement> {
        ACHIEVEMENTS.iter().filter(move |a| a.category == category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_id_has_exactly_one_definition() {
        for id in AchievementId::all() {
            let count = ACHIEVEMENTS.iter().filter(|a| a.id == *id).count();
            assert_eq!(count, 1, "{id} defined {count} times");
            assert_eq!(Achievement::get(*id).id, *id);
        }
        assert_eq!(ACHIEVEMENTS.len(), AchievementId::all().len());
    }

    #[test]
    fn string_ids_round_trip_and_are_unique() {
        let mut seen = HashSet::new();
        for id in AchievementId::all() {
            assert!(seen.insert(id.as_str()));
            assert_eq!(AchievementId::from_str(id.as_str()), Some(*id));
        }
    }

    #[test]
    fn lookup_rejects_unknown_ids() {
        assert_eq!(Achievement::lookup("first_scan").unwrap().point_reward, 50);
        let err = Achievement::lookup("moon_landing").unwrap_err();
        assert!(matches!(err, ProgressError::UnknownAchievement(ref id) if id == "moon_landing"));
    }

    #[test]
    fn rewards_are_positive() {
        assert!(ACHIEVEMENTS.iter().all(|a| a.point_reward > 0));
        let total: u32 = ACHIEVEMENTS.iter().map(|a| a.point_reward).sum();
        assert_eq!(total, 3425);
    }

    #[test]
    fn categories_hold_three_each() {
        for category in AchievementCategory::all() {
            assert_eq!(Achievement::by_category(*category).count(), 3);
        }
    }
}
