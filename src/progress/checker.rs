//! Achievement checking logic
//!
//! Criteria are evaluated against counts derived from the activity history.

use super::definitions::AchievementId;
use super::state::{ActivityRecord, ProgressState};

/// Label substring marking a waste classification
pub const WASTE_SCAN_TAG: &str = "waste_scan";
/// Label substring marking a carbon footprint calculation
pub const CARBON_CALC_TAG: &str = "carbon_calc";
/// Label substring marking a completed challenge
pub const CHALLENGE_TAG: &str = "challenge";

/// Counts derived from the activity history
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActivityStats {
    pub total_scans: u64,
    pub carbon_calculations: u64,
    pub challenges_completed: u64,
}

impl ActivityStats {
    pub fn from_history(history: &[ActivityRecord]) -> Self {
        let count = |tag: &str| {
            history
                .iter()
                .filter(|h| h.activity_label.contains(tag))
                .count() as u64
        };

        Self {
            total_scans: count(WASTE_SCAN_TAG),
            carbon_calculations: count(CARBON_CALC_TAG),
            challenges_completed: count(CHALLENGE_TAG),
        }
    }
}

/// Whether the unlock criterion for `id` holds.
///
/// Achievements whose progress is not tracked here never unlock.
pub fn criteria_met(id: AchievementId, stats: &ActivityStats) -> bool {
    match id {
        AchievementId::FirstScan => stats.total_scans > 0,
        AchievementId::RecyclingPro => stats.total_scans >= 50,
        AchievementId::CarbonAware => stats.carbon_calculations > 0,
        AchievementId::WasteMaster
        | AchievementId::ChallengeStarter
        | AchievementId::ChallengeMaster
        | AchievementId::EcoWarrior
        | AchievementId::PlanetSavior
        | AchievementId::CommunityLeader => false,
    }
}

/// Target count for achievements with a count-based criterion
pub fn target(id: AchievementId) -> Option<u64> {
    match id {
        AchievementId::FirstScan | AchievementId::CarbonAware => Some(1),
        AchievementId::RecyclingPro => Some(50),
        AchievementId::WasteMaster
        | AchievementId::ChallengeStarter
        | AchievementId::ChallengeMaster
        | AchievementId::EcoWarrior
        | AchievementId::PlanetSavior
        | AchievementId::CommunityLeader => None,
    }
}

/// Current count toward an achievement's target; 0 when untracked
pub fn current_count(id: AchievementId, stats: &ActivityStats) -> u64 {
    match id {
        AchievementId::FirstScan | AchievementId::RecyclingPro => stats.total_scans,
        AchievementId::CarbonAware => stats.carbon_calculations,
        AchievementId::WasteMaster
        | AchievementId::ChallengeStarter
        | AchievementId::ChallengeMaster
        | AchievementId::EcoWarrior
        | AchievementId::PlanetSavior
        | AchievementId::CommunityLeader => 0,
    }
}

/// First locked achievement, in catalog order, whose criterion holds
pub fn next_unlockable(state: &ProgressState) -> Option<AchievementId> {
    let stats = state.stats();
    AchievementId::all()
        .iter()
        .copied()
        .find(|id| !state.is_unlocked(*id) && criteria_met(*id, &stats))
}
