//! Battle payouts
//!
//! Loot scales with the territory's production; experience with how long
//! the fight lasted. The winner's side gets the bigger share.

use serde::{Deserialize, Serialize};

use crate::battle::constants::{
    DEFENSE_BASE_EXPERIENCE, DEFENSE_EXPERIENCE_PER_ROUND, DEFENSE_LOOT_MULTIPLIER,
    VICTORY_BASE_EXPERIENCE, VICTORY_EXPERIENCE_PER_ROUND, VICTORY_LOOT_MULTIPLIER,
};
use crate::battle::execution::Side;
use crate::battle::territory::Territory;

/// Rewards computed from a battle verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BattleRewards {
    pub resources: u64,
    pub experience: u64,
    pub territory_captured: bool,
}

/// Compute rewards for `winner` after `rounds` rounds at `territory`
pub fn calculate_rewards(winner: Side, territory: &Territory, rounds: u32) -> BattleRewards {
    let base_resources = territory.production();
    let rounds = u64::from(rounds);

    match winner {
        Side::Attacker => BattleRewards {
            resources: (base_resources * VICTORY_LOOT_MULTIPLIER).floor() as u64,
            experience: VICTORY_BASE_EXPERIENCE + rounds * VICTORY_EXPERIENCE_PER_ROUND,
            territory_captured: true,
        },
        Side::Defender => BattleRewards {
            resources: (base_resources * DEFENSE_LOOT_MULTIPLIER).floor() as u64,
            experience: DEFENSE_BASE_EXPERIENCE + rounds * DEFENSE_EXPERIENCE_PER_ROUND,
            territory_captured: false,
        },
    }
}
