//! Battle system - deterministic territorial combat
//!
//! An attacking army assaults a territory's garrison. No dice: the same
//! inputs always give the same verdict.
//!
//! Flow for one battle:
//! - `predict_outcome` (optional, cheap estimate)
//! - `simulate_battle` (authoritative, round by round)
//! - `calculate_rewards` (folded into the battle result)
//!
//! `suggest_composition` runs ahead of time to help pick an army.

pub mod advisor;
pub mod army;
pub mod constants;
pub mod execution;
pub mod prediction;
pub mod report;
pub mod rewards;
pub mod scenario;
pub mod terrain;
pub mod territory;
pub mod unit_type;

// Re-exports for convenient access
pub use advisor::{suggest_composition, CompositionSuggestion};
pub use army::Army;
pub use constants::*;
pub use execution::{
    simulate_battle, simulate_battle_with, BattleEvent, BattleEventType, BattlePhase,
    BattleResult, BattleSide, BattleState, BattleUnit, Side,
};
pub use prediction::{predict_outcome, predict_outcome_with, Prediction};
pub use report::BattleReport;
pub use rewards::{calculate_rewards, BattleRewards};
pub use scenario::Scenario;
pub use terrain::{Rarity, Terrain, TerrainModifier};
pub use territory::{attack_power, territory_defense, Territory};
pub use unit_type::{UnitStats, UnitType};
