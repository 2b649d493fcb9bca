//! Battle balance constants - all tunable values in one place
//!
//! Unlike the per-type tables in `unit_type` and `terrain`, these apply to
//! every battle regardless of composition.

/// Damage multiplier when a unit fights the type it is strong against
pub const COUNTER_BONUS: f64 = 1.5;

/// Fraction of raw damage that always gets through, whatever the defense
pub const MIN_DAMAGE_PERCENT: f64 = 0.1;

/// Predictor weight on the defender's score (incumbent advantage)
pub const ATTACKER_THRESHOLD: f64 = 1.2;

/// Highest fortification level a territory can reach
pub const MAX_FORTIFICATION_LEVEL: u8 = 5;

/// Defense multiplier per fortification level 0-5
pub const FORTIFICATION_BONUS: [f64; MAX_FORTIFICATION_LEVEL as usize + 1] =
    [1.0, 1.10, 1.25, 1.40, 1.60, 1.85];

// Rounds
pub const DEFAULT_MAX_ROUNDS: u32 = 20;
pub const PREDICTION_ROUND_CAP: u32 = 20;
pub const PREDICTION_FALLBACK_ROUNDS: u32 = 10;

// Rewards
pub const DEFAULT_RESOURCE_PRODUCTION: u32 = 100;
pub const VICTORY_LOOT_MULTIPLIER: f64 = 2.0;
pub const DEFENSE_LOOT_MULTIPLIER: f64 = 0.5;
pub const VICTORY_BASE_EXPERIENCE: u64 = 100;
pub const VICTORY_EXPERIENCE_PER_ROUND: u64 = 10;
pub const DEFENSE_BASE_EXPERIENCE: u64 = 50;
pub const DEFENSE_EXPERIENCE_PER_ROUND: u64 = 5;

// Composition advisor budget shares (percent of remaining budget)
pub const ANTI_ARCHER_BUDGET_PERCENT: u64 = 30;
pub const ANTI_INFANTRY_BUDGET_PERCENT: u64 = 40;
pub const ANTI_CAVALRY_BUDGET_PERCENT: u64 = 30;
pub const SIEGE_BUDGET_PERCENT: u64 = 20;
/// Counter units bought per observed garrison unit, at most
pub const COUNTER_PURCHASE_RATIO: u32 = 2;
/// Fortification level at which the advisor starts buying siege
pub const SIEGE_FORTIFICATION_THRESHOLD: u8 = 2;
