//! Quick outcome estimate without running the simulation
//!
//! O(1) heuristic for UI hints and the composition advisor. The simulator is
//! the only authority on who actually wins.

use serde::{Deserialize, Serialize};

use crate::battle::army::Army;
use crate::battle::constants::{ATTACKER_THRESHOLD, PREDICTION_ROUND_CAP};
use crate::battle::territory::{attack_power, territory_defense, Territory};
use crate::core::config::{config, BattleConfig};

/// Heuristic battle forecast
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Estimated probability the attacker wins, 0-1, two decimal places
    pub attacker_win_chance: f64,
    pub expected_rounds: u32,
}

/// Estimate the outcome of `attacker` assaulting `territory`
pub fn predict_outcome(attacker: &Army, territory: &Territory) -> Prediction {
    predict_outcome_with(attacker, territory, config())
}

/// As [`predict_outcome`], with explicit round caps
pub fn predict_outcome_with(
    attacker: &Army,
    territory: &Territory,
    config: &BattleConfig,
) -> Prediction {
    let garrison = &territory.garrison;
    // Never above 20, even for a config that skipped validation
    let round_cap = config.prediction_round_cap.min(PREDICTION_ROUND_CAP);

    let effective_attack =
        attack_power(attacker, territory.terrain) * attacker.counter_bonus(garrison);
    let effective_defense = territory_defense(territory) * garrison.counter_bonus(attacker);

    let attacker_hp = attacker.hit_points() as f64;
    let defender_hp = garrison.hit_points() as f64;

    let attacker_score = effective_attack * attacker_hp;
    let defender_score = effective_defense * defender_hp * ATTACKER_THRESHOLD;

    let total_score = attacker_score + defender_score;
    let win_chance = if total_score > 0.0 {
        attacker_score / total_score
    } else {
        0.5
    };

    let average_damage = (effective_attack + effective_defense) / 2.0;
    let expected_rounds = if average_damage > 0.0 {
        let rounds = ((attacker_hp + defender_hp) / average_damage).ceil();
        rounds.min(f64::from(round_cap)) as u32
    } else {
        config.prediction_fallback_rounds
    };

    Prediction {
        attacker_win_chance: round_to_hundredths(win_chance),
        expected_rounds: expected_rounds.min(round_cap),
    }
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
