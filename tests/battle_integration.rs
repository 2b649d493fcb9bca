//! Battle system integration tests
//!
//! End-to-end runs through the public API: forecast, simulation, rewards
//! and the composition advisor.

use conquest::battle::*;
use conquest::core::config::{config, BattleConfig};

fn dragons_peak() -> Territory {
    Scenario::dragons_peak().territory
}

#[test]
fn test_fortress_assault_forecast() {
    let attacker = Army::new(30, 20, 25, 10);
    let prediction = predict_outcome(&attacker, &dragons_peak());

    assert!(prediction.attacker_win_chance > 0.0);
    assert!(prediction.attacker_win_chance < 1.0);
    assert_ne!(prediction.attacker_win_chance, 0.5);
    assert!(prediction.expected_rounds <= 20);
}

#[test]
fn test_fortress_assault_simulation() {
    let attacker = Army::new(30, 20, 25, 10);
    let territory = dragons_peak();
    let result = simulate_battle_with(&attacker, &territory, config().max_rounds);

    assert!(result.total_rounds >= 1);
    assert!(result.total_rounds <= 20);

    // At least one exchange logged for every round fought
    for round in 1..=result.total_rounds {
        let exchanges = result
            .log
            .iter()
            .filter(|e| e.round == round)
            .filter(|e| matches!(e.event_type, BattleEventType::Exchange { .. }))
            .count();
        assert!(exchanges >= 1, "round {round} has no exchange");
    }

    // Exactly one verdict, and it agrees with the result
    let verdicts: Vec<Side> = result
        .log
        .iter()
        .filter_map(|e| match e.event_type {
            BattleEventType::Ended { winner } => Some(winner),
            _ => None,
        })
        .collect();
    assert_eq!(verdicts, vec![result.winner]);

    assert_eq!(
        result.rewards,
        calculate_rewards(result.winner, &territory, result.total_rounds)
    );
}

#[test]
fn test_simulation_is_deterministic() {
    let attacker = Army::new(30, 20, 25, 10);
    let territory = dragons_peak();
    let first = simulate_battle_with(&attacker, &territory, 20);
    let second = simulate_battle_with(&attacker, &territory, 20);
    assert_eq!(first, second);
}

#[test]
fn test_survivors_plus_losses_equal_originals() {
    let attacker = Army::new(30, 20, 25, 10);
    let territory = dragons_peak();
    let result = simulate_battle_with(&attacker, &territory, 20);

    for unit_type in UnitType::ALL {
        assert_eq!(
            result.attacker_survivors.count(unit_type) + result.attacker_losses.count(unit_type),
            attacker.count(unit_type)
        );
        assert_eq!(
            result.defender_survivors.count(unit_type) + result.defender_losses.count(unit_type),
            territory.garrison.count(unit_type)
        );
    }
}

#[test]
fn test_counter_matchup_beats_neutral_control() {
    let attacker = Army::of(UnitType::Infantry, 25);
    let archers = Territory::new("a", "Archer Post", "o")
        .with_garrison(Army::of(UnitType::Archers, 25));
    let infantry = Territory::new("i", "Infantry Post", "o")
        .with_garrison(Army::of(UnitType::Infantry, 25));

    assert!(attacker.counter_bonus(&archers.garrison) > 1.0);
    assert_eq!(attacker.counter_bonus(&infantry.garrison), 1.0);

    let countered = predict_outcome(&attacker, &archers);
    let neutral = predict_outcome(&attacker, &infantry);
    assert!(countered.attacker_win_chance > neutral.attacker_win_chance);

    assert_eq!(simulate_battle_with(&attacker, &archers, 20).winner, Side::Attacker);
}

#[test]
fn test_undefended_territory_falls() {
    let territory = Territory::new("e", "Empty Keep", "o")
        .with_rarity(Rarity::Epic)
        .with_fortification(4);
    let result = simulate_battle_with(&Army::of(UnitType::Siege, 1), &territory, 20);

    assert_eq!(result.winner, Side::Attacker);
    assert_eq!(result.total_rounds, 1);
    assert_eq!(result.attacker_losses, Army::empty());
    assert_eq!(result.rewards.resources, 300);
    assert_eq!(result.rewards.experience, 110);
}

#[test]
fn test_nobody_shows_up() {
    let result = simulate_battle_with(&Army::empty(), &Territory::new("e", "Empty", "o"), 20);
    assert_eq!(result.winner, Side::Defender);
    assert_eq!(result.total_rounds, 0);
    assert!(!result.rewards.territory_captured);
}

#[test]
fn test_round_cap_stalemate_goes_to_hp() {
    // Two small forces behind heavy walls cannot finish each other in one round
    let territory = Territory::new("w", "Wall", "o")
        .with_garrison(Army::of(UnitType::Infantry, 40))
        .with_terrain(Terrain::Mountains)
        .with_rarity(Rarity::Legendary)
        .with_fortification(5);
    let attacker = Army::of(UnitType::Infantry, 40);
    let result = simulate_battle_with(&attacker, &territory, 1);

    assert_eq!(result.total_rounds, 1);
    assert!(result.attacker_survivors.has_units());
    assert!(result.defender_survivors.has_units());
    // Defender took only floor damage, attacker took real damage
    assert_eq!(result.winner, Side::Defender);
}

#[test]
fn test_round_cap_attacker_ahead_on_hp_wins() {
    let territory =
        Territory::new("f", "Field", "o").with_garrison(Army::of(UnitType::Infantry, 10));
    let attacker = Army::of(UnitType::Infantry, 40);
    let result = simulate_battle_with(&attacker, &territory, 1);

    // 400 - 80 = 320 into 1000 hp; 7 survivors strike back for floor(7)
    assert_eq!(result.total_rounds, 1);
    assert_eq!(result.attacker_damage_dealt, 320);
    assert_eq!(result.defender_damage_dealt, 7);
    assert_eq!(result.defender_survivors, Army::of(UnitType::Infantry, 7));
    assert_eq!(result.attacker_survivors, attacker);
    assert_eq!(result.winner, Side::Attacker);
    assert!(result.rewards.territory_captured);
}

#[test]
fn test_advisor_suggestion_respects_budget_and_simulates() {
    let territory = dragons_peak();
    for budget in [0, 150, 1000, 2500, 10_000] {
        let suggestion = suggest_composition(&territory, budget);
        assert!(suggestion.cost <= budget as u64);
        assert_eq!(suggestion.cost, suggestion.army.cost());
        assert_eq!(
            suggestion.win_chance,
            predict_outcome(&suggestion.army, &territory).attacker_win_chance
        );

        let result = simulate_battle_with(&suggestion.army, &territory, 20);
        assert!(result.total_rounds <= 20);
    }
}

#[test]
fn test_territory_lifecycle_between_battles() {
    let mut territory = Territory::new("t", "Riverside", "o")
        .with_garrison(Army::of(UnitType::Infantry, 10));
    let attacker = Army::new(10, 10, 0, 0);

    let before = predict_outcome(&attacker, &territory);
    assert!(territory.upgrade_fortification());
    territory.reinforce(&Army::of(UnitType::Archers, 10));
    let after = predict_outcome(&attacker, &territory);

    assert!(after.attacker_win_chance < before.attacker_win_chance);
}

#[test]
fn test_custom_config_round_cap() {
    let config = BattleConfig::from_toml_str("max_rounds = 2").unwrap();
    let attacker = Army::new(30, 20, 25, 10);
    let result = simulate_battle_with(&attacker, &dragons_peak(), config.max_rounds);
    assert!(result.total_rounds <= 2);
}

#[test]
fn test_result_serializes_to_json() {
    let result = simulate_battle_with(&Army::new(5, 5, 5, 5), &dragons_peak(), 20);
    let json = serde_json::to_value(&result).unwrap();
    assert!(json["winner"] == "attacker" || json["winner"] == "defender");
    assert_eq!(json["log"][0]["event_type"]["kind"], "started");
}

#[test]
fn test_concurrent_simulations_agree() {
    let territory = dragons_peak();
    let attacker = Army::new(30, 20, 25, 10);
    let expected = simulate_battle_with(&attacker, &territory, 20);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let territory = territory.clone();
            std::thread::spawn(move || simulate_battle_with(&attacker, &territory, 20))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
