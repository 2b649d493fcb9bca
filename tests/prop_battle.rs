//! Property-based tests for the battle engine.
//!
//! Run with: cargo test --release prop_

use proptest::prelude::*;

use conquest::battle::*;

fn army_strategy(max: u32) -> impl Strategy<Value = Army> {
    (0..=max, 0..=max, 0..=max, 0..=max).prop_map(|(i, c, a, s)| Army::new(i, c, a, s))
}

fn territory_strategy() -> impl Strategy<Value = Territory> {
    (
        army_strategy(200),
        prop::sample::select(Rarity::ALL.to_vec()),
        prop::sample::select(Terrain::ALL.to_vec()),
        0u8..=MAX_FORTIFICATION_LEVEL,
        0u32..1000,
    )
        .prop_map(|(garrison, rarity, terrain, level, production)| {
            Territory::new("prop", "Prop Keep", "owner")
                .with_garrison(garrison)
                .with_rarity(rarity)
                .with_terrain(terrain)
                .with_fortification(level)
                .with_resource_production(production)
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Aggregates are non-negative and zero exactly for the empty army.
    #[test]
    fn prop_aggregates_zero_iff_empty(army in army_strategy(10_000)) {
        prop_assert_eq!(army.power() == 0, army.is_empty());
        prop_assert_eq!(army.defense() == 0, army.is_empty());
        prop_assert_eq!(army.hit_points() == 0, army.is_empty());
        prop_assert!(army.average_speed() >= 0.0);
    }

    /// Counter bonus never drops below 1.0 and never exceeds the full bonus.
    #[test]
    fn prop_counter_bonus_bounded(a in army_strategy(500), b in army_strategy(500)) {
        let bonus = a.counter_bonus(&b);
        prop_assert!(bonus >= 1.0);
        prop_assert!(bonus <= COUNTER_BONUS + 1e-9);
    }

    /// Win chance is a probability and rounds never pass the cap.
    #[test]
    fn prop_prediction_bounded(attacker in army_strategy(200), territory in territory_strategy()) {
        let p = predict_outcome(&attacker, &territory);
        prop_assert!((0.0..=1.0).contains(&p.attacker_win_chance));
        prop_assert!(p.expected_rounds <= PREDICTION_ROUND_CAP);
    }

    /// Simulation is a pure function of its inputs.
    #[test]
    fn prop_simulation_deterministic(
        attacker in army_strategy(100),
        territory in territory_strategy(),
        max_rounds in 0u32..30
    ) {
        let first = simulate_battle_with(&attacker, &territory, max_rounds);
        let second = simulate_battle_with(&attacker, &territory, max_rounds);
        prop_assert_eq!(first, second);
    }

    /// Survivors plus losses give back the starting armies, and the round
    /// cap holds.
    #[test]
    fn prop_simulation_conserves_units(
        attacker in army_strategy(150),
        territory in territory_strategy(),
        max_rounds in 0u32..30
    ) {
        let result = simulate_battle_with(&attacker, &territory, max_rounds);
        prop_assert!(result.total_rounds <= max_rounds);

        for unit_type in UnitType::ALL {
            let attacker_total = result.attacker_survivors.count(unit_type)
                + result.attacker_losses.count(unit_type);
            prop_assert_eq!(attacker_total, attacker.count(unit_type));
            let defender_total = result.defender_survivors.count(unit_type)
                + result.defender_losses.count(unit_type);
            prop_assert_eq!(defender_total, territory.garrison.count(unit_type));
        }

        // Only the winner of the field keeps the territory
        prop_assert_eq!(result.rewards.territory_captured, result.winner == Side::Attacker);
    }

    /// The advisor never spends more than it was given.
    #[test]
    fn prop_advisor_within_budget(territory in territory_strategy(), budget in -1000i64..200_000) {
        let suggestion = suggest_composition(&territory, budget);
        prop_assert!(suggestion.cost <= budget.max(0) as u64);
        prop_assert_eq!(suggestion.cost, suggestion.army.cost());
    }
}
