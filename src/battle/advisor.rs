//! Composition advisor: pick an attacking army for a budget
//!
//! Greedy heuristic, not an optimizer. It buys the counter to each unit type
//! it sees in the garrison, adds siege against walls, and spends whatever is
//! left on infantry. The win chance it reports comes from the predictor and
//! is just as approximate.

use serde::{Deserialize, Serialize};

use crate::battle::army::Army;
use crate::battle::constants::{
    ANTI_ARCHER_BUDGET_PERCENT, ANTI_CAVALRY_BUDGET_PERCENT, ANTI_INFANTRY_BUDGET_PERCENT,
    COUNTER_PURCHASE_RATIO, SIEGE_BUDGET_PERCENT, SIEGE_FORTIFICATION_THRESHOLD,
};
use crate::battle::prediction::predict_outcome;
use crate::battle::territory::Territory;
use crate::battle::unit_type::UnitType;

/// Suggested attacking army
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompositionSuggestion {
    pub army: Army,
    /// Never exceeds the budget
    pub cost: u64,
    pub win_chance: f64,
}

/// Tracks what is left of the budget while buying units
struct Purchase {
    army: Army,
    remaining: u64,
}

impl Purchase {
    /// Buy `unit_type` with up to `percent` of the remaining budget,
    /// never more than `cap` units
    fn buy_share(&mut self, unit_type: UnitType, percent: u64, cap: Option<u32>) {
        let cost = unit_type.cost();
        if self.remaining < cost {
            return;
        }

        let affordable =
            u128::from(self.remaining) * u128::from(percent) / (100 * u128::from(cost));
        let count = match cap {
            Some(cap) => affordable.min(u128::from(cap)),
            None => affordable,
        };
        let count = u32::try_from(count).unwrap_or(u32::MAX);

        let slot = self.army.count_mut(unit_type);
        let count = count.min(u32::MAX - *slot);
        *slot += count;
        self.remaining -= u64::from(count) * cost;

        tracing::trace!(
            unit = unit_type.name(),
            count,
            remaining = self.remaining,
            "advisor purchase"
        );
    }

    /// Spend everything that is left on `unit_type`
    fn fill(&mut self, unit_type: UnitType) {
        self.buy_share(unit_type, 100, None);
    }
}

/// Suggest an army that counters `territory`'s garrison within `budget`
///
/// Negative budgets are treated as zero.
pub fn suggest_composition(territory: &Territory, budget: i64) -> CompositionSuggestion {
    let garrison = &territory.garrison;
    let mut purchase = Purchase {
        army: Army::empty(),
        remaining: budget.max(0) as u64,
    };

    // Each observed garrison type gets its counter, in a fixed order
    let counters = [
        (UnitType::Archers, UnitType::Infantry, ANTI_ARCHER_BUDGET_PERCENT),
        (UnitType::Infantry, UnitType::Cavalry, ANTI_INFANTRY_BUDGET_PERCENT),
        (UnitType::Cavalry, UnitType::Archers, ANTI_CAVALRY_BUDGET_PERCENT),
    ];
    for (observed, counter, percent) in counters {
        let seen = garrison.count(observed);
        if seen > 0 {
            purchase.buy_share(counter, percent, Some(seen.saturating_mul(COUNTER_PURCHASE_RATIO)));
        }
    }

    if territory.fortification_level >= SIEGE_FORTIFICATION_THRESHOLD {
        purchase.buy_share(UnitType::Siege, SIEGE_BUDGET_PERCENT, None);
    }

    purchase.fill(UnitType::Infantry);

    let army = purchase.army;
    let cost = army.cost();
    let win_chance = predict_outcome(&army, territory).attacker_win_chance;

    tracing::info!(
        territory = %territory.id,
        budget,
        cost,
        win_chance,
        "composition suggested"
    );

    CompositionSuggestion {
        army,
        cost,
        win_chance,
    }
}
