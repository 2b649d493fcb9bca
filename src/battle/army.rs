//! Armies and force-level aggregates
//!
//! An `Army` is a count per unit type. Everything here is a pure function of
//! those counts and the unit catalog.

use serde::{Deserialize, Serialize};

use crate::battle::constants::COUNTER_BONUS;
use crate::battle::unit_type::UnitType;

/// Unit counts for one side of a battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Army {
    pub infantry: u32,
    pub cavalry: u32,
    pub archers: u32,
    pub siege: u32,
}

impl Army {
    pub const fn new(infantry: u32, cavalry: u32, archers: u32, siege: u32) -> Self {
        Self {
            infantry,
            cavalry,
            archers,
            siege,
        }
    }

    /// An army with no units
    pub const fn empty() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Build an army from possibly negative counts, clamping each to `0..=u32::MAX`
    pub fn from_signed(infantry: i64, cavalry: i64, archers: i64, siege: i64) -> Self {
        let clamp = |v: i64| v.clamp(0, i64::from(u32::MAX)) as u32;
        Self::new(clamp(infantry), clamp(cavalry), clamp(archers), clamp(siege))
    }

    /// An army made of a single unit type
    pub fn of(unit_type: UnitType, count: u32) -> Self {
        let mut army = Self::empty();
        *army.count_mut(unit_type) = count;
        army
    }

    pub fn count(&self, unit_type: UnitType) -> u32 {
        match unit_type {
            UnitType::Infantry => self.infantry,
            UnitType::Cavalry => self.cavalry,
            UnitType::Archers => self.archers,
            UnitType::Siege => self.siege,
        }
    }

    pub fn count_mut(&mut self, unit_type: UnitType) -> &mut u32 {
        match unit_type {
            UnitType::Infantry => &mut self.infantry,
            UnitType::Cavalry => &mut self.cavalry,
            UnitType::Archers => &mut self.archers,
            UnitType::Siege => &mut self.siege,
        }
    }

    /// `(unit type, count)` pairs in catalog order, zero counts included
    pub fn iter(&self) -> impl Iterator<Item = (UnitType, u32)> + '_ {
        UnitType::ALL.into_iter().map(move |t| (t, self.count(t)))
    }

    pub fn total_units(&self) -> u64 {
        self.iter().map(|(_, c)| u64::from(c)).sum()
    }

    pub fn has_units(&self) -> bool {
        self.total_units() > 0
    }

    pub fn is_empty(&self) -> bool {
        !self.has_units()
    }

    /// Add another army's units to this one
    pub fn reinforce(&mut self, other: &Army) {
        for unit_type in UnitType::ALL {
            let count = self.count_mut(unit_type);
            *count = count.saturating_add(other.count(unit_type));
        }
    }

    /// Per-type difference, saturating at zero
    pub fn saturating_sub(&self, other: &Army) -> Army {
        let mut result = *self;
        for unit_type in UnitType::ALL {
            *result.count_mut(unit_type) =
                self.count(unit_type).saturating_sub(other.count(unit_type));
        }
        result
    }

    /// Total recruitment cost
    pub fn cost(&self) -> u64 {
        self.iter().map(|(t, c)| t.cost() * u64::from(c)).sum()
    }

    fn weighted_sum(&self, stat: impl Fn(UnitType) -> u32) -> u64 {
        self.iter()
            .map(|(t, c)| u64::from(stat(t)) * u64::from(c))
            .sum()
    }

    /// Raw attack power: sum of power x count
    pub fn power(&self) -> u64 {
        self.weighted_sum(|t| t.stats().power)
    }

    /// Raw defense: sum of defense x count
    pub fn defense(&self) -> u64 {
        self.weighted_sum(|t| t.stats().defense)
    }

    /// Total hit points: sum of per-unit hp x count
    pub fn hit_points(&self) -> u64 {
        self.weighted_sum(|t| t.stats().hp)
    }

    /// Unit-weighted average speed, 0 for an empty army
    pub fn average_speed(&self) -> f64 {
        let total = self.total_units();
        if total == 0 {
            return 0.0;
        }
        self.weighted_sum(|t| t.stats().speed) as f64 / total as f64
    }

    /// Proportional counter bonus this army enjoys against `enemy`
    ///
    /// Starts at 1.0. Each unit type with a counter target present in the
    /// enemy adds `(COUNTER_BONUS - 1) * min(own, target) / own_total`, so an
    /// army only partly made of counter units gets a partial bonus.
    pub fn counter_bonus(&self, enemy: &Army) -> f64 {
        let total = self.total_units();
        let mut bonus = 1.0;
        if total == 0 {
            return bonus;
        }

        for (unit_type, count) in self.iter() {
            if count == 0 {
                continue;
            }
            let Some(target) = unit_type.strong_against() else {
                continue;
            };
            let target_count = enemy.count(target);
            if target_count > 0 {
                let ratio = f64::from(count.min(target_count)) / total as f64;
                bonus += (COUNTER_BONUS - 1.0) * ratio;
            }
        }

        bonus
    }
}
