//! Battle execution loop
//!
//! Preparation -> combat -> resolution. Each combat round: the faster side
//! strikes, then the other side strikes back if it still stands.
//!
//! The simulator is fully deterministic. Same armies, same territory, same
//! round cap: same result, log included.

use serde::{Deserialize, Serialize};

use crate::battle::army::Army;
use crate::battle::constants::{COUNTER_BONUS, MIN_DAMAGE_PERCENT};
use crate::battle::rewards::{calculate_rewards, BattleRewards};
use crate::battle::territory::Territory;
use crate::battle::unit_type::UnitType;
use crate::core::config::config;

/// Which side of a battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Attacker,
    Defender,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Attacker => Side::Defender,
            Side::Defender => Side::Attacker,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Side::Attacker => "Attacker",
            Side::Defender => "Defender",
        }
    }
}

/// Battle phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattlePhase {
    #[default]
    Preparation,
    Combat,
    Resolution,
}

/// Log entry for battle events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleEvent {
    pub round: u32,
    pub event_type: BattleEventType,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum BattleEventType {
    Started {
        attacker_units: u64,
        defender_units: u64,
    },
    /// One side striking the other
    Exchange {
        actor: Side,
        target: Side,
        damage: u64,
        remaining_hp: u64,
    },
    /// Attacker walked into an undefended territory
    Occupied,
    Ended {
        winner: Side,
    },
}

/// Live combat group: every unit of one type on one side
///
/// Hit points are pooled; the number of units still fighting is the pool
/// rounded up to whole units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleUnit {
    pub unit_type: UnitType,
    /// Units at the start of the battle
    pub count: u32,
    pub current_hp: u64,
    pub max_hp: u64,
}

impl BattleUnit {
    pub fn new(unit_type: UnitType, count: u32) -> Self {
        let max_hp = u64::from(unit_type.stats().hp) * u64::from(count);
        Self {
            unit_type,
            count,
            current_hp: max_hp,
            max_hp,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    /// Units still fighting: remaining hp rounded up to whole units
    pub fn surviving_units(&self) -> u64 {
        self.current_hp.div_ceil(u64::from(self.unit_type.stats().hp))
    }

    /// Survivors to hand back to the owner, never more than were sent in
    pub fn survivors(&self) -> u32 {
        self.surviving_units().min(u64::from(self.count)) as u32
    }

    /// Remove up to `damage` hp, returning how much was absorbed
    pub fn take_damage(&mut self, damage: u64) -> u64 {
        let absorbed = damage.min(self.current_hp);
        self.current_hp -= absorbed;
        absorbed
    }
}

/// All combat groups on one side, one slot per unit type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BattleSide {
    units: [Option<BattleUnit>; UnitType::COUNT],
}

impl BattleSide {
    /// One group per unit type with a nonzero count
    pub fn from_army(army: &Army) -> Self {
        let mut units = [None; UnitType::COUNT];
        for (unit_type, count) in army.iter() {
            if count > 0 {
                units[unit_type.index()] = Some(BattleUnit::new(unit_type, count));
            }
        }
        Self { units }
    }

    pub fn unit(&self, unit_type: UnitType) -> Option<&BattleUnit> {
        self.units[unit_type.index()].as_ref()
    }

    /// Groups with hp left, in catalog order
    pub fn live_units(&self) -> impl Iterator<Item = &BattleUnit> + '_ {
        self.units.iter().flatten().filter(|u| u.is_alive())
    }

    pub fn has_live(&self, unit_type: UnitType) -> bool {
        self.unit(unit_type).is_some_and(BattleUnit::is_alive)
    }

    pub fn is_alive(&self) -> bool {
        self.live_units().next().is_some()
    }

    pub fn remaining_hp(&self) -> u64 {
        self.units.iter().flatten().map(|u| u.current_hp).sum()
    }

    /// Damage before terrain and defense: power x surviving units per group,
    /// with the counter bonus for groups whose prey is still on the field
    pub fn raw_damage(&self, enemy: &BattleSide) -> f64 {
        self.live_units()
            .map(|unit| {
                let stats = unit.unit_type.stats();
                let damage = f64::from(stats.power) * unit.surviving_units() as f64;
                match stats.strong_against {
                    Some(prey) if enemy.has_live(prey) => damage * COUNTER_BONUS,
                    _ => damage,
                }
            })
            .sum()
    }

    /// Defense before territory bonuses
    pub fn raw_defense(&self) -> f64 {
        self.live_units()
            .map(|unit| f64::from(unit.unit_type.stats().defense) * unit.surviving_units() as f64)
            .sum()
    }

    /// Spread `damage` over live groups in catalog order
    pub fn absorb(&mut self, mut damage: u64) {
        for unit in self.units.iter_mut().flatten() {
            if damage == 0 {
                break;
            }
            damage -= unit.take_damage(damage);
        }
    }

    /// Surviving units per type
    pub fn survivors(&self) -> Army {
        let mut army = Army::empty();
        for unit in self.units.iter().flatten() {
            *army.count_mut(unit.unit_type) = unit.survivors();
        }
        army
    }
}

/// Complete outcome of a simulated battle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleResult {
    pub winner: Side,
    pub attacker_losses: Army,
    pub defender_losses: Army,
    pub attacker_survivors: Army,
    pub defender_survivors: Army,
    pub total_rounds: u32,
    pub rewards: BattleRewards,
    pub attacker_damage_dealt: u64,
    pub defender_damage_dealt: u64,
    pub log: Vec<BattleEvent>,
}

/// Ephemeral state of one battle
#[derive(Debug, Clone)]
pub struct BattleState<'a> {
    territory: &'a Territory,
    attacker_army: Army,

    pub phase: BattlePhase,
    pub round: u32,
    pub max_rounds: u32,

    pub attacker: BattleSide,
    pub defender: BattleSide,

    // Initiative is fixed by the starting compositions
    attacker_first: bool,

    pub attacker_damage_dealt: u64,
    pub defender_damage_dealt: u64,

    pub log: Vec<BattleEvent>,
}

impl<'a> BattleState<'a> {
    pub fn new(attacker_army: &Army, territory: &'a Territory, max_rounds: u32) -> Self {
        let attacker_speed = attacker_army.average_speed();
        let defender_speed = territory.garrison.average_speed();

        Self {
            territory,
            attacker_army: *attacker_army,
            phase: BattlePhase::Preparation,
            round: 0,
            max_rounds,
            attacker: BattleSide::from_army(attacker_army),
            defender: BattleSide::from_army(&territory.garrison),
            attacker_first: attacker_speed >= defender_speed,
            attacker_damage_dealt: 0,
            defender_damage_dealt: 0,
            log: Vec::new(),
        }
    }

    /// Is the battle finished?
    pub fn is_finished(&self) -> bool {
        matches!(self.phase, BattlePhase::Resolution)
    }

    /// Side that strikes first each round
    pub fn initiative(&self) -> Side {
        if self.attacker_first {
            Side::Attacker
        } else {
            Side::Defender
        }
    }

    pub fn side(&self, side: Side) -> &BattleSide {
        match side {
            Side::Attacker => &self.attacker,
            Side::Defender => &self.defender,
        }
    }

    /// Log a battle event
    pub fn log_event(&mut self, event_type: BattleEventType, description: String) {
        self.log.push(BattleEvent {
            round: self.round,
            event_type,
            description,
        });
    }

    /// Move from preparation into combat
    pub fn start_battle(&mut self) {
        if self.phase != BattlePhase::Preparation {
            return;
        }
        self.phase = BattlePhase::Combat;
        tracing::debug!(
            territory = %self.territory.id,
            initiative = self.initiative().label(),
            "battle entering combat"
        );

        let attacker_units = self.attacker_army.total_units();
        let defender_units = self.territory.garrison.total_units();
        self.log_event(
            BattleEventType::Started {
                attacker_units,
                defender_units,
            },
            format!(
                "Battle begins at {}: {} attacking units against {} defenders",
                self.territory.name, attacker_units, defender_units
            ),
        );

        // An undefended territory falls in the first round without a fight
        if self.max_rounds > 0 && self.attacker.is_alive() && !self.defender.is_alive() {
            self.round = 1;
            self.log_event(
                BattleEventType::Occupied,
                format!("{} is undefended and falls without a fight", self.territory.name),
            );
        }
    }

    /// Should another round be fought?
    pub fn is_contested(&self) -> bool {
        self.phase == BattlePhase::Combat
            && self.round < self.max_rounds
            && self.attacker.is_alive()
            && self.defender.is_alive()
    }

    /// Fight one round. Returns false if the battle was already decided.
    pub fn step_round(&mut self) -> bool {
        if !self.is_contested() {
            return false;
        }

        self.round += 1;

        let first = self.initiative();
        self.resolve_exchange(first);

        let second = first.opponent();
        if self.side(second).is_alive() {
            self.resolve_exchange(second);
        }

        true
    }

    /// `actor` strikes its opponent once
    fn resolve_exchange(&mut self, actor: Side) {
        let terrain_attack = self.territory.terrain.attack_multiplier();
        let territory_defense = self.territory.defense_multiplier();

        let (striker, target) = match actor {
            Side::Attacker => (&self.attacker, &mut self.defender),
            Side::Defender => (&self.defender, &mut self.attacker),
        };

        let mut raw_damage = striker.raw_damage(target);
        let mut defense = target.raw_defense();

        // Terrain helps only the attacker's strikes, territory bonuses only
        // the defender's armor
        if actor == Side::Attacker {
            raw_damage *= terrain_attack;
            defense *= territory_defense;
        }

        let final_damage = (raw_damage - defense).max(raw_damage * MIN_DAMAGE_PERCENT);
        let damage = final_damage.floor() as u64;

        target.absorb(damage);
        let remaining_hp = target.remaining_hp();

        match actor {
            Side::Attacker => self.attacker_damage_dealt += damage,
            Side::Defender => self.defender_damage_dealt += damage,
        }

        let target_side = actor.opponent();
        tracing::debug!(
            round = self.round,
            actor = actor.label(),
            raw_damage,
            defense,
            damage,
            remaining_hp,
            "exchange resolved"
        );

        self.log_event(
            BattleEventType::Exchange {
                actor,
                target: target_side,
                damage,
                remaining_hp,
            },
            format!(
                "{} deals {} damage. {} has {} HP remaining.",
                actor.label(),
                damage,
                target_side.label(),
                remaining_hp
            ),
        );
    }

    /// Decide the winner of the battle as it stands
    ///
    /// Mutual destruction and hp ties both go to the defender.
    pub fn winner(&self) -> Side {
        match (self.attacker.is_alive(), self.defender.is_alive()) {
            (false, _) => Side::Defender,
            (true, false) => Side::Attacker,
            (true, true) => {
                if self.attacker.remaining_hp() > self.defender.remaining_hp() {
                    Side::Attacker
                } else {
                    Side::Defender
                }
            }
        }
    }

    /// Close the battle and build the result
    pub fn finish(mut self) -> BattleResult {
        self.phase = BattlePhase::Resolution;
        let winner = self.winner();

        let attacker_survivors = self.attacker.survivors();
        let defender_survivors = self.defender.survivors();
        let attacker_losses = self.attacker_army.saturating_sub(&attacker_survivors);
        let defender_losses = self.territory.garrison.saturating_sub(&defender_survivors);

        let rewards = calculate_rewards(winner, self.territory, self.round);

        let verdict = match winner {
            Side::Attacker => "Attacker wins",
            Side::Defender => "Defender holds",
        };
        self.log_event(
            BattleEventType::Ended { winner },
            format!("Battle ended after {} rounds. {}!", self.round, verdict),
        );

        tracing::info!(
            territory = %self.territory.id,
            winner = winner.label(),
            rounds = self.round,
            attacker_losses = attacker_losses.total_units(),
            defender_losses = defender_losses.total_units(),
            "battle resolved"
        );

        BattleResult {
            winner,
            attacker_losses,
            defender_losses,
            attacker_survivors,
            defender_survivors,
            total_rounds: self.round,
            rewards,
            attacker_damage_dealt: self.attacker_damage_dealt,
            defender_damage_dealt: self.defender_damage_dealt,
            log: self.log,
        }
    }

    /// Run the battle from preparation to resolution
    pub fn run(mut self) -> BattleResult {
        self.start_battle();
        while self.step_round() {}
        self.finish()
    }
}

/// Simulate `attacker` assaulting `territory` under the global round ceiling
pub fn simulate_battle(attacker: &Army, territory: &Territory) -> BattleResult {
    simulate_battle_with(attacker, territory, config().max_rounds)
}

/// As [`simulate_battle`], for at most `max_rounds` rounds
pub fn simulate_battle_with(
    attacker: &Army,
    territory: &Territory,
    max_rounds: u32,
) -> BattleResult {
    BattleState::new(attacker, territory, max_rounds).run()
}
