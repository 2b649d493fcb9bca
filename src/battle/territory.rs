//! Territories: the target of an attack
//!
//! Rarity and terrain are fixed at creation. Garrison and fortification
//! change between battles, never during one.

use serde::{Deserialize, Serialize};

use crate::battle::army::Army;
use crate::battle::constants::{
    DEFAULT_RESOURCE_PRODUCTION, FORTIFICATION_BONUS, MAX_FORTIFICATION_LEVEL,
};
use crate::battle::terrain::{Rarity, Terrain};
use crate::core::error::{ConquestError, Result};

/// State of a territory that can be attacked
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Territory {
    pub id: String,
    pub name: String,
    pub owner: String,
    #[serde(default)]
    pub rarity: Rarity,
    #[serde(default)]
    pub terrain: Terrain,
    #[serde(default)]
    pub garrison: Army,
    /// 0-5
    #[serde(default)]
    pub fortification_level: u8,
    #[serde(default = "default_resource_production")]
    pub resource_production: u32,
}

fn default_resource_production() -> u32 {
    DEFAULT_RESOURCE_PRODUCTION
}

impl Territory {
    /// A common plains territory with no garrison or fortifications
    pub fn new(id: impl Into<String>, name: impl Into<String>, owner: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            owner: owner.into(),
            rarity: Rarity::Common,
            terrain: Terrain::Plains,
            garrison: Army::empty(),
            fortification_level: 0,
            resource_production: DEFAULT_RESOURCE_PRODUCTION,
        }
    }

    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    pub fn with_terrain(mut self, terrain: Terrain) -> Self {
        self.terrain = terrain;
        self
    }

    pub fn with_garrison(mut self, garrison: Army) -> Self {
        self.garrison = garrison;
        self
    }

    /// Set the fortification level, capped at the maximum
    pub fn with_fortification(mut self, level: u8) -> Self {
        self.fortification_level = level.min(MAX_FORTIFICATION_LEVEL);
        self
    }

    pub fn with_resource_production(mut self, production: u32) -> Self {
        self.resource_production = production;
        self
    }

    /// Check the territory is a valid engine input
    pub fn validate(&self) -> Result<()> {
        if self.fortification_level > MAX_FORTIFICATION_LEVEL {
            return Err(ConquestError::InvalidFortification(self.fortification_level));
        }
        Ok(())
    }

    /// Raise fortifications by one level
    ///
    /// Returns false (and changes nothing) if already at the maximum.
    pub fn upgrade_fortification(&mut self) -> bool {
        if self.fortification_level >= MAX_FORTIFICATION_LEVEL {
            return false;
        }
        self.fortification_level += 1;
        true
    }

    /// Add units to the garrison
    pub fn reinforce(&mut self, reinforcements: &Army) {
        self.garrison.reinforce(reinforcements);
    }

    /// Defense multiplier for the current fortification level
    ///
    /// Levels above the maximum read the top of the table.
    pub fn fortification_multiplier(&self) -> f64 {
        let level = usize::from(self.fortification_level);
        match FORTIFICATION_BONUS.get(level) {
            Some(bonus) => *bonus,
            None => {
                tracing::warn!(
                    territory = %self.id,
                    fortification_level = level,
                    "fortification level out of range, clamping to {}",
                    MAX_FORTIFICATION_LEVEL
                );
                FORTIFICATION_BONUS[usize::from(MAX_FORTIFICATION_LEVEL)]
            }
        }
    }

    /// Combined multiplier on defense when this territory is defending
    ///
    /// rarity x terrain x fortification
    pub fn defense_multiplier(&self) -> f64 {
        self.rarity.defense_multiplier()
            * self.terrain.defense_multiplier()
            * self.fortification_multiplier()
    }

    /// Garrison defense with every territory bonus applied
    pub fn defense(&self) -> f64 {
        self.garrison.defense() as f64 * self.defense_multiplier()
    }

    /// Resource production after the rarity bonus
    pub fn production(&self) -> f64 {
        f64::from(self.resource_production) * self.rarity.production_multiplier()
    }
}

/// Garrison defense with rarity, terrain and fortification bonuses
pub fn territory_defense(territory: &Territory) -> f64 {
    territory.defense()
}

/// Attack power of `army` when fighting on `terrain`
pub fn attack_power(army: &Army, terrain: Terrain) -> f64 {
    army.power() as f64 * terrain.attack_multiplier()
}
