//! Terrain and rarity tiers and their modifier tables
//!
//! Both are fixed when a territory is created. Terrain shifts the balance
//! between attacking and defending; rarity only ever helps the owner.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Terrain of a territory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Terrain {
    #[default]
    Plains, // Neutral
    Forest,    // Cover for defenders, hard going for attackers
    Mountains, // Strongest defensive ground
    Desert,    // Open ground, favours the attacker
    Coastal,   // Slight defensive edge
}

/// Attack/defense multiplier pair for a terrain tier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerrainModifier {
    pub attack: f64,
    pub defense: f64,
}

impl Terrain {
    pub const ALL: [Terrain; 5] = [
        Terrain::Plains,
        Terrain::Forest,
        Terrain::Mountains,
        Terrain::Desert,
        Terrain::Coastal,
    ];

    /// Multipliers applied to the attacker's damage and the defender's defense
    pub const fn modifier(self) -> TerrainModifier {
        match self {
            Terrain::Plains => TerrainModifier { attack: 1.0, defense: 1.0 },
            Terrain::Forest => TerrainModifier { attack: 0.9, defense: 1.2 },
            Terrain::Mountains => TerrainModifier { attack: 0.8, defense: 1.4 },
            Terrain::Desert => TerrainModifier { attack: 1.1, defense: 0.9 },
            Terrain::Coastal => TerrainModifier { attack: 1.0, defense: 1.1 },
        }
    }

    pub fn attack_multiplier(self) -> f64 {
        self.modifier().attack
    }

    pub fn defense_multiplier(self) -> f64 {
        self.modifier().defense
    }

    pub fn name(self) -> &'static str {
        match self {
            Terrain::Plains => "plains",
            Terrain::Forest => "forest",
            Terrain::Mountains => "mountains",
            Terrain::Desert => "desert",
            Terrain::Coastal => "coastal",
        }
    }
}

impl fmt::Display for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Rarity tier of a territory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    #[default]
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub const ALL: [Rarity; 4] = [Rarity::Common, Rarity::Rare, Rarity::Epic, Rarity::Legendary];

    /// Multiplier on the garrison's defense
    pub const fn defense_multiplier(self) -> f64 {
        match self {
            Rarity::Common => 1.0,
            Rarity::Rare => 1.15,
            Rarity::Epic => 1.35,
            Rarity::Legendary => 1.6,
        }
    }

    /// Multiplier on resource production (and therefore on battle loot)
    pub const fn production_multiplier(self) -> f64 {
        match self {
            Rarity::Common => 1.0,
            Rarity::Rare => 1.25,
            Rarity::Epic => 1.5,
            Rarity::Legendary => 2.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Rare => "rare",
            Rarity::Epic => "epic",
            Rarity::Legendary => "legendary",
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plains_neutral() {
        let m = Terrain::Plains.modifier();
        assert_eq!(m.attack, 1.0);
        assert_eq!(m.defense, 1.0);
    }

    #[test]
    fn test_mountains_best_defense() {
        let mountains = Terrain::Mountains.defense_multiplier();
        assert!(Terrain::ALL
            .iter()
            .filter(|t| **t != Terrain::Mountains)
            .all(|t| t.defense_multiplier() < mountains));
    }

    #[test]
    fn test_desert_favours_attack() {
        assert!(Terrain::Desert.attack_multiplier() > Terrain::Desert.defense_multiplier());
    }

    #[test]
    fn test_modifiers_within_band() {
        for terrain in Terrain::ALL {
            let m = terrain.modifier();
            assert!((0.8..=1.4).contains(&m.attack));
            assert!((0.8..=1.4).contains(&m.defense));
        }
    }

    #[test]
    fn test_rarity_multipliers_grow_with_tier() {
        for pair in Rarity::ALL.windows(2) {
            assert!(pair[1].defense_multiplier() > pair[0].defense_multiplier());
            assert!(pair[1].production_multiplier() > pair[0].production_multiplier());
        }
    }

    #[test]
    fn test_unknown_terrain_rejected() {
        assert!(serde_json::from_str::<Terrain>("\"swamp\"").is_err());
        assert_eq!(
            serde_json::from_str::<Terrain>("\"coastal\"").unwrap(),
            Terrain::Coastal
        );
    }
}
