//! Unit types and their catalog stats
//!
//! The catalog and the counter relation are fixed for the lifetime of the
//! process. Adding a unit type means adding a variant here; every match in
//! the crate then has to handle it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Type of military unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitType {
    Infantry, // Cheap, sturdy line troops
    Cavalry,  // Fast, hits hard, thin armor
    Archers,  // Ranged, fragile
    Siege,    // Heavy damage, slow, no counter
}

/// Catalog entry for a unit type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitStats {
    pub power: u32,
    pub defense: u32,
    /// Hit points of a single unit
    pub hp: u32,
    pub speed: u32,
    pub strong_against: Option<UnitType>,
    pub weak_against: Option<UnitType>,
}

const INFANTRY_STATS: UnitStats = UnitStats {
    power: 10,
    defense: 8,
    hp: 100,
    speed: 5,
    strong_against: Some(UnitType::Archers),
    weak_against: Some(UnitType::Cavalry),
};

const CAVALRY_STATS: UnitStats = UnitStats {
    power: 15,
    defense: 5,
    hp: 80,
    speed: 10,
    strong_against: Some(UnitType::Infantry),
    weak_against: Some(UnitType::Archers),
};

const ARCHERS_STATS: UnitStats = UnitStats {
    power: 12,
    defense: 4,
    hp: 60,
    speed: 7,
    strong_against: Some(UnitType::Cavalry),
    weak_against: Some(UnitType::Infantry),
};

// Siege is strong against walls, not against any unit
const SIEGE_STATS: UnitStats = UnitStats {
    power: 20,
    defense: 3,
    hp: 50,
    speed: 2,
    strong_against: None,
    weak_against: Some(UnitType::Cavalry),
};

impl UnitType {
    /// Number of unit types
    pub const COUNT: usize = 4;

    /// All unit types in catalog order
    ///
    /// This order is also the damage distribution order in combat.
    pub const ALL: [UnitType; Self::COUNT] = [
        UnitType::Infantry,
        UnitType::Cavalry,
        UnitType::Archers,
        UnitType::Siege,
    ];

    /// Catalog stats for this unit type
    pub const fn stats(self) -> &'static UnitStats {
        match self {
            UnitType::Infantry => &INFANTRY_STATS,
            UnitType::Cavalry => &CAVALRY_STATS,
            UnitType::Archers => &ARCHERS_STATS,
            UnitType::Siege => &SIEGE_STATS,
        }
    }

    /// Position in `ALL`, used to index per-type arrays
    pub const fn index(self) -> usize {
        match self {
            UnitType::Infantry => 0,
            UnitType::Cavalry => 1,
            UnitType::Archers => 2,
            UnitType::Siege => 3,
        }
    }

    /// Recruitment cost of one unit
    pub const fn cost(self) -> u64 {
        match self {
            UnitType::Infantry => 10,
            UnitType::Cavalry => 25,
            UnitType::Archers => 15,
            UnitType::Siege => 50,
        }
    }

    /// The type this unit deals bonus damage to, if any
    pub fn strong_against(self) -> Option<UnitType> {
        self.stats().strong_against
    }

    /// The type that deals bonus damage to this unit, if any
    pub fn weak_against(self) -> Option<UnitType> {
        self.stats().weak_against
    }

    pub fn name(self) -> &'static str {
        match self {
            UnitType::Infantry => "Infantry",
            UnitType::Cavalry => "Cavalry",
            UnitType::Archers => "Archers",
            UnitType::Siege => "Siege",
        }
    }
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
