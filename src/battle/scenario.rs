//! Battle scenarios loaded from TOML
//!
//! A scenario is a territory plus the army sent against it, and optionally
//! the budget to hand the composition advisor.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::battle::army::Army;
use crate::battle::terrain::{Rarity, Terrain};
use crate::battle::territory::Territory;
use crate::core::error::{ConquestError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub territory: Territory,
    pub attacker: Army,
    #[serde(default)]
    pub budget: Option<i64>,
}

impl Scenario {
    /// Parse a scenario from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let scenario: Scenario = toml::from_str(content)?;
        scenario.territory.validate()?;
        Ok(scenario)
    }

    /// Load a scenario from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConquestError::ScenarioNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Legendary mountain fortress at fortification level 2, attacked by a
    /// mixed army
    pub fn dragons_peak() -> Self {
        Self {
            territory: Territory::new("territory_001", "Dragon's Peak", "defender")
                .with_rarity(Rarity::Legendary)
                .with_terrain(Terrain::Mountains)
                .with_garrison(Army::new(20, 10, 15, 5))
                .with_fortification(2),
            attacker: Army::new(30, 20, 25, 10),
            budget: Some(1000),
        }
    }
}
