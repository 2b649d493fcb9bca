//! Engine run configuration
//!
//! Balance constants (counter bonus, damage floor, fortification table) are
//! compile-time values in `battle::constants`. This module only holds the
//! knobs a caller may reasonably tune per deployment.

use std::path::Path;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::battle::constants::{
    DEFAULT_MAX_ROUNDS, PREDICTION_FALLBACK_ROUNDS, PREDICTION_ROUND_CAP,
};
use crate::core::error::{ConquestError, Result};

/// Run options for the battle engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// Round ceiling for the combat simulator
    ///
    /// A battle still undecided after this many rounds is settled by
    /// comparing remaining hit points.
    pub max_rounds: u32,

    /// Upper bound on the predictor's expected round count, at most 20
    pub prediction_round_cap: u32,

    /// Expected rounds reported when neither side can deal damage
    pub prediction_fallback_rounds: u32,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            max_rounds: DEFAULT_MAX_ROUNDS,
            prediction_round_cap: PREDICTION_ROUND_CAP,
            prediction_fallback_rounds: PREDICTION_FALLBACK_ROUNDS,
        }
    }
}

impl BattleConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: BattleConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.prediction_round_cap == 0 {
            return Err(ConquestError::InvalidConfig(
                "prediction_round_cap must be positive".into(),
            ));
        }

        if self.prediction_round_cap > PREDICTION_ROUND_CAP {
            return Err(ConquestError::InvalidConfig(format!(
                "prediction_round_cap ({}) must be <= {}",
                self.prediction_round_cap, PREDICTION_ROUND_CAP
            )));
        }

        if self.prediction_fallback_rounds > self.prediction_round_cap {
            return Err(ConquestError::InvalidConfig(format!(
                "prediction_fallback_rounds ({}) should be <= prediction_round_cap ({})",
                self.prediction_fallback_rounds, self.prediction_round_cap
            )));
        }

        Ok(())
    }
}

// === GLOBAL CONFIG ACCESS ===

static CONFIG: OnceLock<BattleConfig> = OnceLock::new();

/// Get the global battle config (initializes with defaults if not set)
pub fn config() -> &'static BattleConfig {
    CONFIG.get_or_init(BattleConfig::default)
}

/// Set the global battle config (can only be called once)
///
/// Returns Err if config was already set.
pub fn set_config(config: BattleConfig) -> std::result::Result<(), BattleConfig> {
    CONFIG.set(config)
}
