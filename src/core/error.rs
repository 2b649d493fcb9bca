use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConquestError {
    #[error("Fortification level {0} is out of range (0-5)")]
    InvalidFortification(u8),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Scenario file not found: {0:?}")]
    ScenarioNotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ConquestError>;
