//! Conquest - deterministic territorial battle engine

pub mod battle;
pub mod core;
