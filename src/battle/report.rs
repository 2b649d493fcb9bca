//! Human-readable battle summary

use std::fmt;

use crate::battle::army::Army;
use crate::battle::execution::{BattleResult, Side};
use crate::battle::territory::Territory;

/// Text report for a finished battle
pub struct BattleReport<'a> {
    pub result: &'a BattleResult,
    pub territory: &'a Territory,
}

impl<'a> BattleReport<'a> {
    pub fn new(result: &'a BattleResult, territory: &'a Territory) -> Self {
        Self { result, territory }
    }
}

fn write_losses(f: &mut fmt::Formatter<'_>, heading: &str, losses: &Army) -> fmt::Result {
    writeln!(f, "{heading}")?;
    for (unit_type, count) in losses.iter() {
        writeln!(f, "  {:<10} {}", format!("{unit_type}:"), count)?;
    }
    Ok(())
}

impl fmt::Display for BattleReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(48);
        let verdict = match self.result.winner {
            Side::Attacker => "ATTACKER VICTORY",
            Side::Defender => "DEFENDER HOLDS",
        };

        writeln!(f, "{rule}")?;
        writeln!(f, "BATTLE REPORT")?;
        writeln!(f, "{rule}")?;
        writeln!(f, "Territory: {}", self.territory.name)?;
        writeln!(f, "Terrain:   {}", self.territory.terrain)?;
        writeln!(f, "Rarity:    {}", self.territory.rarity)?;
        writeln!(f, "Walls:     level {}", self.territory.fortification_level)?;
        writeln!(f, "{rule}")?;
        writeln!(f, "Result: {verdict}")?;
        writeln!(f, "Rounds: {}", self.result.total_rounds)?;
        writeln!(f, "{rule}")?;
        write_losses(f, "Attacker losses:", &self.result.attacker_losses)?;
        write_losses(f, "Defender losses:", &self.result.defender_losses)?;
        writeln!(f, "{rule}")?;
        let rewards = &self.result.rewards;
        writeln!(f, "Resources:  {}", rewards.resources)?;
        writeln!(f, "Experience: {}", rewards.experience)?;
        writeln!(
            f,
            "Territory captured: {}",
            if rewards.territory_captured { "yes" } else { "no" }
        )?;
        write!(f, "{rule}")
    }
}
