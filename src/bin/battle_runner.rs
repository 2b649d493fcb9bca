//! Headless Battle Runner
//!
//! Runs one battle scenario and prints the forecast, the simulated result and
//! an advisor suggestion, as JSON or text.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use rayon::prelude::*;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use conquest::battle::{
    predict_outcome, simulate_battle, suggest_composition, BattleReport, BattleResult,
    CompositionSuggestion, Prediction, Scenario,
};
use conquest::core::config::{set_config, BattleConfig};
use conquest::core::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

/// Headless Battle Runner - resolve a territory assault
#[derive(Parser, Debug)]
#[command(name = "battle_runner")]
#[command(about = "Predict, simulate and report a territory battle")]
struct Args {
    /// Scenario TOML file (defaults to the built-in Dragon's Peak scenario)
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Engine config TOML file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the round ceiling
    #[arg(long)]
    max_rounds: Option<u32>,

    /// Advisor budget (overrides the scenario's)
    #[arg(long)]
    budget: Option<i64>,

    /// Extra advisor budgets, evaluated in parallel
    #[arg(long, value_delimiter = ',')]
    budgets: Vec<i64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
}

/// Advisor suggestion together with how it fared when simulated
#[derive(Serialize)]
struct BudgetEvaluation {
    budget: i64,
    suggestion: CompositionSuggestion,
    simulated_winner: conquest::battle::Side,
    simulated_rounds: u32,
}

/// JSON output structure
#[derive(Serialize)]
struct RunnerOutput {
    territory: String,
    prediction: Prediction,
    result: BattleResult,
    evaluations: Vec<BudgetEvaluation>,
}

fn evaluate_budget(scenario: &Scenario, budget: i64) -> BudgetEvaluation {
    let suggestion = suggest_composition(&scenario.territory, budget);
    let result = simulate_battle(&suggestion.army, &scenario.territory);
    BudgetEvaluation {
        budget,
        suggestion,
        simulated_winner: result.winner,
        simulated_rounds: result.total_rounds,
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => BattleConfig::load(path)?,
        None => BattleConfig::default(),
    };
    if let Some(max_rounds) = args.max_rounds {
        config.max_rounds = max_rounds;
    }
    tracing::debug!(?config, "engine config");
    if set_config(config).is_err() {
        tracing::warn!("engine config already installed, keeping the existing one");
    }

    let scenario = match &args.scenario {
        Some(path) => Scenario::load(path)?,
        None => Scenario::dragons_peak(),
    };
    tracing::info!(territory = %scenario.territory.name, "scenario loaded");

    let prediction = predict_outcome(&scenario.attacker, &scenario.territory);
    let result = simulate_battle(&scenario.attacker, &scenario.territory);

    let mut budgets: Vec<i64> = args.budget.or(scenario.budget).into_iter().collect();
    budgets.extend(args.budgets.iter().copied());

    // Each evaluation owns its own battle state
    let evaluations: Vec<BudgetEvaluation> = budgets
        .par_iter()
        .map(|&budget| evaluate_budget(&scenario, budget))
        .collect();

    match args.format {
        OutputFormat::Json => {
            let output = RunnerOutput {
                territory: scenario.territory.name.clone(),
                prediction,
                result,
                evaluations,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => {
            println!(
                "Forecast: {:.0}% attacker win chance, ~{} rounds",
                prediction.attacker_win_chance * 100.0,
                prediction.expected_rounds
            );
            println!();
            for event in &result.log {
                println!("[Round {}] {}", event.round, event.description);
            }
            println!();
            println!("{}", BattleReport::new(&result, &scenario.territory));
            for evaluation in &evaluations {
                let army = evaluation.suggestion.army;
                println!();
                println!(
                    "Budget {}: {} infantry, {} cavalry, {} archers, {} siege (cost {})",
                    evaluation.budget,
                    army.infantry,
                    army.cavalry,
                    army.archers,
                    army.siege,
                    evaluation.suggestion.cost
                );
                println!(
                    "  forecast {:.0}%, simulated: {} after {} rounds",
                    evaluation.suggestion.win_chance * 100.0,
                    evaluation.simulated_winner.label(),
                    evaluation.simulated_rounds
                );
            }
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    // Logs go to stderr so JSON on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("conquest=info,battle_runner=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("battle runner failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
