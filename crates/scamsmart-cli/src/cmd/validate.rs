use super::CmdResult;
use crate::reports::{self, DeckRow};
use clap::Args;
use scamsmart_core::scenario::{Scenario, ScenarioDeck};
use tracing::{info, warn};

#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Scenario deck (JSON array); the builtin deck when omitted
    #[arg(short, long)]
    pub scenarios: Option<String>,
}

pub fn run(args: &ValidateArgs) -> CmdResult {
    // Read raw so every bad scenario is reported, not just the first.
    let scenarios: Vec<Scenario> = match &args.scenarios {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => ScenarioDeck::builtin()?.scenarios().to_vec(),
    };

    let rows: Vec<DeckRow> = scenarios
        .iter()
        .map(|s| DeckRow {
            id: s.id,
            title: s.title.clone(),
            is_scam: s.is_scam,
            tags: s.truth_tags().len(),
            problem: s.validate().err().map(|e| e.to_string()),
        })
        .collect();

    println!("{}", reports::deck_table(&rows));

    let bad = rows.iter().filter(|r| r.problem.is_some()).count();
    if bad > 0 || scenarios.is_empty() {
        warn!("{} of {} scenarios failed validation", bad, scenarios.len());
        return Ok(1);
    }

    let deck = ScenarioDeck::new(scenarios)?;
    info!("Deck OK: {} scenarios", deck.len());
    println!("fingerprint: {}", deck.fingerprint());
    Ok(0)
}
