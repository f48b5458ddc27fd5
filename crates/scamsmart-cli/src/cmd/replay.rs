use super::CmdResult;
use crate::reports;
use clap::Args;
use scamsmart_core::config::Config;
use scamsmart_core::scenario::ScenarioDeck;
use scamsmart_core::verifier::{verify_bingo_session, RecordedSession};
use tracing::{info, warn};

#[derive(Args, Debug, Clone)]
pub struct ReplayArgs {
    #[command(flatten)]
    pub config: Config,

    /// Recorded session (JSON written by `play --record`)
    pub file: String,

    /// Deck the session was played on; the builtin deck when omitted
    #[arg(short, long)]
    pub scenarios: Option<String>,
}

pub fn run(args: &ReplayArgs, config: &Config) -> CmdResult {
    let session: RecordedSession = serde_json::from_str(&std::fs::read_to_string(&args.file)?)?;
    let deck = match &args.scenarios {
        Some(path) => ScenarioDeck::load_from_file(path)?,
        None => ScenarioDeck::builtin()?,
    };

    match &session.deck {
        Some(fp) if *fp != deck.fingerprint() => {
            warn!("Session was recorded on a different deck ({})", fp);
        }
        Some(_) => info!("Deck fingerprint matches the recording"),
        None => {}
    }

    let report = verify_bingo_session(&config.scoring, &deck, &session.rounds, session.claimed_total)?;

    let rows: Vec<(String, _)> = deck
        .iter()
        .map(|s| s.title.clone())
        .zip(report.breakdowns.iter().copied())
        .collect();
    println!("{}", reports::breakdown_table(&rows));
    println!("{}", reports::tally_table(&report.tally, report.accuracy, None));

    if report.matches() {
        println!("replay total: {}", report.computed_total);
        Ok(0)
    } else {
        println!(
            "MISMATCH: claimed {:?}, recomputed {} (diff {})",
            report.claimed_total,
            report.computed_total,
            report.difference()
        );
        Ok(2)
    }
}
