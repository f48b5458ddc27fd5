use super::{load_deck, CmdResult};
use crate::reports;
use clap::Args;
use scamsmart_core::config::Config;
use scamsmart_core::error::{ScamSmartError, SsResult};
use scamsmart_core::games::bingo::{BingoSession, ScoreReport, SubmitOutcome};
use scamsmart_core::round::{Classification, TagSet};
use scamsmart_core::tags::Vocabulary;
use scamsmart_core::verifier::RecordedSession;
use std::io::{self, BufRead, Write};
use std::time::Instant;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct PlayArgs {
    #[command(flatten)]
    pub config: Config,

    /// Scenario deck (JSON array)
    #[arg(short, long, conflicts_with = "generated")]
    pub scenarios: Option<String>,

    /// Raw generator output to build the deck from; falls back to the builtin deck
    #[arg(long)]
    pub generated: Option<String>,

    /// Write the played rounds here for `replay`
    #[arg(long)]
    pub record: Option<String>,
}

pub fn run(args: &PlayArgs, config: &Config) -> CmdResult {
    let deck = load_deck(args.scenarios.as_deref(), args.generated.as_deref())?;
    let mut session = BingoSession::new(deck, config.scoring.clone());

    let stdin = io::stdin();
    let stdout = io::stdout();
    let report = run_with_io(&mut session, &mut stdin.lock(), &mut stdout.lock())?;

    if let Some(path) = &args.record {
        let recording = RecordedSession {
            deck: Some(report.deck_fingerprint.clone()),
            claimed_total: Some(report.total),
            rounds: report.rounds.clone(),
        };
        std::fs::write(path, serde_json::to_string_pretty(&recording)?)?;
        info!("Session recorded to {}", path);
    }
    Ok(0)
}

/// Plays a whole session over the given streams.
pub fn run_with_io<R: BufRead, W: Write>(
    session: &mut BingoSession,
    input: &mut R,
    out: &mut W,
) -> SsResult<ScoreReport> {
    session.start()?;
    let started = Instant::now();
    let mut ticked = 0u32;
    let count = session.deck().len();

    loop {
        let scenario = session
            .current_scenario()
            .ok_or_else(|| ScamSmartError::Session("no scenario to play".into()))?;
        writeln!(
            out,
            "\n=== Scenario {}/{}: {} ===\n\n{}\n",
            session.index() + 1,
            count,
            scenario.title,
            scenario.content
        )?;

        let call = ask_classification(input, out)?;
        session.choose(call)?;

        let vocab = Vocabulary::for_classification(call);
        writeln!(out, "{}", reports::indicator_board(vocab))?;
        write!(
            out,
            "Pick indicators by number or id, comma separated (blank for none): "
        )?;
        out.flush()?;
        let picks = parse_picks(&read_line(input)?, vocab);
        for tag in &picks {
            session.toggle_tag(tag)?;
        }

        let now = started.elapsed().as_secs() as u32;
        session.tick(now - ticked);
        ticked = now;

        match session.submit()? {
            SubmitOutcome::Next(b) => {
                writeln!(
                    out,
                    "Round score: {} (running total {})",
                    b.total,
                    session.running_total()
                )?;
            }
            SubmitOutcome::Complete(report) => {
                let rows: Vec<(String, _)> = session
                    .deck()
                    .iter()
                    .map(|s| s.title.clone())
                    .zip(report.breakdowns.iter().copied())
                    .collect();
                writeln!(out, "\n{}", reports::breakdown_table(&rows))?;
                writeln!(
                    out,
                    "{}",
                    reports::tally_table(&report.tally, report.accuracy, Some(report.time_taken))
                )?;
                writeln!(
                    out,
                    "score request: {}",
                    serde_json::to_string(&report.submission())?
                )?;
                return Ok(report);
            }
        }
    }
}

fn read_line<R: BufRead>(input: &mut R) -> SsResult<String> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(ScamSmartError::Session(
            "input ended before the session finished".into(),
        ));
    }
    Ok(line.trim().to_string())
}

fn ask_classification<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> SsResult<Classification> {
    loop {
        write!(out, "Is this message safe or unsafe? [s/u]: ")?;
        out.flush()?;
        let answer = read_line(input)?.to_lowercase();
        match answer.as_str() {
            "s" => return Ok(Classification::Safe),
            "u" => return Ok(Classification::Unsafe),
            other => {
                if let Ok(c) = other.parse::<Classification>() {
                    return Ok(c);
                }
                writeln!(out, "Please answer 's' or 'u'.")?;
            }
        }
    }
}

/// Turns `"1, 3, payment"` into tag ids; numbers index the shown board.
fn parse_picks(line: &str, vocab: Vocabulary) -> TagSet {
    let ids = vocab.ids();
    line.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| match t.parse::<usize>() {
            Ok(n) if (1..=ids.len()).contains(&n) => ids[n - 1].to_string(),
            _ => t.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scamsmart_core::config::ScoringRules;
    use scamsmart_core::scenario::ScenarioDeck;
    use std::io::Cursor;

    fn builtin_session() -> BingoSession {
        BingoSession::new(ScenarioDeck::builtin().unwrap(), ScoringRules::default())
    }

    #[test]
    fn picks_accept_numbers_and_ids() {
        let picks = parse_picks("1, payment, 99, ,1", Vocabulary::Risk);
        assert_eq!(picks.len(), 3);
        assert!(picks.contains("urgency"));
        assert!(picks.contains("payment"));
        assert!(picks.contains("99"));
    }

    #[test]
    fn full_session_over_streams() {
        // Classify each builtin scenario correctly, pick nothing.
        let script = "u\n\nS\n\nunsafe\n\nx\ns\n\nu\n\ns\n\n";
        let mut input = Cursor::new(script);
        let mut out = Vec::new();
        let mut session = builtin_session();

        let report = run_with_io(&mut session, &mut input, &mut out).unwrap();
        assert_eq!(report.scenario_count, 6);
        assert_eq!(report.tally.correct_classifications, 6);
        // Every round: 20 bonus, tags clamp to 0.
        assert_eq!(report.total, 120);

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Scenario 6/6"));
        assert!(text.contains("Please answer 's' or 'u'."));
        assert!(text.contains("\"game_type\":\"scam-bingo\""));
    }

    #[test]
    fn eof_is_a_session_error() {
        let mut input = Cursor::new("u\n");
        let mut out = Vec::new();
        let err = run_with_io(&mut builtin_session(), &mut input, &mut out).unwrap_err();
        assert!(matches!(err, ScamSmartError::Session(_)));
    }
}
