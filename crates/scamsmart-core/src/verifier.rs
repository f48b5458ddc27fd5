use crate::config::ScoringRules;
use crate::error::{ScamSmartError, SsResult};
use crate::round::RoundSubmission;
use crate::scenario::ScenarioDeck;
use crate::scoring::{bingo_accuracy, score_scenario, RoundBreakdown, SessionTally};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// A recorded Red Flag Hunter session, as written by `play` and read by `replay`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedSession {
    #[serde(default)]
    pub deck: Option<String>,
    #[serde(default)]
    pub claimed_total: Option<u32>,
    pub rounds: Vec<RoundSubmission>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayReport {
    pub computed_total: u32,
    pub claimed_total: Option<u32>,
    pub accuracy: u32,
    pub tally: SessionTally,
    pub breakdowns: Vec<RoundBreakdown>,
}

impl ReplayReport {
    /// True when there was no claim or the claim matches the recomputed total.
    pub fn matches(&self) -> bool {
        !matches!(self.claimed_total, Some(c) if c != self.computed_total)
    }

    pub fn difference(&self) -> i64 {
        self.claimed_total
            .map_or(0, |c| i64::from(c) - i64::from(self.computed_total))
    }
}

/// Re-scores every recorded round against `deck`.
pub fn verify_bingo_session(
    rules: &ScoringRules,
    deck: &ScenarioDeck,
    rounds: &[RoundSubmission],
    claimed_total: Option<u32>,
) -> SsResult<ReplayReport> {
    if rounds.len() != deck.len() {
        return Err(ScamSmartError::Validation(format!(
            "session has {} rounds but the deck has {} scenarios",
            rounds.len(),
            deck.len()
        )));
    }

    let breakdowns: Vec<RoundBreakdown> = deck
        .iter()
        .zip(rounds)
        .map(|(scenario, round)| score_scenario(rules, scenario, round))
        .collect();
    let tally: SessionTally = breakdowns.iter().collect();

    let report = ReplayReport {
        computed_total: tally.total,
        claimed_total,
        accuracy: bingo_accuracy(rules, tally.total, deck.len()),
        tally,
        breakdowns,
    };

    if report.matches() {
        info!("Replay verified: total {}", report.computed_total);
    } else {
        warn!(
            "Replay mismatch. Claimed: {:?}, Calculated: {}, Diff: {}",
            claimed_total,
            report.computed_total,
            report.difference()
        );
    }
    Ok(report)
}
