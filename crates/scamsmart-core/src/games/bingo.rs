use super::SessionState;
use crate::config::ScoringRules;
use crate::error::{ScamSmartError, SsResult};
use crate::round::{Classification, RoundSubmission, TagSet};
use crate::scenario::{Scenario, ScenarioDeck};
use crate::scores::{GameType, ScoreSubmission};
use crate::scoring::{bingo_accuracy, score_scenario, RoundBreakdown, SessionTally};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Final numbers of a Red Flag Hunter playthrough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreReport {
    pub total: u32,
    pub accuracy: u32,
    pub time_taken: u32,
    pub scenario_count: usize,
    pub deck_fingerprint: String,
    pub tally: SessionTally,
    pub rounds: Vec<RoundSubmission>,
    pub breakdowns: Vec<RoundBreakdown>,
}

impl ScoreReport {
    /// The one write request handed to score storage.
    pub fn submission(&self) -> ScoreSubmission {
        ScoreSubmission::new(GameType::ScamBingo, i64::from(self.total))
            .with_accuracy(self.accuracy)
            .with_time_taken(self.time_taken)
            .with_metadata("scenarios_completed", self.scenario_count)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Next(RoundBreakdown),
    Complete(ScoreReport),
}

/// Drives one Red Flag Hunter session over a fixed deck.
#[derive(Debug, Clone)]
pub struct BingoSession {
    deck: ScenarioDeck,
    rules: ScoringRules,
    state: SessionState,
    index: usize,
    classification: Option<Classification>,
    selected: TagSet,
    rounds: Vec<RoundSubmission>,
    breakdowns: Vec<RoundBreakdown>,
    elapsed_secs: u32,
}

impl BingoSession {
    pub fn new(deck: ScenarioDeck, rules: ScoringRules) -> Self {
        Self {
            deck,
            rules,
            state: SessionState::Ready,
            index: 0,
            classification: None,
            selected: TagSet::new(),
            rounds: Vec::new(),
            breakdowns: Vec::new(),
            elapsed_secs: 0,
        }
    }

    pub fn start(&mut self) -> SsResult<()> {
        if self.state != SessionState::Ready {
            return Err(ScamSmartError::Session(format!(
                "cannot start a session that is {:?}",
                self.state
            )));
        }
        self.state = SessionState::InProgress;
        debug!("Red Flag Hunter started with {} scenarios", self.deck.len());
        Ok(())
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn deck(&self) -> &ScenarioDeck {
        &self.deck
    }

    /// Zero-based position in the deck.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current_scenario(&self) -> Option<&Scenario> {
        match self.state {
            SessionState::InProgress => self.deck.get(self.index),
            _ => None,
        }
    }

    pub fn classification(&self) -> Option<Classification> {
        self.classification
    }

    pub fn selected(&self) -> &TagSet {
        &self.selected
    }

    /// Flips a tag on the board. Returns whether it is now selected.
    pub fn toggle_tag(&mut self, tag: &str) -> SsResult<bool> {
        self.ensure_in_progress()?;
        if self.selected.remove(tag) {
            Ok(false)
        } else {
            self.selected.insert(tag.to_string());
            Ok(true)
        }
    }

    /// Locks in safe/unsafe. Switching sides clears the board, as each side
    /// shows a different set of indicators.
    pub fn choose(&mut self, classification: Classification) -> SsResult<()> {
        self.ensure_in_progress()?;
        if self.classification.is_some_and(|c| c != classification) {
            self.selected.clear();
        }
        self.classification = Some(classification);
        Ok(())
    }

    pub fn clear_choice(&mut self) {
        self.classification = None;
        self.selected.clear();
    }

    pub fn submit(&mut self) -> SsResult<SubmitOutcome> {
        self.ensure_in_progress()?;
        let classification = self.classification.ok_or_else(|| {
            ScamSmartError::Session("choose safe or unsafe before submitting".into())
        })?;

        let round = RoundSubmission {
            classification,
            selected: std::mem::take(&mut self.selected),
        };
        let scenario = self.deck.get(self.index).ok_or_else(|| {
            ScamSmartError::Session(format!("no scenario at position {}", self.index))
        })?;
        let breakdown = score_scenario(&self.rules, scenario, &round);
        debug!(
            "Round {} scored {} (classification correct: {})",
            self.index + 1,
            breakdown.total,
            breakdown.classification_correct
        );

        self.rounds.push(round);
        self.breakdowns.push(breakdown);
        self.classification = None;
        self.index += 1;

        if self.index >= self.deck.len() {
            self.state = SessionState::Complete;
            let report = self.report();
            info!(
                "Red Flag Hunter complete: score {} over {} scenarios, accuracy {}%, {}s",
                report.total, report.scenario_count, report.accuracy, report.time_taken
            );
            Ok(SubmitOutcome::Complete(report))
        } else {
            Ok(SubmitOutcome::Next(breakdown))
        }
    }

    /// Advances the session clock. Time only counts while a game is running.
    pub fn tick(&mut self, secs: u32) {
        if self.state == SessionState::InProgress {
            self.elapsed_secs = self.elapsed_secs.saturating_add(secs);
        }
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    /// Back to `Ready` with the same deck.
    pub fn restart(&mut self) {
        *self = Self::new(self.deck.clone(), self.rules.clone());
    }

    /// Swaps in a fresh deck and resets.
    pub fn restart_with(&mut self, deck: ScenarioDeck) {
        *self = Self::new(deck, self.rules.clone());
    }

    pub fn running_total(&self) -> u32 {
        self.breakdowns
            .iter()
            .fold(0u32, |acc, b| acc.saturating_add(b.total))
    }

    pub fn round_breakdowns(&self) -> &[RoundBreakdown] {
        &self.breakdowns
    }

    pub fn rounds(&self) -> &[RoundSubmission] {
        &self.rounds
    }

    /// Present once every scenario has been submitted.
    pub fn final_report(&self) -> Option<ScoreReport> {
        (self.state == SessionState::Complete).then(|| self.report())
    }

    fn report(&self) -> ScoreReport {
        let total = self.running_total();
        ScoreReport {
            total,
            accuracy: bingo_accuracy(&self.rules, total, self.deck.len()),
            time_taken: self.elapsed_secs,
            scenario_count: self.deck.len(),
            deck_fingerprint: self.deck.fingerprint(),
            tally: self.breakdowns.iter().collect(),
            rounds: self.rounds.clone(),
            breakdowns: self.breakdowns.clone(),
        }
    }

    fn ensure_in_progress(&self) -> SsResult<()> {
        match self.state {
            SessionState::InProgress => Ok(()),
            other => Err(ScamSmartError::Session(format!(
                "session is {:?}, not in progress",
                other
            ))),
        }
    }
}
