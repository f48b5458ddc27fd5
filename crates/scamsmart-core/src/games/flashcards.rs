use super::{percent, SessionState};
use crate::config::GameRules;
use crate::error::{ScamSmartError, SsResult};
use crate::scores::{GameType, ScoreSubmission};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

const BUILTIN_CARDS: &str = include_str!("../../data/flashcards.csv");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashCard {
    pub id: u32,
    pub message: String,
    pub is_scam: bool,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashCardDeck {
    cards: Vec<FlashCard>,
}

impl FlashCardDeck {
    pub fn new(cards: Vec<FlashCard>) -> SsResult<Self> {
        if cards.is_empty() {
            return Err(ScamSmartError::Validation(
                "a flash card deck needs at least one card".into(),
            ));
        }
        if let Some(card) = cards.iter().find(|c| c.message.trim().is_empty()) {
            return Err(ScamSmartError::Validation(format!(
                "flash card {} has no message",
                card.id
            )));
        }
        Ok(Self { cards })
    }

    /// The ten cards shipped with the game.
    pub fn builtin() -> SsResult<Self> {
        Self::from_reader(BUILTIN_CARDS.as_bytes())
    }

    /// Reads `id,message,is_scam,explanation` rows.
    pub fn from_reader<R: Read>(reader: R) -> SsResult<Self> {
        Self::new(Self::read_cards(reader)?)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> SsResult<Self> {
        let file = std::fs::File::open(&path)?;
        let deck = Self::from_reader(file)?;
        info!(
            "Loaded {} flash cards from {}",
            deck.len(),
            path.as_ref().display()
        );
        Ok(deck)
    }

    fn read_cards<R: Read>(reader: R) -> SsResult<Vec<FlashCard>> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut cards = Vec::new();
        for record in rdr.deserialize() {
            cards.push(record?);
        }
        Ok(cards)
    }

    pub fn get(&self, index: usize) -> Option<&FlashCard> {
        self.cards.get(index)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Shown to the player right after answering a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub correct: bool,
    pub points: u32,
    pub streak: u32,
    pub explanation: String,
}

/// A timed run through a flash card deck.
#[derive(Debug, Clone)]
pub struct FlashCardSession {
    deck: FlashCardDeck,
    rules: GameRules,
    state: SessionState,
    index: usize,
    score: u32,
    streak: u32,
    answers: Vec<bool>,
    remaining_secs: u32,
    answered_current: bool,
}

impl FlashCardSession {
    pub fn new(deck: FlashCardDeck, rules: GameRules) -> Self {
        let remaining_secs = rules.flashcard_time_limit_secs;
        Self {
            deck,
            rules,
            state: SessionState::Ready,
            index: 0,
            score: 0,
            streak: 0,
            answers: Vec::new(),
            remaining_secs,
            answered_current: false,
        }
    }

    pub fn start(&mut self) -> SsResult<()> {
        if self.state != SessionState::Ready {
            return Err(ScamSmartError::Session(format!(
                "cannot start a flash card run that is {:?}",
                self.state
            )));
        }
        self.state = SessionState::InProgress;
        Ok(())
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn current_card(&self) -> Option<&FlashCard> {
        match self.state {
            SessionState::InProgress => self.deck.get(self.index),
            _ => None,
        }
    }

    /// Records the player's guess for the current card.
    pub fn answer(&mut self, says_scam: bool) -> SsResult<AnswerFeedback> {
        if self.state != SessionState::InProgress {
            return Err(ScamSmartError::Session("no flash card run in progress".into()));
        }
        if self.answered_current {
            return Err(ScamSmartError::Session(
                "this card was already answered".into(),
            ));
        }
        let card = self
            .deck
            .get(self.index)
            .ok_or_else(|| ScamSmartError::Session(format!("no card at {}", self.index)))?;

        let correct = says_scam == card.is_scam;
        let points = if correct {
            self.rules.flashcard_base_points + self.rules.flashcard_streak_bonus * self.streak
        } else {
            0
        };

        if correct {
            self.score += points;
            self.streak += 1;
        } else {
            self.streak = 0;
        }
        self.answers.push(correct);
        self.answered_current = true;

        debug!("Card {} answered, correct={}, +{}", card.id, correct, points);
        Ok(AnswerFeedback {
            correct,
            points,
            streak: self.streak,
            explanation: card.explanation.clone(),
        })
    }

    /// Moves past the answered card; finishing the deck ends the run.
    pub fn next(&mut self) -> SsResult<SessionState> {
        if self.state != SessionState::InProgress {
            return Err(ScamSmartError::Session("no flash card run in progress".into()));
        }
        if !self.answered_current {
            return Err(ScamSmartError::Session(
                "answer the current card first".into(),
            ));
        }
        self.answered_current = false;
        if self.index + 1 >= self.deck.len() {
            self.finish();
        } else {
            self.index += 1;
        }
        Ok(self.state)
    }

    /// Counts the clock down; hitting zero ends the run.
    pub fn tick(&mut self, secs: u32) {
        if self.state != SessionState::InProgress {
            return;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(secs);
        if self.remaining_secs == 0 {
            self.finish();
        }
    }

    pub fn restart(&mut self) {
        *self = Self::new(self.deck.clone(), self.rules.clone());
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn answered(&self) -> usize {
        self.answers.len()
    }

    pub fn correct(&self) -> usize {
        self.answers.iter().filter(|c| **c).count()
    }

    pub fn accuracy(&self) -> u32 {
        percent(self.correct() as u32, self.answers.len() as u32)
    }

    pub fn time_taken(&self) -> u32 {
        self.rules.flashcard_time_limit_secs - self.remaining_secs
    }

    /// The save request for a finished run; `None` while running or when
    /// nothing was answered.
    pub fn submission(&self) -> Option<ScoreSubmission> {
        if self.state != SessionState::Complete || self.answers.is_empty() {
            return None;
        }
        let correct = self.correct();
        Some(
            ScoreSubmission::new(GameType::FlashCard, i64::from(self.score))
                .with_accuracy(self.accuracy())
                .with_time_taken(self.time_taken())
                .with_metadata("total_cards", self.answers.len())
                .with_metadata("correct", correct)
                .with_metadata("incorrect", self.answers.len() - correct),
        )
    }

    fn finish(&mut self) {
        self.state = SessionState::Complete;
        info!(
            "Flash card run complete: score {}, {}/{} correct, {}s left",
            self.score,
            self.correct(),
            self.answers.len(),
            self.remaining_secs
        );
    }
}
