use super::{percent, SessionState};
use crate::config::GameRules;
use crate::error::{ScamSmartError, SsResult};
use crate::scores::{GameType, ScoreSubmission};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, info};

const BUILTIN_QUESTIONS: &str = include_str!("../../data/ladder_questions.json");

/// A two-option trivia question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LadderQuestion {
    #[serde(default)]
    pub id: u32,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
    #[serde(default)]
    pub explanation: String,
}

impl LadderQuestion {
    pub fn validate(&self) -> SsResult<()> {
        if self.question.trim().is_empty() {
            return Err(ScamSmartError::Validation(format!(
                "question {} has no text",
                self.id
            )));
        }
        if self.options.len() != 2 {
            return Err(ScamSmartError::Validation(format!(
                "question {} has {} options, expected 2",
                self.id,
                self.options.len()
            )));
        }
        if self.correct_answer >= self.options.len() {
            return Err(ScamSmartError::Validation(format!(
                "question {} marks option {} as correct",
                self.id, self.correct_answer
            )));
        }
        Ok(())
    }

    /// The sixteen questions shipped with the game.
    pub fn builtin() -> SsResult<Vec<LadderQuestion>> {
        Ok(serde_json::from_str(BUILTIN_QUESTIONS)?)
    }
}

/// What happened on one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnResult {
    pub correct: bool,
    /// Die roll, only thrown after a correct answer.
    pub roll: Option<u8>,
    pub score_delta: i64,
    pub position: u8,
    pub explanation: String,
    pub finished: bool,
}

/// Board game where right answers roll the die forward and wrong ones step back.
#[derive(Debug, Clone)]
pub struct LadderSession {
    questions: Vec<LadderQuestion>,
    rules: GameRules,
    rng: fastrand::Rng,
    state: SessionState,
    position: u8,
    score: i64,
    correct: u32,
    answered: u32,
    used: BTreeSet<usize>,
    current: Option<usize>,
}

impl LadderSession {
    pub fn new(questions: Vec<LadderQuestion>, rules: GameRules, seed: u64) -> SsResult<Self> {
        if questions.is_empty() {
            return Err(ScamSmartError::Validation(
                "a ladder game needs at least one question".into(),
            ));
        }
        for q in &questions {
            q.validate()?;
        }
        if rules.ladder_win_position == 0 || rules.ladder_win_position >= rules.ladder_board_size
        {
            return Err(ScamSmartError::Config(format!(
                "win position {} does not fit a board of {}",
                rules.ladder_win_position, rules.ladder_board_size
            )));
        }
        if rules.ladder_die_faces == 0 {
            return Err(ScamSmartError::Config("the die needs at least one face".into()));
        }

        Ok(Self {
            questions,
            rules,
            rng: fastrand::Rng::with_seed(seed),
            state: SessionState::Ready,
            position: 0,
            score: 0,
            correct: 0,
            answered: 0,
            used: BTreeSet::new(),
            current: None,
        })
    }

    pub fn with_builtin(rules: GameRules, seed: u64) -> SsResult<Self> {
        Self::new(LadderQuestion::builtin()?, rules, seed)
    }

    pub fn start(&mut self) -> SsResult<()> {
        if self.state != SessionState::Ready {
            return Err(ScamSmartError::Session(format!(
                "cannot start a ladder game that is {:?}",
                self.state
            )));
        }
        self.state = SessionState::InProgress;
        self.present_question();
        Ok(())
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn current_question(&self) -> Option<&LadderQuestion> {
        self.current.and_then(|i| self.questions.get(i))
    }

    /// Answers the current question with option `choice` and plays out the move.
    pub fn answer(&mut self, choice: usize) -> SsResult<TurnResult> {
        if self.state != SessionState::InProgress {
            return Err(ScamSmartError::Session("no ladder game in progress".into()));
        }
        let idx = self
            .current
            .ok_or_else(|| ScamSmartError::Session("no question on the table".into()))?;
        let question = &self.questions[idx];
        if choice >= question.options.len() {
            return Err(ScamSmartError::Session(format!(
                "option {} does not exist",
                choice
            )));
        }

        let correct = choice == question.correct_answer;
        let explanation = question.explanation.clone();
        self.answered += 1;
        self.used.insert(idx);

        let (roll, score_delta) = if correct {
            self.correct += 1;
            let roll = self.rng.u8(1..=self.rules.ladder_die_faces);
            self.position = self
                .position
                .saturating_add(roll)
                .min(self.rules.ladder_win_position);
            (Some(roll), self.rules.ladder_correct_points)
        } else {
            self.position = self.position.saturating_sub(1);
            (None, -self.rules.ladder_wrong_penalty)
        };
        self.score += score_delta;

        debug!(
            "Ladder turn: correct={}, roll={:?}, position={}, score={}",
            correct, roll, self.position, self.score
        );

        let finished = self.position >= self.rules.ladder_win_position;
        if finished {
            self.state = SessionState::Complete;
            self.current = None;
            info!(
                "Ladder complete: score {}, {}/{} correct",
                self.score, self.correct, self.answered
            );
        } else {
            self.present_question();
        }

        Ok(TurnResult {
            correct,
            roll,
            score_delta,
            position: self.position,
            explanation,
            finished,
        })
    }

    pub fn restart(&mut self) {
        self.state = SessionState::Ready;
        self.position = 0;
        self.score = 0;
        self.correct = 0;
        self.answered = 0;
        self.used.clear();
        self.current = None;
    }

    pub fn position(&self) -> u8 {
        self.position
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn answered(&self) -> u32 {
        self.answered
    }

    pub fn correct(&self) -> u32 {
        self.correct
    }

    pub fn accuracy(&self) -> u32 {
        percent(self.correct, self.answered)
    }

    pub fn submission(&self) -> Option<ScoreSubmission> {
        (self.state == SessionState::Complete).then(|| {
            ScoreSubmission::new(GameType::ScamLadder, self.score)
                .with_accuracy(self.accuracy())
                .with_time_taken(0)
                .with_metadata("scenarios_completed", self.answered)
        })
    }

    fn present_question(&mut self) {
        let mut pool: Vec<usize> = (0..self.questions.len())
            .filter(|i| !self.used.contains(i))
            .collect();
        if pool.is_empty() {
            self.used.clear();
            pool = (0..self.questions.len()).collect();
        }
        self.current = Some(pool[self.rng.usize(..pool.len())]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_questions_are_valid() {
        let qs = LadderQuestion::builtin().unwrap();
        assert_eq!(qs.len(), crate::consts::DEFAULT_LADDER_QUESTION_COUNT);
        for q in &qs {
            q.validate().unwrap();
        }
    }

    #[test]
    fn three_options_rejected() {
        let q = LadderQuestion {
            id: 1,
            question: "?".into(),
            options: vec!["a".into(), "b".into(), "c".into()],
            correct_answer: 0,
            explanation: String::new(),
        };
        assert!(q.validate().is_err());
    }
}
