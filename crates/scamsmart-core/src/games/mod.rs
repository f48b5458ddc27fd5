pub mod bingo;
pub mod flashcards;
pub mod ladder;
pub mod story;

pub use bingo::{BingoSession, ScoreReport, SubmitOutcome};
pub use flashcards::{FlashCard, FlashCardDeck, FlashCardSession};
pub use ladder::{LadderQuestion, LadderSession, TurnResult};
pub use story::{Outcome, StoryGraph, StoryWalk};

/// Lifecycle shared by the timed games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Ready,
    InProgress,
    Complete,
}

/// `round(100 * part / whole)`, or 0 when `whole` is 0.
pub(crate) fn percent(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    (100.0 * f64::from(part) / f64::from(whole)).round() as u32
}
