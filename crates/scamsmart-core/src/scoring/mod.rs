pub mod engine;
pub mod types;

pub use self::engine::{bingo_accuracy, score_round, score_round_with, score_scenario};
pub use self::types::{RoundBreakdown, SessionTally};
