use crate::round::RoundSubmission;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum GameType {
    FlashCard,
    ScamBingo,
    StoryAdventure,
    ScamLadder,
}

impl GameType {
    /// Only the bingo and ladder games keep a ranking; other saves are just logged.
    pub fn has_leaderboard(self) -> bool {
        matches!(self, GameType::ScamBingo | GameType::ScamLadder)
    }

    /// Whether the ranking row carries the accuracy of the best run.
    pub fn tracks_accuracy(self) -> bool {
        matches!(self, GameType::ScamLadder)
    }
}

/// The single write a finished game hands to score storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSubmission {
    pub game_type: GameType,
    pub score: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_taken: Option<u32>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, Value>,
}

impl ScoreSubmission {
    pub fn new(game_type: GameType, score: i64) -> Self {
        Self {
            game_type,
            score,
            accuracy: None,
            time_taken: None,
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_accuracy(mut self, accuracy: u32) -> Self {
        self.accuracy = Some(accuracy);
        self
    }

    pub fn with_time_taken(mut self, secs: u32) -> Self {
        self.time_taken = Some(secs);
        self
    }

    pub fn with_metadata(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.to_string(), value.into());
        self
    }
}

/// Body of `POST /scores`. Bingo clients may attach their rounds for replay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveScoreRequest {
    #[serde(flatten)]
    pub submission: ScoreSubmission,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rounds: Option<Vec<RoundSubmission>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deck: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SaveOutcome {
    Inserted { score: i64 },
    Updated { previous: i64, score: i64 },
    Unchanged { best: i64, message: String },
    Logged,
}

impl SaveOutcome {
    pub fn updated(&self) -> bool {
        matches!(self, SaveOutcome::Updated { .. })
    }
}

/// The player a score belongs to, as handed over by the auth layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl Player {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            email: None,
        }
    }

    /// Name shown on the leaderboard: display name, then email, then id.
    pub fn display_name(&self) -> String {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .or(self.email.as_deref())
            .unwrap_or(&self.id)
            .to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub user_id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub score: i64,
    #[serde(default)]
    pub accuracy: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RankResponse {
    pub rank: Option<u64>,
    pub score: Option<i64>,
    #[serde(default)]
    pub accuracy: Option<u32>,
}
