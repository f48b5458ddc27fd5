use crate::consts::{DEFAULT_LEADERBOARD_LIMIT, MAX_LEADERBOARD_LIMIT, UNCHANGED_SCORE_MESSAGE};
use crate::error::SsResult;
use crate::scores::{
    GameType, LeaderboardEntry, Player, RankResponse, SaveOutcome, ScoreSubmission,
};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// What a keep-highest save should do with the stored row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Insert,
    Update { previous: i64 },
    Keep { best: i64 },
}

/// Only a strictly higher score replaces the stored best.
pub fn decide_upsert(existing: Option<i64>, new_score: i64) -> Upsert {
    match existing {
        None => Upsert::Insert,
        Some(previous) if new_score > previous => Upsert::Update { previous },
        Some(best) => Upsert::Keep { best },
    }
}

/// Clamps a requested page size to `1..=MAX_LEADERBOARD_LIMIT`.
pub fn clamp_limit(limit: Option<usize>) -> usize {
    limit
        .unwrap_or(DEFAULT_LEADERBOARD_LIMIT)
        .clamp(1, MAX_LEADERBOARD_LIMIT)
}

/// Storage behind the ranked games.
pub trait ScoreStore {
    fn best(&self, game: GameType, user_id: &str) -> SsResult<Option<LeaderboardEntry>>;
    fn insert(&mut self, game: GameType, entry: LeaderboardEntry) -> SsResult<()>;
    fn update(
        &mut self,
        game: GameType,
        user_id: &str,
        score: i64,
        accuracy: Option<u32>,
    ) -> SsResult<()>;
    /// Highest scores first.
    fn top(&self, game: GameType, limit: usize) -> SsResult<Vec<LeaderboardEntry>>;
    fn count_higher(&self, game: GameType, score: i64) -> SsResult<u64>;
}

/// In-process store, one row per (game, user).
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    rows: BTreeMap<(GameType, String), LeaderboardEntry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl ScoreStore for MemoryStore {
    fn best(&self, game: GameType, user_id: &str) -> SsResult<Option<LeaderboardEntry>> {
        Ok(self.rows.get(&(game, user_id.to_string())).cloned())
    }

    fn insert(&mut self, game: GameType, entry: LeaderboardEntry) -> SsResult<()> {
        self.rows.insert((game, entry.user_id.clone()), entry);
        Ok(())
    }

    fn update(
        &mut self,
        game: GameType,
        user_id: &str,
        score: i64,
        accuracy: Option<u32>,
    ) -> SsResult<()> {
        if let Some(row) = self.rows.get_mut(&(game, user_id.to_string())) {
            row.score = score;
            if accuracy.is_some() {
                row.accuracy = accuracy;
            }
        }
        Ok(())
    }

    fn top(&self, game: GameType, limit: usize) -> SsResult<Vec<LeaderboardEntry>> {
        let mut entries: Vec<LeaderboardEntry> = self
            .rows
            .iter()
            .filter(|((g, _), _)| *g == game)
            .map(|(_, e)| e.clone())
            .collect();
        entries.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.user_id.cmp(&b.user_id)));
        entries.truncate(limit);
        Ok(entries)
    }

    fn count_higher(&self, game: GameType, score: i64) -> SsResult<u64> {
        Ok(self
            .rows
            .iter()
            .filter(|((g, _), e)| *g == game && e.score > score)
            .count() as u64)
    }
}

/// Keep-highest score persistence and ranking over any [`ScoreStore`].
#[derive(Debug, Default)]
pub struct Leaderboard<S: ScoreStore> {
    store: S,
}

impl<S: ScoreStore> Leaderboard<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn save(&mut self, player: &Player, submission: &ScoreSubmission) -> SsResult<SaveOutcome> {
        let game = submission.game_type;
        if !game.has_leaderboard() {
            info!(
                "Score for {} from {}: {} (not ranked)",
                game, player.id, submission.score
            );
            return Ok(SaveOutcome::Logged);
        }

        let accuracy = game
            .tracks_accuracy()
            .then(|| submission.accuracy.unwrap_or(0));
        let existing = self.store.best(game, &player.id)?;

        match decide_upsert(existing.as_ref().map(|e| e.score), submission.score) {
            Upsert::Insert => {
                self.store.insert(
                    game,
                    LeaderboardEntry {
                        user_id: player.id.clone(),
                        name: player.display_name(),
                        email: player.email.clone(),
                        score: submission.score,
                        accuracy,
                    },
                )?;
                info!("New {} record for {}: {}", game, player.id, submission.score);
                Ok(SaveOutcome::Inserted {
                    score: submission.score,
                })
            }
            Upsert::Update { previous } => {
                self.store
                    .update(game, &player.id, submission.score, accuracy)?;
                info!(
                    "{} best for {} raised {} -> {}",
                    game, player.id, previous, submission.score
                );
                Ok(SaveOutcome::Updated {
                    previous,
                    score: submission.score,
                })
            }
            Upsert::Keep { best } => {
                debug!(
                    "{} score {} for {} does not beat {}",
                    game, submission.score, player.id, best
                );
                Ok(SaveOutcome::Unchanged {
                    best,
                    message: UNCHANGED_SCORE_MESSAGE.to_string(),
                })
            }
        }
    }

    pub fn top(&self, game: GameType, limit: Option<usize>) -> SsResult<Vec<LeaderboardEntry>> {
        self.store.top(game, clamp_limit(limit))
    }

    /// 1 + the number of strictly higher scores; ties share a rank.
    pub fn rank(&self, game: GameType, user_id: &str) -> SsResult<RankResponse> {
        let Some(entry) = self.store.best(game, user_id)? else {
            return Ok(RankResponse::default());
        };
        let higher = self.store.count_higher(game, entry.score)?;
        debug!("{} rank for {}: {}", game, user_id, higher + 1);
        Ok(RankResponse {
            rank: Some(higher + 1),
            score: Some(entry.score),
            accuracy: entry.accuracy,
        })
    }
}
