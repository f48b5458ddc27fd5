use chrono::Utc;
use scamsmart_core::consts::UNCHANGED_SCORE_MESSAGE;
use scamsmart_core::leaderboard::{clamp_limit, decide_upsert, Upsert};
use scamsmart_core::scores::{
    GameType, LeaderboardEntry, Player, RankResponse, SaveOutcome, ScoreSubmission,
};
use sqlx::sqlite::SqliteRow;
use sqlx::{Pool, Row, Sqlite};
use tracing::{debug, info};

#[derive(Clone)]
pub struct Store {
    pub db: Pool<Sqlite>,
}

fn entry_from_row(row: &SqliteRow) -> LeaderboardEntry {
    let accuracy: Option<i64> = row.get("accuracy");
    LeaderboardEntry {
        user_id: row.get("user_id"),
        name: row.get("name"),
        email: row.get("email"),
        score: row.get("score"),
        accuracy: accuracy.and_then(|a| u32::try_from(a).ok()),
    }
}

impl Store {
    pub fn new(db: Pool<Sqlite>) -> Self {
        Self { db }
    }

    pub async fn best(
        &self,
        game: GameType,
        user_id: &str,
    ) -> Result<Option<LeaderboardEntry>, sqlx::Error> {
        let row = sqlx::query(
            "SELECT user_id, name, email, score, accuracy FROM rankings WHERE game = ? AND user_id = ?",
        )
        .bind(game.to_string())
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(row.as_ref().map(entry_from_row))
    }

    /// Logs the save, then keeps the player's ranking row at their highest score.
    pub async fn save(
        &self,
        player: &Player,
        submission: &ScoreSubmission,
    ) -> Result<SaveOutcome, sqlx::Error> {
        let game = submission.game_type;
        let now = Utc::now();
        let mut tx = self.db.begin().await?;

        let metadata = serde_json::Value::Object(submission.metadata.clone().into_iter().collect());
        sqlx::query(
            "INSERT INTO score_log (game, user_id, score, accuracy, time_taken, metadata, created_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(game.to_string())
        .bind(&player.id)
        .bind(submission.score)
        .bind(submission.accuracy.map(i64::from))
        .bind(submission.time_taken.map(i64::from))
        .bind(metadata.to_string())
        .bind(now)
        .execute(&mut *tx)
        .await?;

        if !game.has_leaderboard() {
            tx.commit().await?;
            info!(
                "Score for {} from {}: {} (not ranked)",
                game, player.id, submission.score
            );
            return Ok(SaveOutcome::Logged);
        }

        let accuracy = game
            .tracks_accuracy()
            .then(|| i64::from(submission.accuracy.unwrap_or(0)));
        let existing: Option<i64> =
            sqlx::query_scalar("SELECT score FROM rankings WHERE game = ? AND user_id = ?")
                .bind(game.to_string())
                .bind(&player.id)
                .fetch_optional(&mut *tx)
                .await?;

        let decision = decide_upsert(existing, submission.score);
        if !matches!(decision, Upsert::Keep { .. }) {
            // The WHERE guard keeps the row at its maximum even if a racing save landed first.
            sqlx::query(
                "INSERT INTO rankings (game, user_id, name, email, score, accuracy, updated_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?)
                 ON CONFLICT (game, user_id) DO UPDATE SET
                    score = excluded.score,
                    accuracy = COALESCE(excluded.accuracy, rankings.accuracy),
                    updated_at = excluded.updated_at
                 WHERE excluded.score > rankings.score",
            )
            .bind(game.to_string())
            .bind(&player.id)
            .bind(player.display_name())
            .bind(&player.email)
            .bind(submission.score)
            .bind(accuracy)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        Ok(match decision {
            Upsert::Insert => {
                info!("New {} record for {}: {}", game, player.id, submission.score);
                SaveOutcome::Inserted {
                    score: submission.score,
                }
            }
            Upsert::Update { previous } => {
                info!(
                    "{} best for {} raised {} -> {}",
                    game, player.id, previous, submission.score
                );
                SaveOutcome::Updated {
                    previous,
                    score: submission.score,
                }
            }
            Upsert::Keep { best } => {
                debug!(
                    "{} score {} for {} does not beat {}",
                    game, submission.score, player.id, best
                );
                SaveOutcome::Unchanged {
                    best,
                    message: UNCHANGED_SCORE_MESSAGE.to_string(),
                }
            }
        })
    }

    /// Highest scores first; ties ordered by user id.
    pub async fn top(
        &self,
        game: GameType,
        limit: Option<usize>,
    ) -> Result<Vec<LeaderboardEntry>, sqlx::Error> {
        let limit = clamp_limit(limit) as i64;
        let rows = sqlx::query(
            "SELECT user_id, name, email, score, accuracy FROM rankings WHERE game = ? ORDER BY score DESC, user_id ASC LIMIT ?",
        )
        .bind(game.to_string())
        .bind(limit)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.iter().map(entry_from_row).collect())
    }

    /// 1 + the number of strictly higher scores; empty when the player has no row.
    pub async fn rank(&self, game: GameType, user_id: &str) -> Result<RankResponse, sqlx::Error> {
        let Some(entry) = self.best(game, user_id).await? else {
            return Ok(RankResponse::default());
        };

        let higher: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM rankings WHERE game = ? AND score > ?")
                .bind(game.to_string())
                .bind(entry.score)
                .fetch_one(&self.db)
                .await?;

        Ok(RankResponse {
            rank: Some(higher as u64 + 1),
            score: Some(entry.score),
            accuracy: entry.accuracy,
        })
    }

    pub async fn log_count(&self, user_id: &str) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM score_log WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(&self.db)
            .await
    }
}
