use crate::auth::Caller;
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use scamsmart_core::scores::{GameType, LeaderboardEntry, RankResponse};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    pub limit: Option<usize>,
}

/// Resolves a path segment to a game that keeps a ranking.
fn ranked_game(raw: &str) -> AppResult<GameType> {
    let game: GameType = raw.parse().map_err(|_| AppError::NotFound)?;
    if !game.has_leaderboard() {
        return Err(AppError::Validation(format!(
            "{} has no leaderboard",
            game
        )));
    }
    Ok(game)
}

pub async fn top(
    State(state): State<Arc<AppState>>,
    Path(game): Path<String>,
    Query(query): Query<LeaderboardQuery>,
) -> AppResult<Json<Vec<LeaderboardEntry>>> {
    let game = ranked_game(&game)?;
    Ok(Json(state.store.top(game, query.limit).await?))
}

pub async fn rank(
    State(state): State<Arc<AppState>>,
    Path(game): Path<String>,
    Caller(player): Caller,
) -> AppResult<Json<RankResponse>> {
    let game = ranked_game(&game)?;
    Ok(Json(state.store.rank(game, &player.id).await?))
}
