pub mod leaderboard;
pub mod scores;
pub mod system;

use crate::state::AppState;
use axum::Router;
use std::sync::Arc;

pub fn system_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", axum::routing::get(system::root))
        .route("/health", axum::routing::get(system::health))
}

pub fn score_routes() -> Router<Arc<AppState>> {
    Router::new().route("/scores", axum::routing::post(scores::submit))
}

pub fn leaderboard_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/leaderboard/{game}", axum::routing::get(leaderboard::top))
        .route("/leaderboard/{game}/rank", axum::routing::get(leaderboard::rank))
}
