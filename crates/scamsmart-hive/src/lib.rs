pub mod auth;
pub mod db;
pub mod error;
pub mod routes;
pub mod state;
pub mod store;

use crate::state::AppState;
use axum::{middleware, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Score payloads carry at most a handful of rounds.
const MAX_BODY_BYTES: usize = 64 * 1024;

pub fn build_app(state: Arc<AppState>) -> Router {
    let guarded = routes::score_routes()
        .merge(routes::leaderboard_routes())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_secret,
        ));

    routes::system_routes()
        .merge(guarded)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
