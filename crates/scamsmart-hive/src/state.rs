use crate::store::Store;
use scamsmart_core::config::ScoringRules;
use scamsmart_core::scenario::ScenarioDeck;
use sqlx::{Pool, Sqlite};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    /// Deck attached bingo rounds are replayed against.
    pub deck: Arc<ScenarioDeck>,
    pub rules: ScoringRules,
    /// When set, every score and leaderboard route requires `X-ScamSmart-Secret`.
    pub api_secret: Option<String>,
}

impl AppState {
    pub fn new(
        db: Pool<Sqlite>,
        deck: ScenarioDeck,
        rules: ScoringRules,
        api_secret: Option<String>,
    ) -> Self {
        Self {
            store: Store::new(db),
            deck: Arc::new(deck),
            rules,
            api_secret,
        }
    }
}
