use anyhow::Context;
use clap::Parser;
use scamsmart_core::config::ScoringRules;
use scamsmart_core::scenario::ScenarioDeck;
use scamsmart_hive::{build_app, db, state::AppState};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser)]
#[command(about = "ScamSmart leaderboard service")]
struct Args {
    #[arg(long, default_value = "sqlite://hive.db")]
    db: String,

    #[arg(long, default_value_t = 3000)]
    port: u16,

    #[arg(long, default_value_t = 5)]
    max_connections: u32,

    /// Scoring rules used when replaying attached rounds
    #[arg(long)]
    rules: Option<String>,

    /// Shared secret; falls back to SCAMSMART_HIVE_SECRET
    #[arg(long)]
    secret: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    info!("🐝 ScamSmart Hive is initializing...");

    let pool = db::init_db(&args.db, args.max_connections)
        .await
        .context("database initialisation failed")?;

    let rules = match &args.rules {
        Some(path) => ScoringRules::load_from_file(path).map_err(anyhow::Error::msg)?,
        None => ScoringRules::default(),
    };

    let secret = args
        .secret
        .or_else(|| std::env::var("SCAMSMART_HIVE_SECRET").ok())
        .filter(|s| !s.is_empty());
    if secret.is_none() {
        warn!("⚠️ No shared secret configured; score routes are open.");
    }

    let deck = ScenarioDeck::builtin().context("loading the builtin scenario deck")?;
    let state = Arc::new(AppState::new(pool, deck, rules, secret));
    let app = build_app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    info!("🚀 Hive listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("cannot bind {}", addr))?;
    axum::serve(listener, app).await?;
    Ok(())
}
