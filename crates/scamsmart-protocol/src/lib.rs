// Types shared between the core engine, the CLI and the leaderboard service.
pub mod config;
pub mod round;
pub mod scores;
