pub mod play;
pub mod prompt;
pub mod replay;
pub mod score;
pub mod validate;

use scamsmart_core::error::SsResult;
use scamsmart_core::generation::{resolve_deck, BuiltinSource, GeneratedTextSource};
use scamsmart_core::scenario::ScenarioDeck;

/// Exit code a subcommand hands back to `main`.
pub type CmdResult = SsResult<i32>;

/// Picks the deck for a session: a scenario file, generator output, or the builtin deck.
pub fn load_deck(scenarios: Option<&str>, generated: Option<&str>) -> SsResult<ScenarioDeck> {
    if let Some(path) = scenarios {
        return ScenarioDeck::load_from_file(path);
    }
    if let Some(path) = generated {
        let text = std::fs::read_to_string(path)?;
        return resolve_deck(&GeneratedTextSource::new(text));
    }
    resolve_deck(&BuiltinSource)
}
