use super::CmdResult;
use crate::reports;
use clap::Args;
use scamsmart_core::config::Config;
use scamsmart_core::error::ScamSmartError;
use scamsmart_core::round::Classification;
use scamsmart_core::scoring::score_round_with;
use scamsmart_core::tags::{parse_tag_list, Vocabulary};
use tracing::warn;

#[derive(Args, Debug, Clone)]
pub struct ScoreArgs {
    #[command(flatten)]
    pub config: Config,

    /// The scenario is a scam
    #[arg(long, conflicts_with = "legit")]
    pub scam: bool,

    /// The scenario is legitimate
    #[arg(long)]
    pub legit: bool,

    /// The player's call: safe or unsafe
    #[arg(long)]
    pub classification: Classification,

    /// Ground-truth tags for the player's call, comma separated
    #[arg(long, default_value = "")]
    pub truth: String,

    /// Tags the player selected, comma separated
    #[arg(long, default_value = "")]
    pub selected: String,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: &ScoreArgs, config: &Config) -> CmdResult {
    if !args.scam && !args.legit {
        return Err(ScamSmartError::Validation(
            "pass --scam or --legit to set the ground truth".into(),
        ));
    }
    let truth = parse_tag_list(&args.truth);
    let selected = parse_tag_list(&args.selected);

    for tag in selected.iter().filter(|t| Vocabulary::of(t).is_none()) {
        warn!("'{}' is not a known indicator; it will count as incorrect", tag);
    }

    let breakdown = score_round_with(
        &config.scoring,
        args.scam,
        args.classification,
        &truth,
        &selected,
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&breakdown)?);
    } else {
        println!("{}", reports::round_table(&breakdown));
    }
    Ok(0)
}
