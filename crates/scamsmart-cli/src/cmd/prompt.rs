use super::CmdResult;
use clap::{Args, ValueEnum};
use scamsmart_core::consts::{DEFAULT_LADDER_QUESTION_COUNT, DEFAULT_SCENARIO_COUNT};
use scamsmart_core::generation::GenerationRequest;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Scenarios,
    Ladder,
}

#[derive(Args, Debug, Clone)]
pub struct PromptArgs {
    #[arg(long, value_enum, default_value_t = PromptKind::Scenarios)]
    pub kind: PromptKind,

    /// Number of items to ask for; 6 scenarios or 16 questions by default
    #[arg(short, long)]
    pub count: Option<usize>,
}

pub fn run(args: &PromptArgs) -> CmdResult {
    let prompt = match args.kind {
        PromptKind::Scenarios => {
            GenerationRequest::scenario_prompt(args.count.unwrap_or(DEFAULT_SCENARIO_COUNT))
        }
        PromptKind::Ladder => {
            GenerationRequest::ladder_prompt(args.count.unwrap_or(DEFAULT_LADDER_QUESTION_COUNT))
        }
    };
    println!("{}", prompt);
    Ok(0)
}
