use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use scamsmart_core::config::Config;
use scamsmart_core::error::{ScamSmartError, SsResult};
use std::process;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about = "Scam awareness games and scoring tools", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file with scoring and game rules; explicit flags still win.
    #[arg(global = true, long)]
    rules: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score a single Red Flag Hunter round
    Score(cmd::score::ScoreArgs),
    /// Check a scenario deck
    Validate(cmd::validate::ValidateArgs),
    /// Play Red Flag Hunter in the terminal
    Play(cmd::play::PlayArgs),
    /// Re-score a recorded session
    Replay(cmd::replay::ReplayArgs),
    /// Print a generation prompt
    Prompt(cmd::prompt::PromptArgs),
}

/// File rules first, then any flag the user typed on top.
fn resolve_config(
    cli_config: &Config,
    rules: Option<&str>,
    sub_matches: &ArgMatches,
) -> SsResult<Config> {
    let config = match rules {
        Some(path) => {
            info!("Loading rules from: {}", path);
            let mut config = Config::load_from_file(path).map_err(ScamSmartError::Config)?;
            config.merge_from_cli(cli_config, sub_matches);
            config
        }
        None => cli_config.clone(),
    };
    config.validate().map_err(ScamSmartError::Config)?;
    Ok(config)
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    tracing_subscriber::fmt()
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    let rules = cli.rules.as_deref();
    let result = match cli.command {
        Commands::Score(args) => {
            let sub = matches.subcommand_matches("score").unwrap_or(&matches);
            resolve_config(&args.config, rules, sub)
                .and_then(|config| cmd::score::run(&args, &config))
        }
        Commands::Validate(args) => cmd::validate::run(&args),
        Commands::Play(args) => {
            let sub = matches.subcommand_matches("play").unwrap_or(&matches);
            resolve_config(&args.config, rules, sub)
                .and_then(|config| cmd::play::run(&args, &config))
        }
        Commands::Replay(args) => {
            let sub = matches.subcommand_matches("replay").unwrap_or(&matches);
            resolve_config(&args.config, rules, sub)
                .and_then(|config| cmd::replay::run(&args, &config))
        }
        Commands::Prompt(args) => cmd::prompt::run(&args),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    }
}
