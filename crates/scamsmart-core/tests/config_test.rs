use clap::{CommandFactory, FromArgMatches, Parser};
use scamsmart_core::config::{Config, ScoringRules};
use std::io::Write;
use tempfile::NamedTempFile;

#[derive(Parser)]
struct TestCli {
    #[command(flatten)]
    config: Config,
}

fn parse(args: &[&str]) -> (Config, clap::ArgMatches) {
    let matches = TestCli::command().get_matches_from(args);
    let cli = TestCli::from_arg_matches(&matches).unwrap();
    (cli.config, matches)
}

#[test]
fn test_defaults_match_the_scoring_rules() {
    let rules = ScoringRules::default();
    assert_eq!(rules.classification_bonus, 20);
    assert_eq!(rules.points_per_correct_tag, 10);
    assert_eq!(rules.penalty_per_incorrect_tag, 5);
    assert_eq!(rules.penalty_per_missed_tag, 3);
    assert_eq!(rules.accuracy_unit(), 120);

    let (cli, _) = parse(&["test"]);
    assert_eq!(cli.scoring, rules);
    assert_eq!(cli.games.flashcard_time_limit_secs, 60);
    assert_eq!(cli.games.ladder_win_position, 15);
}

#[test]
fn test_partial_file_keeps_defaults() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"{{"scoring": {{"classification_bonus": 30}}}}"#).unwrap();
    let config = Config::load_from_file(file.path()).unwrap();
    assert_eq!(config.scoring.classification_bonus, 30);
    assert_eq!(config.scoring.points_per_correct_tag, 10);
    assert_eq!(config.games.ladder_correct_points, 100);
}

#[test]
fn test_cli_overrides_only_explicit_flags() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"scoring": {{"classification_bonus": 30, "penalty_per_missed_tag": 1}}}}"#
    )
    .unwrap();
    let mut config = Config::load_from_file(file.path()).unwrap();

    let (cli, matches) = parse(&["test", "--penalty-per-missed-tag", "7"]);
    config.merge_from_cli(&cli, &matches);

    // File value survives; clap default for the bonus does not clobber it.
    assert_eq!(config.scoring.classification_bonus, 30);
    assert_eq!(config.scoring.penalty_per_missed_tag, 7);
}

#[test]
fn test_bad_file_reports_error() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "not json").unwrap();
    let err = Config::load_from_file(file.path()).unwrap_err();
    assert!(err.contains("Failed to parse"));
    assert!(Config::load_from_file("/missing/rules.json").is_err());
}

#[test]
fn test_default_rules_are_valid() {
    assert!(ScoringRules::default().validate().is_ok());
    assert!(Config::default().validate().is_ok());
}

#[test]
fn test_oversized_weights_are_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"{{"scoring": {{"points_per_correct_tag": 4294967295}}}}"#).unwrap();
    let err = Config::load_from_file(file.path()).unwrap_err();
    assert!(err.contains("points_per_correct_tag"));

    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"{{"tags_per_vocabulary": 5000}}"#).unwrap();
    let err = ScoringRules::load_from_file(file.path()).unwrap_err();
    assert!(err.contains("tags_per_vocabulary"));
}

#[test]
fn test_oversized_flag_fails_validation_after_merge() {
    let mut config = Config::default();
    let (cli, matches) = parse(&["test", "--classification-bonus", "4294967295"]);
    config.merge_from_cli(&cli, &matches);
    let err = config.validate().unwrap_err();
    assert!(err.contains("classification_bonus"));
}
