use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Upper bound on any single point value or penalty in [`ScoringRules`].
pub const MAX_RULE_POINTS: u32 = 10_000;

/// Upper bound on [`ScoringRules::tags_per_vocabulary`].
pub const MAX_TAGS_PER_VOCABULARY: u32 = 1_000;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[command(flatten)]
    #[serde(default)]
    pub scoring: ScoringRules,
    #[command(flatten)]
    #[serde(default)]
    pub games: GameRules,
}

/// Point values used by the Red Flag Hunter round scorer.
#[derive(Args, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringRules {
    /// Awarded when the safe/unsafe call matches the scenario.
    #[arg(long, default_value_t = 20)]
    pub classification_bonus: u32,
    #[arg(long, default_value_t = 10)]
    pub points_per_correct_tag: u32,
    #[arg(long, default_value_t = 5)]
    pub penalty_per_incorrect_tag: u32,
    #[arg(long, default_value_t = 3)]
    pub penalty_per_missed_tag: u32,

    // Size of each indicator vocabulary; drives the accuracy denominator.
    #[arg(long, default_value_t = 12)]
    pub tags_per_vocabulary: u32,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            classification_bonus: 20,
            points_per_correct_tag: 10,
            penalty_per_incorrect_tag: 5,
            penalty_per_missed_tag: 3,
            tags_per_vocabulary: 12,
        }
    }
}

#[derive(Args, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameRules {
    // === FLASH CARDS ===
    #[arg(long, default_value_t = 60)]
    pub flashcard_time_limit_secs: u32,
    #[arg(long, default_value_t = 10)]
    pub flashcard_base_points: u32,
    #[arg(long, default_value_t = 2)]
    pub flashcard_streak_bonus: u32,

    // === LADDER ===
    #[arg(long, default_value_t = 16)]
    pub ladder_board_size: u8,
    #[arg(long, default_value_t = 15)]
    pub ladder_win_position: u8,
    #[arg(long, default_value_t = 100)]
    pub ladder_correct_points: i64,
    #[arg(long, default_value_t = 50)]
    pub ladder_wrong_penalty: i64,
    #[arg(long, default_value_t = 6)]
    pub ladder_die_faces: u8,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            flashcard_time_limit_secs: 60,
            flashcard_base_points: 10,
            flashcard_streak_bonus: 2,
            ladder_board_size: 16,
            ladder_win_position: 15,
            ladder_correct_points: 100,
            ladder_wrong_penalty: 50,
            ladder_die_faces: 6,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read rules file {:?}: {}", path.as_ref(), e))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| format!("Failed to parse rules JSON: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        self.scoring.validate()
    }

    /// Copies values the user typed on the command line over the loaded ones.
    /// Defaults filled in by clap never win over the file.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        self.scoring.merge_from_cli(&cli.scoring, matches);
        self.games.merge_from_cli(&cli.games, matches);
    }
}

macro_rules! update_if_present {
    ($target:ident, $source:ident, $matches:ident, $($field:ident),+ $(,)?) => {
        $(
            if $matches.try_get_raw(stringify!($field)).is_ok()
                && $matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine)
            {
                $target.$field = $source.$field.clone();
            }
        )+
    };
}

impl ScoringRules {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read scoring rules {:?}: {}", path.as_ref(), e))?;

        let rules: ScoringRules = serde_json::from_str(&content)
            .map_err(|e| format!("Failed to parse scoring JSON: {}", e))?;
        rules.validate()?;
        Ok(rules)
    }

    /// Rejects weights large enough to push round totals out of range.
    pub fn validate(&self) -> Result<(), String> {
        let points = [
            ("classification_bonus", self.classification_bonus),
            ("points_per_correct_tag", self.points_per_correct_tag),
            ("penalty_per_incorrect_tag", self.penalty_per_incorrect_tag),
            ("penalty_per_missed_tag", self.penalty_per_missed_tag),
        ];
        if let Some((name, value)) = points.iter().find(|(_, v)| *v > MAX_RULE_POINTS) {
            return Err(format!(
                "{} = {} exceeds the maximum of {}",
                name, value, MAX_RULE_POINTS
            ));
        }
        if self.tags_per_vocabulary > MAX_TAGS_PER_VOCABULARY {
            return Err(format!(
                "tags_per_vocabulary = {} exceeds the maximum of {}",
                self.tags_per_vocabulary, MAX_TAGS_PER_VOCABULARY
            ));
        }
        Ok(())
    }

    pub fn merge_from_cli(&mut self, cli: &ScoringRules, matches: &ArgMatches) {
        update_if_present!(
            self,
            cli,
            matches,
            classification_bonus,
            points_per_correct_tag,
            penalty_per_incorrect_tag,
            penalty_per_missed_tag,
            tags_per_vocabulary,
        );
    }

    /// Best tag score a single round can reach, used as the accuracy unit.
    pub fn accuracy_unit(&self) -> u32 {
        self.points_per_correct_tag
            .saturating_mul(self.tags_per_vocabulary)
    }
}

impl GameRules {
    pub fn merge_from_cli(&mut self, cli: &GameRules, matches: &ArgMatches) {
        update_if_present!(
            self,
            cli,
            matches,
            flashcard_time_limit_secs,
            flashcard_base_points,
            flashcard_streak_bonus,
            ladder_board_size,
            ladder_win_position,
            ladder_correct_points,
            ladder_wrong_penalty,
            ladder_die_faces,
        );
    }
}
