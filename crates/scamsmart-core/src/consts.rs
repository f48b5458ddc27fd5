/// Number of scenarios in one Red Flag Hunter playthrough.
pub const DEFAULT_SCENARIO_COUNT: usize = 6;

/// Number of two-option questions requested for a ladder game.
pub const DEFAULT_LADDER_QUESTION_COUNT: usize = 16;

/// Rows returned by a leaderboard query when the caller gives no limit.
pub const DEFAULT_LEADERBOARD_LIMIT: usize = 10;

/// Hard cap on leaderboard page size.
pub const MAX_LEADERBOARD_LIMIT: usize = 100;

/// Id of the node every story walk begins at.
pub const STORY_START_NODE: &str = "start";

/// Marker the generator is asked to prefix its scenario array with.
pub const SCENARIO_ARRAY_MARKER: &str = "const scenarios: Scenario[] =";

pub const UNCHANGED_SCORE_MESSAGE: &str = "Score not higher than existing record";
