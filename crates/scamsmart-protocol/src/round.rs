use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// A set of indicator ids. Ordered so that reports and hashes are stable.
pub type TagSet = BTreeSet<String>;

/// The player's binary call on a scenario.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Classification {
    Safe,
    Unsafe,
}

impl Classification {
    /// `Unsafe` is the right call for a scam, `Safe` for a legitimate message.
    pub fn is_correct_for(self, is_scam: bool) -> bool {
        matches!(
            (self, is_scam),
            (Classification::Unsafe, true) | (Classification::Safe, false)
        )
    }
}

/// What the player locked in for one scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSubmission {
    pub classification: Classification,
    #[serde(default)]
    pub selected: TagSet,
}

impl RoundSubmission {
    pub fn new<I, S>(classification: Classification, selected: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            classification,
            selected: selected.into_iter().map(Into::into).collect(),
        }
    }
}
