use serde::{Deserialize, Serialize};

/// Every term that went into one round score.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundBreakdown {
    pub classification_correct: bool,
    pub classification_bonus: u32,

    // Tag counts against the set implied by the player's call
    pub correct: u32,
    pub incorrect: u32,
    pub missed: u32,

    /// Tag component after the clamp at zero.
    pub tag_score: u32,
    /// Tag component before the clamp; negative when penalties dominate.
    pub raw_tag_score: i64,

    pub total: u32,
}

/// Running sums across the rounds of one session.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionTally {
    pub rounds: u32,
    pub total: u32,
    pub correct_classifications: u32,
    pub correct_tags: u32,
    pub incorrect_tags: u32,
    pub missed_tags: u32,
}

impl SessionTally {
    pub fn add(&mut self, round: &RoundBreakdown) {
        self.rounds = self.rounds.saturating_add(1);
        self.total = self.total.saturating_add(round.total);
        if round.classification_correct {
            self.correct_classifications = self.correct_classifications.saturating_add(1);
        }
        self.correct_tags = self.correct_tags.saturating_add(round.correct);
        self.incorrect_tags = self.incorrect_tags.saturating_add(round.incorrect);
        self.missed_tags = self.missed_tags.saturating_add(round.missed);
    }
}

impl<'a> FromIterator<&'a RoundBreakdown> for SessionTally {
    fn from_iter<T: IntoIterator<Item = &'a RoundBreakdown>>(iter: T) -> Self {
        let mut tally = SessionTally::default();
        for round in iter {
            tally.add(round);
        }
        tally
    }
}
