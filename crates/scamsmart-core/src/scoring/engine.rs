use super::types::RoundBreakdown;
use crate::config::ScoringRules;
use crate::round::{Classification, RoundSubmission, TagSet};
use crate::scenario::Scenario;

/// Scores one Red Flag Hunter round with the standard point values.
///
/// `ground_truth_tags` must already be the set implied by the player's own
/// classification (red flags for `Unsafe`, safety indicators for `Safe`).
/// Tags outside that set count as incorrect, whatever vocabulary they come from.
pub fn score_round(
    ground_truth_is_scam: bool,
    player_classification: Classification,
    ground_truth_tags: &TagSet,
    selected_tags: &TagSet,
) -> u32 {
    score_round_with(
        &ScoringRules::default(),
        ground_truth_is_scam,
        player_classification,
        ground_truth_tags,
        selected_tags,
    )
    .total
}

pub fn score_round_with(
    rules: &ScoringRules,
    ground_truth_is_scam: bool,
    player_classification: Classification,
    ground_truth_tags: &TagSet,
    selected_tags: &TagSet,
) -> RoundBreakdown {
    let classification_correct = player_classification.is_correct_for(ground_truth_is_scam);
    let classification_bonus = if classification_correct {
        rules.classification_bonus
    } else {
        0
    };

    let hits = selected_tags.intersection(ground_truth_tags).count();
    let correct = count_u32(hits);
    let incorrect = count_u32(selected_tags.len() - hits);
    let missed = count_u32(ground_truth_tags.len() - hits);

    let raw_tag_score = weighted(correct, rules.points_per_correct_tag)
        .saturating_sub(weighted(incorrect, rules.penalty_per_incorrect_tag))
        .saturating_sub(weighted(missed, rules.penalty_per_missed_tag));
    let tag_score = u32::try_from(raw_tag_score.max(0)).unwrap_or(u32::MAX);

    RoundBreakdown {
        classification_correct,
        classification_bonus,
        correct,
        incorrect,
        missed,
        tag_score,
        raw_tag_score,
        total: classification_bonus.saturating_add(tag_score),
    }
}

fn count_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

fn weighted(count: u32, points: u32) -> i64 {
    i64::from(count).saturating_mul(i64::from(points))
}

/// Scores a submission against a scenario, picking the tag set that matches
/// the player's classification.
pub fn score_scenario(
    rules: &ScoringRules,
    scenario: &Scenario,
    submission: &RoundSubmission,
) -> RoundBreakdown {
    score_round_with(
        rules,
        scenario.is_scam,
        submission.classification,
        scenario.tags_for(submission.classification),
        &submission.selected,
    )
}

/// Session accuracy in percent: the total measured against a perfect tag
/// score on every scenario, rounded and capped at 100.
pub fn bingo_accuracy(rules: &ScoringRules, total: u32, scenario_count: usize) -> u32 {
    let denominator = scenario_count as f64 * f64::from(rules.accuracy_unit());
    if denominator <= 0.0 {
        return 0;
    }
    let pct = (100.0 * f64::from(total) / denominator).round();
    pct.min(100.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::tag_set;

    #[test]
    fn empty_truth_only_penalises() {
        let truth = TagSet::new();
        let picked = tag_set(["urgency", "payment"]);
        let r = score_round_with(
            &ScoringRules::default(),
            true,
            Classification::Unsafe,
            &truth,
            &picked,
        );
        assert_eq!(r.missed, 0);
        assert_eq!(r.raw_tag_score, -10);
        assert_eq!(r.tag_score, 0);
        assert_eq!(r.total, 20);
    }

    #[test]
    fn accuracy_is_capped() {
        let rules = ScoringRules::default();
        assert_eq!(bingo_accuracy(&rules, 10_000, 1), 100);
        assert_eq!(bingo_accuracy(&rules, 0, 0), 0);
        // 6 scenarios * 120 = 720 -> 180/720 = 25%
        assert_eq!(bingo_accuracy(&rules, 180, 6), 25);
    }
}
