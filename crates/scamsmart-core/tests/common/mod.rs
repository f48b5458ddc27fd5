#![allow(dead_code)]

use scamsmart_core::games::bingo::{BingoSession, SubmitOutcome};
use scamsmart_core::round::{Classification, RoundSubmission};
use scamsmart_core::scenario::{Scenario, ScenarioDeck};

pub fn scam(id: u32, flags: &[&str]) -> Scenario {
    Scenario::builder()
        .id(id)
        .title(format!("Scam {}", id))
        .content("Act now or lose your account!")
        .is_scam(true)
        .red_flags(flags)
        .build()
}

pub fn legit(id: u32, indicators: &[&str]) -> Scenario {
    Scenario::builder()
        .id(id)
        .title(format!("Legit {}", id))
        .content("Your order has shipped.")
        .is_scam(false)
        .safe_indicators(indicators)
        .build()
}

/// Two scenarios: a scam with `{urgency, payment}` and a legit one with `{no-pressure}`.
pub fn small_deck() -> ScenarioDeck {
    ScenarioDeck::new(vec![
        scam(1, &["urgency", "payment"]),
        legit(2, &["no-pressure"]),
    ])
    .expect("valid deck")
}

pub fn round(classification: Classification, tags: &[&str]) -> RoundSubmission {
    RoundSubmission::new(classification, tags.iter().copied())
}

/// Plays every round through the session and returns the last outcome.
pub fn play_all(session: &mut BingoSession, rounds: &[RoundSubmission]) -> SubmitOutcome {
    let mut last = None;
    for r in rounds {
        session.choose(r.classification).unwrap();
        for tag in &r.selected {
            session.toggle_tag(tag).unwrap();
        }
        last = Some(session.submit().unwrap());
    }
    last.expect("at least one round")
}
