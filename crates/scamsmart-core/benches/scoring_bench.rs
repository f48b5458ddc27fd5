use criterion::{criterion_group, criterion_main, Criterion};
use scamsmart_core::config::ScoringRules;
use scamsmart_core::games::bingo::BingoSession;
use scamsmart_core::round::{Classification, RoundSubmission};
use scamsmart_core::scenario::ScenarioDeck;
use scamsmart_core::scoring::{score_round, score_scenario};
use scamsmart_core::tags::tag_set;
use std::hint::black_box;

fn criterion_benchmark(c: &mut Criterion) {
    let truth = tag_set(["urgency", "payment", "threats", "fake-authority"]);
    let picked = tag_set(["urgency", "grammar", "threats"]);

    c.bench_function("score_round", |b| {
        b.iter(|| {
            score_round(
                black_box(true),
                black_box(Classification::Unsafe),
                black_box(&truth),
                black_box(&picked),
            )
        })
    });

    let deck = ScenarioDeck::builtin().unwrap();
    let rules = ScoringRules::default();
    let rounds: Vec<RoundSubmission> = deck
        .iter()
        .map(|s| RoundSubmission {
            classification: if s.is_scam {
                Classification::Unsafe
            } else {
                Classification::Safe
            },
            selected: s.truth_tags().clone(),
        })
        .collect();

    c.bench_function("score_scenario (builtin deck)", |b| {
        b.iter(|| {
            deck.iter()
                .zip(&rounds)
                .map(|(s, r)| score_scenario(&rules, black_box(s), black_box(r)).total)
                .sum::<u32>()
        })
    });

    c.bench_function("bingo session (6 rounds)", |b| {
        b.iter(|| {
            let mut session = BingoSession::new(deck.clone(), rules.clone());
            session.start().expect("fresh session starts");
            for r in &rounds {
                session.choose(r.classification).expect("in progress");
                for tag in &r.selected {
                    session.toggle_tag(tag).expect("in progress");
                }
                black_box(session.submit().expect("classified"));
            }
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
