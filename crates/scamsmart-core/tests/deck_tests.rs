mod common;

use common::{legit, scam};
use regex::Regex;
use scamsmart_core::error::ScamSmartError;
use scamsmart_core::round::Classification;
use scamsmart_core::scenario::{Scenario, ScenarioDeck};
use scamsmart_core::tags::Vocabulary;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_fingerprint_is_sha256_hex() {
    let re = Regex::new(r"^[0-9a-f]{64}$").unwrap();
    assert!(re.is_match(&ScenarioDeck::builtin().unwrap().fingerprint()));
}

#[test]
fn test_tags_for_follows_the_call() {
    let s = scam(1, &["urgency", "threats"]);
    assert_eq!(s.tags_for(Classification::Unsafe).len(), 2);
    assert!(s.tags_for(Classification::Safe).is_empty());

    let l = legit(2, &["contact-info"]);
    assert!(l.tags_for(Classification::Unsafe).is_empty());
    assert!(l.tags_for(Classification::Safe).contains("contact-info"));
}

#[test]
fn test_builtin_tags_use_the_right_vocabulary() {
    for s in &ScenarioDeck::builtin().unwrap() {
        let vocab = Vocabulary::for_truth(s.is_scam);
        assert!(s.truth_tags().iter().all(|t| vocab.contains(t)), "{}", s.title);
    }
}

#[test]
fn test_validation_rules() {
    assert!(scam(1, &[]).validate().is_err());
    assert!(legit(1, &[]).validate().is_err());
    assert!(scam(1, &["made-up"]).validate().is_err());

    let blank = Scenario::builder()
        .title(" ")
        .content("body")
        .is_scam(true)
        .red_flags(&["urgency"])
        .build();
    assert!(matches!(blank.validate(), Err(ScamSmartError::Validation(_))));

    assert!(ScenarioDeck::new(vec![]).is_err());
}

#[test]
fn test_load_from_file_rejects_invalid_deck() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[{{"title": "t", "content": "c", "isScam": false, "safeIndicatorsPresent": ["urgency"]}}]"#
    )
    .unwrap();
    assert!(matches!(
        ScenarioDeck::load_from_file(file.path()),
        Err(ScamSmartError::Validation(_))
    ));
}

#[test]
fn test_load_from_file_round_trips_builtin() {
    let builtin = ScenarioDeck::builtin().unwrap();
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(serde_json::to_string(builtin.scenarios()).unwrap().as_bytes())
        .unwrap();
    let loaded = ScenarioDeck::load_from_file(file.path()).unwrap();
    assert_eq!(loaded.fingerprint(), builtin.fingerprint());
}

#[test]
fn test_builtin_deck_loads_every_scenario() {
    assert_eq!(ScenarioDeck::builtin().unwrap().len(), 6);

    // Bad bundled text surfaces as an error instead of an empty deck.
    assert!(matches!(ScenarioDeck::from_json("[]"), Err(ScamSmartError::Validation(_))));
    assert!(matches!(ScenarioDeck::from_json("[{"), Err(ScamSmartError::Json(_))));
}
