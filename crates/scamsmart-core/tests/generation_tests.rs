use scamsmart_core::error::ScamSmartError;
use scamsmart_core::generation::{
    parse_generated_scenarios, resolve_deck, BuiltinSource, FileSource, GeneratedTextSource,
    GenerationRequest, ScenarioSource,
};
use scamsmart_core::scenario::ScenarioDeck;
use std::io::Write;
use tempfile::NamedTempFile;

const GENERATED_TS: &str = r#"Here are your scenarios:

```typescript
const scenarios: Scenario[] = [
  {
    "id": 1,
    "title": "Lottery Text",
    "content": "You won! Send a $20 fee in gift cards.",
    "isScam": true,
    "redFlagsPresent": ["too-good", "payment"],
    "safeIndicatorsPresent": []
  },
  {
    "title": "Dentist Reminder",
    "content": "Reminder: cleaning on Tuesday at 3pm. Call the office to reschedule.",
    "isScam": false,
    "redFlagsPresent": [],
    "safeIndicatorsPresent": ["expected-communication", "contact-info"]
  }
];
```"#;

#[test]
fn test_parse_marker_form() {
    let scenarios = parse_generated_scenarios(GENERATED_TS).unwrap();
    assert_eq!(scenarios.len(), 2);
    assert!(scenarios[0].is_scam);
    assert!(scenarios[0].red_flags.contains("payment"));
    // Missing ids are numbered by position.
    assert_eq!(scenarios[1].id, 2);
    assert!(scenarios[1].safe_indicators.contains("contact-info"));
}

#[test]
fn test_parse_bare_array() {
    let text = r#"[{"title": "t", "content": "c", "isScam": true, "redFlagsPresent": ["urgency"]}]"#;
    let scenarios = parse_generated_scenarios(text).unwrap();
    assert_eq!(scenarios[0].id, 1);
    assert!(scenarios[0].safe_indicators.is_empty());
}

#[test]
fn test_parse_failures_are_generation_errors() {
    for text in ["I cannot help with that.", "[not json]", "[]"] {
        assert!(
            matches!(
                parse_generated_scenarios(text),
                Err(ScamSmartError::Generation(_))
            ),
            "{text}"
        );
    }
}

#[test]
fn test_generated_source_validates() {
    let deck = GeneratedTextSource::new(GENERATED_TS).load().unwrap();
    assert_eq!(deck.len(), 2);

    let mixed = r#"[{"title": "t", "content": "c", "isScam": true,
                     "redFlagsPresent": ["urgency"], "safeIndicatorsPresent": ["no-pressure"]}]"#;
    assert!(matches!(
        GeneratedTextSource::new(mixed).load(),
        Err(ScamSmartError::Validation(_))
    ));
}

#[test]
fn test_resolve_falls_back_to_builtin() {
    let builtin = ScenarioDeck::builtin().unwrap();

    let deck = resolve_deck(&GeneratedTextSource::new("no scenarios today")).unwrap();
    assert_eq!(deck.fingerprint(), builtin.fingerprint());

    let deck = resolve_deck(&FileSource::new("/definitely/not/here.json")).unwrap();
    assert_eq!(deck.len(), builtin.len());

    let deck = resolve_deck(&GeneratedTextSource::new(GENERATED_TS)).unwrap();
    assert_eq!(deck.len(), 2);

    assert_eq!(resolve_deck(&BuiltinSource).unwrap(), builtin);
}

#[test]
fn test_file_source_reads_json() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[{{"id": 7, "title": "Invoice", "content": "Attached as agreed.", "isScam": false,
             "safeIndicatorsPresent": ["expected-communication"]}}]"#
    )
    .unwrap();
    let deck = FileSource::new(file.path()).load().unwrap();
    assert_eq!(deck.get(0).unwrap().id, 7);
}

#[test]
fn test_prompts_ask_for_json() {
    let p = GenerationRequest::scenario_prompt(6);
    assert!(p.contains("exactly 6"));
    assert!(p.contains("redFlagsPresent"));
    assert!(p.contains("Never populate both lists"));

    let q = GenerationRequest::ladder_prompt(16);
    assert!(q.contains("exactly 16"));
    assert!(q.contains("correctAnswer"));
}
