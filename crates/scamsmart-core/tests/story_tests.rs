use rstest::rstest;
use scamsmart_core::error::ScamSmartError;
use scamsmart_core::games::story::{Outcome, StoryGraph, StoryWalk};

fn walk() -> StoryWalk {
    StoryWalk::new(StoryGraph::builtin().unwrap())
}

#[test]
fn test_builtin_story_is_valid() {
    let graph = StoryGraph::builtin().unwrap();
    assert_eq!(graph.start(), "start");
    assert_eq!(graph.len(), 15);
    assert_eq!(graph.endings().count(), 9);
}

#[rstest]
#[case(&[0, 0], "enter-details", Outcome::Scammed)]
#[case(&[0, 1], "check-url", Outcome::Exposed)]
#[case(&[1, 1], "spot-url-issue", Outcome::Avoided)]
#[case(&[2, 1, 0], "give-in-pressure", Outcome::Scammed)]
#[case(&[2, 1, 1], "end-conversation", Outcome::Avoided)]
#[case(&[3, 0], "friend-confirms", Outcome::Scammed)]
#[case(&[3, 1], "final-ignore", Outcome::Avoided)]
fn test_paths_reach_endings(
    #[case] choices: &[usize],
    #[case] ending_id: &str,
    #[case] outcome: Outcome,
) {
    let mut w = walk();
    for &c in choices {
        w.choose(c).unwrap();
    }
    assert!(w.is_finished());
    assert_eq!(w.current().id, ending_id);
    assert_eq!(w.outcome(), Some(outcome));
    assert_eq!(w.path().len(), choices.len() + 1);
    assert!(!w.ending().unwrap().tips.is_empty());
}

#[test]
fn test_cannot_choose_past_an_ending() {
    let mut w = walk();
    w.choose(0).unwrap();
    w.choose(0).unwrap();
    assert!(matches!(w.choose(0), Err(ScamSmartError::Session(_))));
}

#[test]
fn test_out_of_range_choice() {
    let mut w = walk();
    assert!(w.choose(9).is_err());
    assert_eq!(w.current().id, "start");
}

#[test]
fn test_restart_returns_to_start() {
    let mut w = walk();
    w.choose(3).unwrap();
    w.restart();
    assert_eq!(w.current().id, "start");
    assert_eq!(w.path(), ["start".to_string()]);
    assert_eq!(w.outcome(), None);
}

#[rstest]
#[case(
    r#"{"nodes": [{"id": "intro", "text": "hi", "options": [{"text": "go", "nextId": "end"}]},
                  {"id": "end", "text": "bye", "ending": {"scamType": "Scam Avoided"}}]}"#,
    "start node"
)]
#[case(
    r#"{"nodes": [{"id": "start", "text": "hi", "options": [{"text": "go", "nextId": "nowhere"}]}]}"#,
    "missing node"
)]
#[case(
    r#"{"nodes": [{"id": "start", "text": "hi"}]}"#,
    "dead end"
)]
#[case(
    r#"{"nodes": [{"id": "start", "text": "hi", "options": [{"text": "go", "nextId": "start"}],
                   "ending": {"scamType": "Scam Avoided"}}]}"#,
    "must not offer options"
)]
#[case(
    r#"{"nodes": [{"id": "start", "text": "hi", "options": [{"text": "go", "nextId": "end"}]},
                  {"id": "end", "text": "bye", "ending": {"scamType": "Scam Avoided"}},
                  {"id": "island", "text": "lost", "ending": {"scamType": "Phishing"}}]}"#,
    "cannot be reached"
)]
fn test_invalid_graphs(#[case] json: &str, #[case] expected: &str) {
    let err = StoryGraph::from_json(json).unwrap_err().to_string();
    assert!(err.contains(expected), "{} does not mention {}", err, expected);
}

#[test]
fn test_loops_back_to_start_are_reachable() {
    let json = r#"{"nodes": [
        {"id": "start", "text": "hi", "options": [{"text": "again", "nextId": "middle"}]},
        {"id": "middle", "text": "hmm", "options": [{"text": "back", "nextId": "start"},
                                                     {"text": "on", "nextId": "end"}]},
        {"id": "end", "text": "bye", "ending": {"scamType": "Scam Avoided"}}]}"#;
    let graph = StoryGraph::from_json(json).unwrap();
    assert_eq!(graph.len(), 3);

    let mut w = StoryWalk::new(graph);
    w.choose(0).unwrap();
    w.choose(0).unwrap();
    assert_eq!(w.current().id, "start");
    assert_eq!(w.path().len(), 3);
}
