use assert_cmd::Command;
use regex::Regex;
use std::fs;
use std::io::Write;
use tempfile::TempDir;

fn scamsmart() -> Command {
    Command::cargo_bin("scamsmart").expect("binary builds")
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output).unwrap()
}

#[test]
fn test_score_reports_round_total() {
    let out = stdout_of(scamsmart().args([
        "score",
        "--scam",
        "--classification",
        "unsafe",
        "--truth",
        "urgency,payment",
        "--selected",
        "urgency,grammar",
        "--json",
    ]));
    let v: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(v["total"], 22);
    assert_eq!(v["missed"], 1);
    assert_eq!(v["rawTagScore"], 2);
}

#[test]
fn test_score_table_output() {
    let out = stdout_of(scamsmart().args([
        "score",
        "--scam",
        "--classification",
        "unsafe",
        "--truth",
        "urgency,payment",
        "--selected",
        "urgency,payment",
    ]));
    assert!(out.contains("Round score"));
    assert!(out.contains("40"));
}

#[test]
fn test_score_flag_overrides_rules_file() {
    let dir = TempDir::new().unwrap();
    let rules = dir.path().join("rules.json");
    fs::write(&rules, r#"{"scoring": {"classification_bonus": 100}}"#).unwrap();

    let out = stdout_of(scamsmart().args([
        "score",
        "--legit",
        "--classification",
        "safe",
        "--json",
        "--rules",
        rules.to_str().unwrap(),
    ]));
    let v: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(v["total"], 100);

    let out = stdout_of(scamsmart().args([
        "score",
        "--legit",
        "--classification",
        "safe",
        "--json",
        "--classification-bonus",
        "5",
        "--rules",
        rules.to_str().unwrap(),
    ]));
    let v: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(v["total"], 5);
}

#[test]
fn test_score_needs_ground_truth() {
    scamsmart()
        .args(["score", "--classification", "safe"])
        .assert()
        .failure();
    scamsmart()
        .args(["score", "--scam", "--legit", "--classification", "safe"])
        .assert()
        .failure();
}

#[test]
fn test_validate_builtin_deck() {
    let out = stdout_of(scamsmart().arg("validate"));
    let re = Regex::new(r"fingerprint: [0-9a-f]{64}").unwrap();
    assert!(re.is_match(&out));
    assert_eq!(out.matches("OK").count(), 6);
}

#[test]
fn test_validate_reports_bad_scenarios() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("deck.json");
    fs::write(
        &path,
        r#"[
            {"id": 1, "title": "Fine", "content": "c", "isScam": true, "redFlagsPresent": ["urgency"]},
            {"id": 2, "title": "Mixed", "content": "c", "isScam": true,
             "redFlagsPresent": ["urgency"], "safeIndicatorsPresent": ["no-pressure"]}
        ]"#,
    )
    .unwrap();
    let assert = scamsmart()
        .args(["validate", "--scenarios", path.to_str().unwrap()])
        .assert()
        .code(1);
    let out = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(out.contains("mixes red flags and safety indicators"));
}

#[test]
fn test_play_record_then_replay() {
    let dir = TempDir::new().unwrap();
    let record = dir.path().join("session.json");

    let out = stdout_of(
        scamsmart()
            .args(["play", "--record", record.to_str().unwrap()])
            .write_stdin("u\n1,3\ns\n\nu\n\ns\n\nu\n\ns\n\n"),
    );
    assert!(out.contains("score request:"));

    let recorded: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&record).unwrap()).unwrap();
    assert_eq!(recorded["rounds"].as_array().unwrap().len(), 6);

    let out = stdout_of(scamsmart().args(["replay", record.to_str().unwrap()]));
    assert!(out.contains("replay total:"));
}

#[test]
fn test_replay_detects_tampering() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tampered.json");
    let mut file = fs::File::create(&path).unwrap();
    let rounds: Vec<String> = (0..6)
        .map(|_| r#"{"classification": "unsafe", "selected": []}"#.to_string())
        .collect();
    write!(
        file,
        r#"{{"claimed_total": 999, "rounds": [{}]}}"#,
        rounds.join(",")
    )
    .unwrap();

    let assert = scamsmart()
        .args(["replay", path.to_str().unwrap()])
        .assert()
        .code(2);
    let out = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(out.contains("MISMATCH"));
}

#[test]
fn test_play_with_unusable_generated_text_falls_back() {
    let dir = TempDir::new().unwrap();
    let generated = dir.path().join("gen.txt");
    fs::write(&generated, "Sorry, I can't do that.").unwrap();

    let out = stdout_of(
        scamsmart()
            .args(["play", "--generated", generated.to_str().unwrap()])
            .write_stdin("u\n\ns\n\nu\n\ns\n\nu\n\ns\n\n"),
    );
    assert!(out.contains("Scenario 6/6"));
}

#[test]
fn test_prompt_kinds() {
    let out = stdout_of(scamsmart().args(["prompt", "--count", "3"]));
    assert!(out.contains("exactly 3"));
    assert!(out.contains("safeIndicatorsPresent"));

    let out = stdout_of(scamsmart().args(["prompt", "--kind", "ladder"]));
    assert!(out.contains("exactly 16"));
}

#[test]
fn test_score_rejects_oversized_weights() {
    scamsmart()
        .args([
            "score",
            "--scam",
            "--classification",
            "unsafe",
            "--truth",
            "urgency",
            "--selected",
            "urgency",
            "--points-per-correct-tag",
            "4294967295",
        ])
        .assert()
        .failure()
        .code(1);
}
