use crate::consts::SCENARIO_ARRAY_MARKER;
use crate::error::{ScamSmartError, SsResult};
use crate::games::ladder::LadderQuestion;
use crate::scenario::{Scenario, ScenarioDeck};
use crate::tags::Vocabulary;
use std::path::PathBuf;
use tracing::{info, warn};

/// Builds the text prompts handed to an external text generator.
#[derive(Debug, Clone, Copy)]
pub struct GenerationRequest;

impl GenerationRequest {
    pub fn scenario_prompt(count: usize) -> String {
        let risk = Vocabulary::Risk.ids().join(", ");
        let safety = Vocabulary::Safety.ids().join(", ");

        format!(
            "Generate exactly {count} scam-awareness scenarios for a red flag spotting game.\n\
             Mix scams and legitimate messages: roughly half of them should be legitimate.\n\
             Each scenario is a realistic email, text message, social media post or phone script.\n\
             \n\
             Return ONLY a JSON array. Each element must have these fields:\n\
             - \"id\": a number starting at 1\n\
             - \"title\": a short description such as \"Email from Bank\"\n\
             - \"content\": the full message text\n\
             - \"isScam\": true or false\n\
             - \"redFlagsPresent\": the red flag ids present (scams only)\n\
             - \"safeIndicatorsPresent\": the safety indicator ids present (legitimate only)\n\
             \n\
             Red flag ids: {risk}\n\
             Safety indicator ids: {safety}\n\
             \n\
             Rules:\n\
             - A scam lists at least one red flag and an empty safeIndicatorsPresent.\n\
             - A legitimate message lists at least one safety indicator and an empty redFlagsPresent.\n\
             - Never use ids outside the two lists above.\n\
             - Never populate both lists for the same scenario."
        )
    }

    pub fn ladder_prompt(count: usize) -> String {
        format!(
            "Generate exactly {count} multiple choice questions about recognising scams.\n\
             Each question has exactly two options, one of which is correct.\n\
             \n\
             Return ONLY a JSON array. Each element must have these fields:\n\
             - \"id\": a number starting at 1\n\
             - \"question\": the situation and the question\n\
             - \"options\": an array of two strings\n\
             - \"correctAnswer\": 0 or 1, the index of the correct option\n\
             - \"explanation\": one sentence on why the answer is right"
        )
    }
}

/// Pulls the JSON array out of generator output.
///
/// Tries the `const scenarios: Scenario[] = [...];` form first, then falls back
/// to the span from the first `[` to the last `]`.
pub fn extract_array(text: &str) -> Option<&str> {
    if let Some(start) = text.find(SCENARIO_ARRAY_MARKER) {
        let rest = &text[start + SCENARIO_ARRAY_MARKER.len()..];
        if let Some(end) = rest.find("];") {
            let body = rest[..=end].trim();
            if body.starts_with('[') {
                return Some(body);
            }
        }
    }

    let open = text.find('[')?;
    let close = text.rfind(']')?;
    (close > open).then(|| &text[open..=close])
}

pub fn parse_generated_scenarios(text: &str) -> SsResult<Vec<Scenario>> {
    let array = extract_array(text)
        .ok_or_else(|| ScamSmartError::Generation("no scenario array in generated text".into()))?;

    let mut scenarios: Vec<Scenario> = serde_json::from_str(array)
        .map_err(|e| ScamSmartError::Generation(format!("generated scenarios: {}", e)))?;

    if scenarios.is_empty() {
        return Err(ScamSmartError::Generation(
            "generated scenario array is empty".into(),
        ));
    }
    for (i, s) in scenarios.iter_mut().enumerate() {
        if s.id == 0 {
            s.id = i as u32 + 1;
        }
    }
    Ok(scenarios)
}

pub fn parse_generated_questions(text: &str) -> SsResult<Vec<LadderQuestion>> {
    let array = extract_array(text)
        .ok_or_else(|| ScamSmartError::Generation("no question array in generated text".into()))?;

    let mut questions: Vec<LadderQuestion> = serde_json::from_str(array)
        .map_err(|e| ScamSmartError::Generation(format!("generated questions: {}", e)))?;

    if questions.is_empty() {
        return Err(ScamSmartError::Generation(
            "generated question array is empty".into(),
        ));
    }
    for (i, q) in questions.iter_mut().enumerate() {
        if q.id == 0 {
            q.id = i as u32 + 1;
        }
        q.validate()?;
    }
    Ok(questions)
}

/// Anything that can produce a scenario deck for a session.
pub trait ScenarioSource {
    fn describe(&self) -> String;
    fn load(&self) -> SsResult<ScenarioDeck>;
}

pub struct BuiltinSource;

impl ScenarioSource for BuiltinSource {
    fn describe(&self) -> String {
        "builtin deck".into()
    }

    fn load(&self) -> SsResult<ScenarioDeck> {
        ScenarioDeck::builtin()
    }
}

pub struct FileSource {
    pub path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ScenarioSource for FileSource {
    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }

    fn load(&self) -> SsResult<ScenarioDeck> {
        ScenarioDeck::load_from_file(&self.path)
    }
}

/// Raw text returned by a generator.
pub struct GeneratedTextSource {
    pub text: String,
}

impl GeneratedTextSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl ScenarioSource for GeneratedTextSource {
    fn describe(&self) -> String {
        "generated text".into()
    }

    fn load(&self) -> SsResult<ScenarioDeck> {
        ScenarioDeck::new(parse_generated_scenarios(&self.text)?)
    }
}

/// Loads a deck from `source`, falling back to the builtin deck on any failure.
pub fn resolve_deck(source: &dyn ScenarioSource) -> SsResult<ScenarioDeck> {
    match source.load() {
        Ok(deck) => {
            info!("Using {} scenarios from {}", deck.len(), source.describe());
            Ok(deck)
        }
        Err(e) => {
            warn!(
                "Could not load scenarios from {} ({}); using the builtin deck",
                source.describe(),
                e
            );
            ScenarioDeck::builtin()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_form_wins_over_stray_brackets() {
        let text = "Notes [draft]\nconst scenarios: Scenario[] = [1, 2];\n// [end]";
        assert_eq!(extract_array(text), Some("[1, 2]"));
    }

    #[test]
    fn bracket_span_fallback() {
        assert_eq!(extract_array("here: [ {} ] done"), Some("[ {} ]"));
        assert_eq!(extract_array("nothing here"), None);
        assert_eq!(extract_array("] backwards ["), None);
    }

    #[test]
    fn prompt_lists_both_vocabularies() {
        let p = GenerationRequest::scenario_prompt(4);
        assert!(p.contains("exactly 4"));
        assert!(p.contains("requests-secrecy"));
        assert!(p.contains("reasonable-request"));
    }
}
