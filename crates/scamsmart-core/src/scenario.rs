use crate::error::{ScamSmartError, SsResult};
use crate::round::{Classification, TagSet};
use crate::tags::Vocabulary;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;
use tracing::{debug, info};
use typed_builder::TypedBuilder;

const BUILTIN_SCENARIOS: &str = include_str!("../data/scenarios.json");

/// A single message the player has to judge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    #[serde(default)]
    #[builder(default)]
    pub id: u32,
    #[builder(setter(into))]
    pub title: String,
    #[builder(setter(into))]
    pub content: String,
    pub is_scam: bool,
    #[serde(rename = "redFlagsPresent", default)]
    #[builder(default, setter(transform = |tags: &[&str]| crate::tags::tag_set(tags)))]
    pub red_flags: TagSet,
    #[serde(rename = "safeIndicatorsPresent", default)]
    #[builder(default, setter(transform = |tags: &[&str]| crate::tags::tag_set(tags)))]
    pub safe_indicators: TagSet,
}

impl Scenario {
    /// The ground-truth set a round is scored against for the given call.
    pub fn tags_for(&self, classification: Classification) -> &TagSet {
        match classification {
            Classification::Unsafe => &self.red_flags,
            Classification::Safe => &self.safe_indicators,
        }
    }

    /// The populated tag set, i.e. the one matching `is_scam`.
    pub fn truth_tags(&self) -> &TagSet {
        if self.is_scam {
            &self.red_flags
        } else {
            &self.safe_indicators
        }
    }

    pub fn validate(&self) -> SsResult<()> {
        let label = format!("scenario {} ('{}')", self.id, self.title);

        if self.title.trim().is_empty() {
            return Err(ScamSmartError::Validation(format!(
                "scenario {} has an empty title",
                self.id
            )));
        }
        if self.content.trim().is_empty() {
            return Err(ScamSmartError::Validation(format!(
                "{} has an empty body",
                label
            )));
        }

        let (expected, other, vocab) = if self.is_scam {
            (&self.red_flags, &self.safe_indicators, Vocabulary::Risk)
        } else {
            (&self.safe_indicators, &self.red_flags, Vocabulary::Safety)
        };

        if expected.is_empty() {
            return Err(ScamSmartError::Validation(format!(
                "{} lists no {} indicators",
                label,
                vocab.to_string().to_lowercase()
            )));
        }
        if !other.is_empty() {
            return Err(ScamSmartError::Validation(format!(
                "{} mixes red flags and safety indicators",
                label
            )));
        }
        if let Some(bad) = expected.iter().find(|t| !vocab.contains(t)) {
            return Err(ScamSmartError::Validation(format!(
                "{} uses '{}', which is not a {} indicator",
                label,
                bad,
                vocab.to_string().to_lowercase()
            )));
        }
        Ok(())
    }
}

/// An ordered, validated list of scenarios for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioDeck {
    scenarios: Vec<Scenario>,
}

impl ScenarioDeck {
    pub fn new(scenarios: Vec<Scenario>) -> SsResult<Self> {
        if scenarios.is_empty() {
            return Err(ScamSmartError::Validation(
                "a scenario deck needs at least one scenario".into(),
            ));
        }
        for s in &scenarios {
            s.validate()?;
        }
        debug!("Validated deck of {} scenarios", scenarios.len());
        Ok(Self { scenarios })
    }

    /// The six scenarios bundled with the game.
    pub fn builtin() -> SsResult<Self> {
        Self::from_json(BUILTIN_SCENARIOS)
    }

    pub fn from_json(text: &str) -> SsResult<Self> {
        let scenarios: Vec<Scenario> = serde_json::from_str(text)?;
        Self::new(scenarios)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> SsResult<Self> {
        let content = fs::read_to_string(&path)?;
        let deck = Self::from_json(&content)?;
        info!(
            "Loaded {} scenarios from {}",
            deck.len(),
            path.as_ref().display()
        );
        Ok(deck)
    }

    /// Hex SHA-256 over every scenario's fields, in deck order.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for s in &self.scenarios {
            hasher.update(s.id.to_le_bytes());
            hasher.update(s.title.as_bytes());
            hasher.update([0u8]);
            hasher.update(s.content.as_bytes());
            hasher.update([0u8, u8::from(s.is_scam)]);
            for tag in s.red_flags.iter().chain(s.safe_indicators.iter()) {
                hasher.update(tag.as_bytes());
                hasher.update([0u8]);
            }
            hasher.update([0xffu8]);
        }
        hex::encode(hasher.finalize())
    }

    pub fn get(&self, index: usize) -> Option<&Scenario> {
        self.scenarios.get(index)
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Scenario> {
        self.scenarios.iter()
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }
}

impl<'a> IntoIterator for &'a ScenarioDeck {
    type Item = &'a Scenario;
    type IntoIter = std::slice::Iter<'a, Scenario>;

    fn into_iter(self) -> Self::IntoIter {
        self.scenarios.iter()
    }
}
