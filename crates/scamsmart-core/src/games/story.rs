use crate::consts::STORY_START_NODE;
use crate::error::{ScamSmartError, SsResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::path::Path;
use strum_macros::{Display, EnumString};
use tracing::{debug, info};

const BUILTIN_STORY: &str = include_str!("../../data/story.json");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryOption {
    pub text: String,
    pub next_id: String,
}

/// How a walk through the story turned out for the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum Outcome {
    Scammed,
    Avoided,
    /// Dodged the scam itself but is still exposed, e.g. sitting on a malicious site.
    Exposed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ending {
    pub scam_type: String,
    #[serde(default)]
    pub red_flags: Vec<String>,
    #[serde(default)]
    pub tips: Vec<String>,
}

impl Ending {
    pub fn outcome(&self) -> Outcome {
        let kind = self.scam_type.to_lowercase();
        if kind.contains("avoided") && (kind.contains("exposed") || kind.contains("risk")) {
            Outcome::Exposed
        } else if kind.contains("avoided") {
            Outcome::Avoided
        } else {
            Outcome::Scammed
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryNode {
    pub id: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<StoryOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ending: Option<Ending>,
}

impl StoryNode {
    pub fn is_ending(&self) -> bool {
        self.ending.is_some()
    }
}

#[derive(Deserialize)]
struct RawStory {
    #[serde(default = "default_start")]
    start: String,
    nodes: Vec<StoryNode>,
}

fn default_start() -> String {
    STORY_START_NODE.to_string()
}

/// A validated branching story.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryGraph {
    start: String,
    nodes: BTreeMap<String, StoryNode>,
}

impl StoryGraph {
    pub fn new(start: impl Into<String>, nodes: Vec<StoryNode>) -> SsResult<Self> {
        let mut map = BTreeMap::new();
        for node in nodes {
            let id = node.id.clone();
            if map.insert(id.clone(), node).is_some() {
                return Err(ScamSmartError::Validation(format!(
                    "story node '{}' is defined twice",
                    id
                )));
            }
        }
        let graph = Self {
            start: start.into(),
            nodes: map,
        };
        graph.validate()?;
        Ok(graph)
    }

    pub fn builtin() -> SsResult<Self> {
        Self::from_json(BUILTIN_STORY)
    }

    pub fn from_json(text: &str) -> SsResult<Self> {
        let raw: RawStory = serde_json::from_str(text)?;
        Self::new(raw.start, raw.nodes)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> SsResult<Self> {
        let content = std::fs::read_to_string(&path)?;
        let graph = Self::from_json(&content)?;
        info!(
            "Loaded story with {} nodes from {}",
            graph.len(),
            path.as_ref().display()
        );
        Ok(graph)
    }

    pub fn validate(&self) -> SsResult<()> {
        if !self.nodes.contains_key(&self.start) {
            return Err(ScamSmartError::Validation(format!(
                "start node '{}' does not exist",
                self.start
            )));
        }

        for node in self.nodes.values() {
            match (&node.ending, node.options.is_empty()) {
                (Some(_), false) => {
                    return Err(ScamSmartError::Validation(format!(
                        "ending '{}' must not offer options",
                        node.id
                    )))
                }
                (None, true) => {
                    return Err(ScamSmartError::Validation(format!(
                        "node '{}' is a dead end without an ending",
                        node.id
                    )))
                }
                _ => {}
            }
            if let Some(opt) = node
                .options
                .iter()
                .find(|o| !self.nodes.contains_key(&o.next_id))
            {
                return Err(ScamSmartError::Validation(format!(
                    "node '{}' points to missing node '{}'",
                    node.id, opt.next_id
                )));
            }
        }

        let reachable = self.reachable();
        if let Some(orphan) = self.nodes.keys().find(|id| !reachable.contains(id.as_str())) {
            return Err(ScamSmartError::Validation(format!(
                "node '{}' cannot be reached from '{}'",
                orphan, self.start
            )));
        }
        Ok(())
    }

    fn reachable(&self) -> BTreeSet<&str> {
        let mut seen = BTreeSet::new();
        let mut queue = VecDeque::from([self.start.as_str()]);
        while let Some(id) = queue.pop_front() {
            if !seen.insert(id) {
                continue;
            }
            if let Some(node) = self.nodes.get(id) {
                queue.extend(node.options.iter().map(|o| o.next_id.as_str()));
            }
        }
        seen
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn get(&self, id: &str) -> Option<&StoryNode> {
        self.nodes.get(id)
    }

    pub fn endings(&self) -> impl Iterator<Item = &StoryNode> {
        self.nodes.values().filter(|n| n.is_ending())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// One playthrough of a story.
#[derive(Debug, Clone)]
pub struct StoryWalk {
    graph: StoryGraph,
    path: Vec<String>,
}

impl StoryWalk {
    pub fn new(graph: StoryGraph) -> Self {
        let path = vec![graph.start.clone()];
        Self { graph, path }
    }

    pub fn current(&self) -> &StoryNode {
        // Every id on the path was checked against the graph when it was pushed.
        &self.graph.nodes[self.path.last().map_or(self.graph.start.as_str(), String::as_str)]
    }

    /// Follows option `index` of the current node.
    pub fn choose(&mut self, index: usize) -> SsResult<&StoryNode> {
        let node = self.current();
        if node.is_ending() {
            return Err(ScamSmartError::Session(format!(
                "story already ended at '{}'",
                node.id
            )));
        }
        let next = node
            .options
            .get(index)
            .map(|o| o.next_id.clone())
            .ok_or_else(|| {
                ScamSmartError::Session(format!(
                    "node '{}' has no option {}",
                    node.id, index
                ))
            })?;

        debug!("Story: {} -> {}", node.id, next);
        self.path.push(next);

        let current = self.current();
        if let Some(ending) = &current.ending {
            info!(
                "Story ended at '{}' ({}): {}",
                current.id,
                ending.outcome(),
                ending.scam_type
            );
        }
        Ok(current)
    }

    pub fn ending(&self) -> Option<&Ending> {
        self.current().ending.as_ref()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.ending().map(Ending::outcome)
    }

    pub fn is_finished(&self) -> bool {
        self.current().is_ending()
    }

    pub fn path(&self) -> &[String] {
        &self.path
    }

    pub fn restart(&mut self) {
        self.path.truncate(1);
    }
}
