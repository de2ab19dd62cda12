use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

/// A file object as returned by the service, normalized at the client boundary.
///
/// `attributes`, `relationships` and `context_attributes` are kept as the
/// service sent them so the raw artifact is a faithful record; the accessors
/// below pick out the fields the report cares about.
/// `serde_json::Map` is ordered by key, which keeps the raw encoding stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerdictRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub object_type: String,
    #[serde(default)]
    pub attributes: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub relationships: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub context_attributes: Map<String, Value>,
}

fn present(v: Option<&Value>) -> Option<&Value> {
    v.filter(|v| !v.is_null())
}

impl VerdictRecord {
    pub fn meaningful_name(&self) -> Option<&Value> {
        present(self.attributes.get("meaningful_name"))
    }

    /// `popular_threat_classification.suggested_threat_label`
    pub fn label(&self) -> Option<&Value> {
        present(
            self.attributes
                .get("popular_threat_classification")
                .and_then(|c| c.get("suggested_threat_label")),
        )
    }

    pub fn reputation(&self) -> Option<&Value> {
        present(self.attributes.get("reputation"))
    }

    pub fn sandbox_verdicts(&self) -> Option<&Value> {
        present(self.attributes.get("sandbox_verdicts"))
    }

    pub fn total_votes(&self) -> Option<&Value> {
        present(self.attributes.get("total_votes"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Raw,
    Rendered,
}

impl ArtifactKind {
    pub fn extension(self) -> &'static str {
        match self {
            ArtifactKind::Raw => "json",
            ArtifactKind::Rendered => "md",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKind::Raw => f.write_str("raw"),
            ArtifactKind::Rendered => f.write_str("rendered"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Fetch,
    Render,
    Persist,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Fetch => f.write_str("fetch"),
            Stage::Render => f.write_str("render"),
            Stage::Persist => f.write_str("persist"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    Persisted,
    Failed,
}

/// Terminal state of one hash in a batch.
#[derive(Debug, Clone, Serialize)]
pub struct ItemOutcome {
    pub hash: String,
    pub status: OutcomeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<Stage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ItemOutcome {
    pub fn persisted(hash: &str) -> Self {
        ItemOutcome {
            hash: hash.to_string(),
            status: OutcomeStatus::Persisted,
            stage: None,
            error: None,
        }
    }

    pub fn failed(hash: &str, stage: Stage, error: String) -> Self {
        ItemOutcome {
            hash: hash.to_string(),
            status: OutcomeStatus::Failed,
            stage: Some(stage),
            error: Some(error),
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.status == OutcomeStatus::Persisted
    }
}

#[derive(Debug, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub persisted: usize,
    pub failed: usize,
    pub outcomes: Vec<ItemOutcome>,
}

impl BatchSummary {
    pub fn from_outcomes(outcomes: Vec<ItemOutcome>) -> Self {
        let persisted = outcomes.iter().filter(|o| o.is_persisted()).count();
        BatchSummary {
            total: outcomes.len(),
            persisted,
            failed: outcomes.len() - persisted,
            outcomes,
        }
    }
}

/// One row of a generated hash list.
#[derive(Debug, Clone, Serialize)]
pub struct HashListEntry {
    pub file_name: String,
    pub hash: String,
}

#[derive(Debug, Serialize)]
pub struct RenderReport {
    pub source: String,
    pub output: Option<String>,
}
