//! Paper connection graph: pairwise similarity, thresholded connections and
//! merging with externally extracted relationship edges.

mod connections;
mod merge;
mod similarity;

pub use connections::{build_connections, classify_connection, shared_keywords};
pub use merge::{connection_to_edge, merge_graph};
pub use similarity::{jaccard, paper_similarity};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Kind of heuristic connection between two papers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConnectionType {
    #[serde(rename = "Strong_Similarity")]
    StrongSimilarity,
    #[serde(rename = "Moderate_Similarity")]
    ModerateSimilarity,
    #[serde(rename = "Same_Venue")]
    SameVenue,
    #[serde(rename = "Shared_Author")]
    SharedAuthor,
    #[serde(rename = "Weak_Similarity")]
    WeakSimilarity,
}

impl ConnectionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionType::StrongSimilarity => "Strong_Similarity",
            ConnectionType::ModerateSimilarity => "Moderate_Similarity",
            ConnectionType::SameVenue => "Same_Venue",
            ConnectionType::SharedAuthor => "Shared_Author",
            ConnectionType::WeakSimilarity => "Weak_Similarity",
        }
    }
}

impl std::fmt::Display for ConnectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Heuristic link between two papers (source --connection_type--> target).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    /// Id of the paper earlier in the input order.
    pub source: u32,
    pub target: u32,
    /// Weighted similarity in [0, 1].
    pub similarity: f64,
    pub connection_type: ConnectionType,
    pub shared_keywords: Vec<String>,
    pub venue_connection: bool,
}

/// Edge in the presentation graph, from either the LLM or the heuristics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    #[serde(deserialize_with = "id_as_string")]
    pub source: String,
    #[serde(deserialize_with = "id_as_string")]
    pub target: String,
    #[serde(default)]
    pub relationship_type: String,
    /// LLM edges use 0-5, heuristic edges 0-10.
    #[serde(default, deserialize_with = "strength_as_int")]
    pub strength: i64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub shared_entities: Vec<String>,
}

/// Graph payload returned to callers.
///
/// `nodes` and `entity_clusters` are passed through from the relationship
/// extractor untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
    #[serde(default)]
    pub nodes: Vec<Value>,
    #[serde(default)]
    pub edges: Vec<GraphEdge>,
    #[serde(default)]
    pub entity_clusters: Vec<Value>,
}

impl GraphData {
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Models reply with ids as either strings or numbers.
fn id_as_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {}",
            other
        ))),
    }
}

/// Strength arrives as an integer, a float or a numeric string; floats round.
fn strength_as_int<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let number = match &value {
        Value::Null => return Ok(0),
        Value::Number(n) => n.as_i64().map(|i| i as f64).or_else(|| n.as_f64()),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match number {
        Some(n) if n.is_finite() => Ok(n.round() as i64),
        _ => Err(serde::de::Error::custom(format!(
            "expected numeric strength, got {}",
            value
        ))),
    }
}
