use serde::{Deserialize, Serialize};

use crate::enums::EdgeKindTag;

/// A directed dependency between two nodes in a scanned infrastructure graph.
///
/// The edge `source → target` means "target depends on / is affected by
/// source". An edge whose `source` or `target` does not resolve to a node in
/// the same graph is a routine upstream condition (the node may have been
/// filtered out) and is silently dropped by the engines, never an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Edge {
    /// Unique identifier for this edge within one graph.
    pub id: String,

    /// Dependency kind (known built-in or provider-specific extension
    /// string).
    pub kind: EdgeKindTag,

    /// Id of the source (tail) node.
    pub source: String,

    /// Id of the target (head) node.
    pub target: String,

    /// Scanner confidence that this dependency is real, in `[0, 1]`.
    ///
    /// Advisory only: neither layout nor impact math consumes it. Defaults
    /// to `1.0` when absent from the JSON representation.
    #[serde(default = "default_confidence")]
    pub confidence: f64,
}

fn default_confidence() -> f64 {
    1.0
}

impl Edge {
    /// Creates an edge with the given id, kind, and endpoints, at full
    /// confidence.
    pub fn new(
        id: impl Into<String>,
        kind: EdgeKindTag,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            source: source.into(),
            target: target.into(),
            confidence: 1.0,
        }
    }
}
