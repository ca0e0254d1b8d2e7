use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::enums::NodeKindTag;
use crate::types::SourceLocation;

/// A single resource in a scanned infrastructure dependency graph.
///
/// The `id`, `name`, and `kind` fields are required; `location` and
/// `metadata` are optional because not every scanner reports them. Nodes are
/// immutable once constructed: they are loaded from the scan output, passed
/// by reference into the engines, and discarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Node {
    /// Unique identifier for this node within one graph (e.g. the Terraform
    /// resource address `module.vpc.aws_subnet.private`).
    pub id: String,

    /// Display name of the resource.
    pub name: String,

    /// Resource kind (known built-in or provider-specific extension string).
    pub kind: NodeKindTag,

    /// Location of the declaration in source configuration, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceLocation>,

    /// Free-form scanner metadata (provider, region, tags, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<BTreeMap<String, String>>,
}

impl Node {
    /// Creates a node with the given id, name, and kind, and no location or
    /// metadata.
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: NodeKindTag) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            location: None,
            metadata: None,
        }
    }
}
