use serde::{Deserialize, Serialize};

use super::Node;

/// A [`Node`] plus a 2-D coordinate and rendering decoration flags.
///
/// Coordinates are always finite (never NaN or infinite): the layout engine
/// guarantees this for every node it positions. Decoration is orthogonal to
/// position and owned by the caller — engines copy flags through unchanged
/// and never mutate a caller's [`PositionedNode`] in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PositionedNode {
    /// The underlying logical node; its fields flatten into this object's
    /// JSON representation.
    #[serde(flatten)]
    pub node: Node,

    /// Horizontal position of the node's top-left corner.
    pub x: f64,

    /// Vertical position of the node's top-left corner.
    pub y: f64,

    /// Whether the node is currently selected in the UI.
    #[serde(default, skip_serializing_if = "is_false")]
    pub selected: bool,

    /// Whether the node is highlighted (e.g. part of a blast radius).
    #[serde(default, skip_serializing_if = "is_false")]
    pub highlighted: bool,

    /// Whether the node is dimmed (e.g. outside the current focus set).
    #[serde(default, skip_serializing_if = "is_false")]
    pub dimmed: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl PositionedNode {
    /// Places `node` at `(x, y)` with all decoration flags cleared.
    pub fn at(node: Node, x: f64, y: f64) -> Self {
        Self {
            node,
            x,
            y,
            selected: false,
            highlighted: false,
            dimmed: false,
        }
    }

    /// Returns a copy of this node moved to `(x, y)`, preserving decoration.
    pub fn moved_to(&self, x: f64, y: f64) -> Self {
        Self {
            node: self.node.clone(),
            x,
            y,
            selected: self.selected,
            highlighted: self.highlighted,
            dimmed: self.dimmed,
        }
    }

    /// Id of the underlying node.
    pub fn id(&self) -> &str {
        &self.node.id
    }
}
