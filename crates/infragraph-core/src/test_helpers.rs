//! Shared test helper functions for constructing test fixtures.
//!
//! Compiled only in test builds; provides common constructors for [`Node`]
//! and [`Edge`] used across unit test modules throughout `infragraph-core`.
//!
//! Integration tests in `crates/infragraph-core/tests/` define their own
//! local helpers because they link against the non-test library build where
//! this module is not available.
#![allow(clippy::expect_used)]

use crate::enums::{DependencyKind, EdgeKindTag, NodeKindTag, ResourceKind};
use crate::structures::{Edge, Node, PositionedNode};

/// Creates a `terraform_resource` [`Node`] whose name equals its id.
pub fn resource_node(id: &str) -> Node {
    Node::new(id, id, NodeKindTag::Known(ResourceKind::TerraformResource))
}

/// Creates a [`Node`] with the given known resource kind.
pub fn typed_node(id: &str, kind: ResourceKind) -> Node {
    Node::new(id, id, NodeKindTag::Known(kind))
}

/// Creates a [`Node`] with an extension (non-built-in) kind string.
pub fn extension_node(id: &str, kind_str: &str) -> Node {
    Node::new(id, id, NodeKindTag::Extension(kind_str.to_owned()))
}

/// Creates a `depends_on` [`Edge`] between two node ids.
pub fn depends_edge(id: &str, source: &str, target: &str) -> Edge {
    Edge::new(
        id,
        EdgeKindTag::Known(DependencyKind::DependsOn),
        source,
        target,
    )
}

/// Creates a `references` [`Edge`] between two node ids.
pub fn references_edge(id: &str, source: &str, target: &str) -> Edge {
    Edge::new(
        id,
        EdgeKindTag::Known(DependencyKind::References),
        source,
        target,
    )
}

/// Creates an [`Edge`] with the given known dependency kind.
pub fn typed_edge(id: &str, kind: DependencyKind, source: &str, target: &str) -> Edge {
    Edge::new(id, EdgeKindTag::Known(kind), source, target)
}

/// Places a fixture node at the given coordinates with flags cleared.
pub fn positioned(id: &str, x: f64, y: f64) -> PositionedNode {
    PositionedNode::at(resource_node(id), x, y)
}

/// Builds the chain `n0 -> n1 -> ... -> n{len-1}` with nodes named `n{i}`.
pub fn chain(len: usize) -> (Vec<Node>, Vec<Edge>) {
    let nodes: Vec<Node> = (0..len).map(|i| resource_node(&format!("n{i}"))).collect();
    let edges: Vec<Edge> = (0..len.saturating_sub(1))
        .map(|i| depends_edge(&format!("e{i}"), &format!("n{i}"), &format!("n{}", i + 1)))
        .collect();
    (nodes, edges)
}

/// Builds a star: `center -> leaf{i}` for `i` in `0..leaves`.
pub fn star(leaves: usize) -> (Vec<Node>, Vec<Edge>) {
    let mut nodes = vec![resource_node("center")];
    let mut edges = Vec::with_capacity(leaves);
    for i in 0..leaves {
        let leaf = format!("leaf{i}");
        nodes.push(resource_node(&leaf));
        edges.push(depends_edge(&format!("e{i}"), "center", &leaf));
    }
    (nodes, edges)
}
