/// Canonical graph construction from scanned nodes and edges, using `petgraph`.
///
/// The normalizer adapts both node representations — logical [`Node`]s and
/// positioned/decorated [`PositionedNode`]s — into one canonical
/// [`ResourceGraph`] via the [`GraphNode`] trait seam. Construction never
/// fails and never mutates the caller's collections:
///
/// - **Dangling edges** (an endpoint id not present in the node set) are
///   silently dropped. Upstream scanners routinely emit edges to nodes that
///   a later filter removed; this is expected data, not an error.
/// - **Duplicate node ids** keep the first occurrence and ignore the rest.
///
/// # Two-Pass Construction
///
/// [`build_graph`] runs two passes:
/// 1. **Node pass** — inserts each node into the `StableDiGraph` with a small
///    inline [`NodeWeight`] and records the `id → NodeIndex` mapping.
/// 2. **Edge pass** — resolves `source`/`target` ids; edges with both
///    endpoints present are inserted and retained as the canonical edge
///    list, the rest are discarded.
///
/// # Cycle Detection
///
/// See the [`cycles`] submodule for the strongly-connected-component
/// analysis used by the layout engine's acyclicer.
pub mod cycles;

pub use cycles::{find_cycles, find_cycles_in, has_cycles};

use std::collections::HashMap;

use petgraph::stable_graph::{NodeIndex, StableDiGraph};

use crate::enums::{EdgeKindTag, NodeKindTag};
use crate::structures::{Edge, Node, PositionedNode};

/// Node-representation seam for the normalizer.
///
/// Both the logical and the positioned/decorated node variants expose the
/// identity and kind the canonical graph needs; everything else (position,
/// decoration, location, metadata) is irrelevant to graph structure.
pub trait GraphNode {
    /// Unique id of the node within its graph.
    fn graph_id(&self) -> &str;

    /// Resource kind of the node.
    fn graph_kind(&self) -> &NodeKindTag;
}

impl GraphNode for Node {
    fn graph_id(&self) -> &str {
        &self.id
    }

    fn graph_kind(&self) -> &NodeKindTag {
        &self.kind
    }
}

impl GraphNode for PositionedNode {
    fn graph_id(&self) -> &str {
        &self.node.id
    }

    fn graph_kind(&self) -> &NodeKindTag {
        &self.node.kind
    }
}

/// Weight stored inline on each petgraph node.
///
/// Kept small so BFS/DFS loops over the petgraph node slab stay cache
/// friendly; full node data lives with the caller.
#[derive(Debug, Clone)]
pub struct NodeWeight {
    /// Node id copied from the source collection.
    pub id: String,
    /// Resource kind: known built-in or extension string.
    pub kind: NodeKindTag,
}

/// Weight stored inline on each petgraph edge.
#[derive(Debug, Clone)]
pub struct EdgeWeight {
    /// Edge id copied from the source collection.
    pub id: String,
    /// Dependency kind: known built-in or extension string.
    pub kind: EdgeKindTag,
}

/// The canonical directed graph the engines operate on.
///
/// Wraps a `petgraph` [`StableDiGraph`] with inline [`NodeWeight`] /
/// [`EdgeWeight`] structs, an `id → NodeIndex` map for O(1) lookup, and the
/// list of edges that survived dangling-reference filtering.
///
/// No node or edge is ever removed after construction, so `NodeIndex`
/// values are dense and stable for the graph's lifetime.
#[derive(Debug)]
pub struct ResourceGraph {
    graph: StableDiGraph<NodeWeight, EdgeWeight>,
    id_to_index: HashMap<String, NodeIndex>,
    valid_edges: Vec<Edge>,
}

impl ResourceGraph {
    /// Returns the number of nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of edges retained after dangling-edge filtering.
    pub fn edge_count(&self) -> usize {
        self.valid_edges.len()
    }

    /// Returns `true` if a node with the given id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.id_to_index.contains_key(id)
    }

    /// Looks up the [`NodeIndex`] for a node id.
    ///
    /// Returns `None` if no node with that id exists.
    pub fn node_index(&self, id: &str) -> Option<NodeIndex> {
        self.id_to_index.get(id).copied()
    }

    /// Returns the [`NodeWeight`] for the given index, or `None` for an
    /// out-of-range index.
    pub fn node_weight(&self, idx: NodeIndex) -> Option<&NodeWeight> {
        self.graph.node_weight(idx)
    }

    /// Returns the id of the node at `idx`, or an empty string for an
    /// out-of-range index (which cannot occur for indices produced by this
    /// graph).
    pub fn id_of(&self, idx: NodeIndex) -> &str {
        self.graph.node_weight(idx).map_or("", |w| w.id.as_str())
    }

    /// Returns the edges that survived dangling-reference filtering, in
    /// input order.
    ///
    /// Every edge in this slice references two node ids present in the
    /// graph.
    pub fn valid_edges(&self) -> &[Edge] {
        &self.valid_edges
    }

    /// Returns a reference to the underlying [`StableDiGraph`] for use by
    /// traversal algorithms.
    pub fn graph(&self) -> &StableDiGraph<NodeWeight, EdgeWeight> {
        &self.graph
    }
}

/// Constructs a [`ResourceGraph`] from any node representation plus an edge
/// list.
///
/// Construction is O(N + E) and infallible: dangling edges are dropped and
/// duplicate node ids keep their first occurrence. The caller's collections
/// are only read, never mutated.
pub fn build_graph<N: GraphNode>(nodes: &[N], edges: &[Edge]) -> ResourceGraph {
    let mut graph: StableDiGraph<NodeWeight, EdgeWeight> =
        StableDiGraph::with_capacity(nodes.len(), edges.len());
    let mut id_to_index: HashMap<String, NodeIndex> = HashMap::with_capacity(nodes.len());

    for node in nodes {
        if id_to_index.contains_key(node.graph_id()) {
            continue;
        }
        let weight = NodeWeight {
            id: node.graph_id().to_owned(),
            kind: node.graph_kind().clone(),
        };
        let idx = graph.add_node(weight);
        id_to_index.insert(node.graph_id().to_owned(), idx);
    }

    let mut valid_edges: Vec<Edge> = Vec::with_capacity(edges.len());
    for edge in edges {
        let (Some(&source_idx), Some(&target_idx)) = (
            id_to_index.get(edge.source.as_str()),
            id_to_index.get(edge.target.as_str()),
        ) else {
            continue;
        };
        let weight = EdgeWeight {
            id: edge.id.clone(),
            kind: edge.kind.clone(),
        };
        graph.add_edge(source_idx, target_idx, weight);
        valid_edges.push(edge.clone());
    }

    ResourceGraph {
        graph,
        id_to_index,
        valid_edges,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;
    use crate::enums::ResourceKind;
    use crate::test_helpers::{depends_edge, resource_node};

    /// An empty input builds an empty graph with no error.
    #[test]
    fn empty_input_builds_empty_graph() {
        let g = build_graph::<Node>(&[], &[]);
        assert_eq!(g.node_count(), 0);
        assert_eq!(g.edge_count(), 0);
        assert!(g.valid_edges().is_empty());
    }

    /// Nodes and well-formed edges are all retained.
    #[test]
    fn simple_graph_counts() {
        let nodes = vec![resource_node("a"), resource_node("b"), resource_node("c")];
        let edges = vec![depends_edge("e-1", "a", "b"), depends_edge("e-2", "b", "c")];
        let g = build_graph(&nodes, &edges);
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edge_count(), 2);
    }

    /// Edges whose source or target is missing are silently dropped.
    #[test]
    fn dangling_edges_are_dropped_not_errors() {
        let nodes = vec![resource_node("a"), resource_node("b")];
        let edges = vec![
            depends_edge("e-ok", "a", "b"),
            depends_edge("e-bad-src", "ghost", "b"),
            depends_edge("e-bad-tgt", "a", "ghost"),
        ];
        let g = build_graph(&nodes, &edges);
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.valid_edges()[0].id, "e-ok");
    }

    /// Duplicate node ids keep the first occurrence.
    #[test]
    fn duplicate_node_ids_first_wins() {
        let first = resource_node("dup");
        let second = Node::new("dup", "other", first.kind.clone());
        let g = build_graph(&[first, second], &[]);
        assert_eq!(g.node_count(), 1);
    }

    /// Positioned nodes feed the same builder as logical nodes.
    #[test]
    fn positioned_nodes_build_equivalent_graph() {
        let nodes = vec![resource_node("a"), resource_node("b")];
        let positioned: Vec<PositionedNode> = nodes
            .iter()
            .map(|n| PositionedNode::at(n.clone(), 10.0, 20.0))
            .collect();
        let edges = vec![depends_edge("e-1", "a", "b")];

        let from_logical = build_graph(&nodes, &edges);
        let from_positioned = build_graph(&positioned, &edges);
        assert_eq!(from_logical.node_count(), from_positioned.node_count());
        assert_eq!(from_logical.edge_count(), from_positioned.edge_count());
    }

    /// Id lookup resolves to the correct node weight.
    #[test]
    fn id_lookup_resolves_weight() {
        let nodes = vec![resource_node("alpha"), resource_node("beta")];
        let g = build_graph(&nodes, &[]);

        let idx = g.node_index("alpha").expect("alpha must be present");
        let weight = g.node_weight(idx).expect("weight must exist");
        assert_eq!(weight.id, "alpha");
        assert_eq!(weight.kind, NodeKindTag::Known(ResourceKind::TerraformResource));
        assert_eq!(g.id_of(idx), "alpha");
        assert!(g.contains("beta"));
        assert!(!g.contains("gamma"));
    }

    /// A self-loop edge is structurally valid and retained.
    #[test]
    fn self_loop_is_retained() {
        let nodes = vec![resource_node("a")];
        let edges = vec![depends_edge("e-aa", "a", "a")];
        let g = build_graph(&nodes, &edges);
        assert_eq!(g.edge_count(), 1);
    }

    /// The builder never mutates its inputs.
    #[test]
    fn inputs_are_not_mutated() {
        let nodes = vec![resource_node("a"), resource_node("b")];
        let edges = vec![depends_edge("e-1", "a", "ghost")];
        let nodes_before = nodes.clone();
        let edges_before = edges.clone();

        let _ = build_graph(&nodes, &edges);
        assert_eq!(nodes, nodes_before);
        assert_eq!(edges, edges_before);
    }
}
