/// Cycle detection via strongly-connected-component analysis.
///
/// Implements Tarjan's SCC algorithm with an explicit work stack rather than
/// call-stack recursion, so traversal depth is bounded by heap allocation
/// even on very deep dependency chains.
///
/// # What counts as a cycle
///
/// A discovered SCC is reported as a cycle iff it contains more than one
/// node, or is a single node with a self-referencing edge. Isolated nodes
/// and edge-free graphs report no cycles.
///
/// # Ordering
///
/// The order of returned cycles, and of ids within a cycle, is stable for a
/// given input order but contractually unspecified. Callers (and tests)
/// must compare as sets.
use std::collections::HashSet;

use petgraph::stable_graph::NodeIndex;
use petgraph::visit::{EdgeRef, IntoEdgeReferences};

use crate::graph::{ResourceGraph, build_graph};
use crate::structures::{Edge, Node};

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Returns `true` iff the graph formed by `nodes` and `edges` contains at
/// least one cycle.
///
/// Equivalent to `!find_cycles(nodes, edges).is_empty()`.
pub fn has_cycles(nodes: &[Node], edges: &[Edge]) -> bool {
    !find_cycles(nodes, edges).is_empty()
}

/// Enumerates the cycles in the graph formed by `nodes` and `edges`.
///
/// Each cycle is the member set of one strongly connected component,
/// reported as node ids. Dangling edges are dropped before analysis (see
/// [`build_graph`]); degenerate inputs (empty, edge-free, disconnected)
/// yield an empty result, never an error.
pub fn find_cycles(nodes: &[Node], edges: &[Edge]) -> Vec<Vec<String>> {
    find_cycles_in(&build_graph(nodes, edges))
}

/// Enumerates cycles in an already-normalized [`ResourceGraph`].
///
/// Used internally by the layout engine to decide whether feedback-edge
/// breaking is needed before rank assignment.
pub fn find_cycles_in(graph: &ResourceGraph) -> Vec<Vec<String>> {
    let sccs = strongly_connected_components(graph);
    let self_loops = self_loop_nodes(graph);

    sccs.into_iter()
        .filter(|scc| scc.len() > 1 || scc.first().is_some_and(|n| self_loops.contains(n)))
        .map(|scc| {
            scc.into_iter()
                .map(|idx| graph.id_of(idx).to_owned())
                .collect()
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Internal: iterative Tarjan
// ---------------------------------------------------------------------------

/// Sentinel for "not yet visited" in the index table.
const UNVISITED: usize = usize::MAX;

/// One frame of the explicit DFS work stack.
///
/// Successor lists are precomputed per frame so the traversal can resume at
/// `next_child` after returning from a deeper frame.
struct Frame {
    node: NodeIndex,
    successors: Vec<NodeIndex>,
    next_child: usize,
}

/// Computes all strongly connected components of `graph` using Tarjan's
/// algorithm with an explicit work stack.
///
/// Every node appears in exactly one returned component; single-node
/// components are included (the caller filters trivial ones). Node indices
/// produced by [`build_graph`] are dense, which lets the bookkeeping tables
/// be flat vectors indexed by `NodeIndex::index`.
fn strongly_connected_components(graph: &ResourceGraph) -> Vec<Vec<NodeIndex>> {
    let g = graph.graph();
    let n = g.node_count();

    let mut index: Vec<usize> = vec![UNVISITED; n];
    let mut lowlink: Vec<usize> = vec![0; n];
    let mut on_stack: Vec<bool> = vec![false; n];
    let mut scc_stack: Vec<NodeIndex> = Vec::new();
    let mut next_index: usize = 0;
    let mut components: Vec<Vec<NodeIndex>> = Vec::new();

    for start in g.node_indices() {
        if index[start.index()] != UNVISITED {
            continue;
        }

        let mut work: Vec<Frame> = vec![Frame {
            node: start,
            successors: successors_of(graph, start),
            next_child: 0,
        }];
        index[start.index()] = next_index;
        lowlink[start.index()] = next_index;
        next_index += 1;
        scc_stack.push(start);
        on_stack[start.index()] = true;

        while let Some(frame) = work.last_mut() {
            let node = frame.node;

            if frame.next_child < frame.successors.len() {
                let child = frame.successors[frame.next_child];
                frame.next_child += 1;

                if index[child.index()] == UNVISITED {
                    // Tree edge: descend.
                    index[child.index()] = next_index;
                    lowlink[child.index()] = next_index;
                    next_index += 1;
                    scc_stack.push(child);
                    on_stack[child.index()] = true;
                    work.push(Frame {
                        node: child,
                        successors: successors_of(graph, child),
                        next_child: 0,
                    });
                } else if on_stack[child.index()] {
                    // Back or cross edge into the current SCC stack.
                    lowlink[node.index()] = lowlink[node.index()].min(index[child.index()]);
                }
                continue;
            }

            // All children explored: pop the frame and propagate the lowlink
            // to the parent, then emit a component if this node is a root.
            work.pop();
            if let Some(parent) = work.last() {
                let p = parent.node.index();
                lowlink[p] = lowlink[p].min(lowlink[node.index()]);
            }

            if lowlink[node.index()] == index[node.index()] {
                let mut component: Vec<NodeIndex> = Vec::new();
                while let Some(member) = scc_stack.pop() {
                    on_stack[member.index()] = false;
                    component.push(member);
                    if member == node {
                        break;
                    }
                }
                components.push(component);
            }
        }
    }

    components
}

/// Collects the successor indices of `node`, including self-loop targets.
fn successors_of(graph: &ResourceGraph, node: NodeIndex) -> Vec<NodeIndex> {
    graph.graph().edges(node).map(|e| e.target()).collect()
}

/// Returns the set of nodes that have at least one self-referencing edge.
fn self_loop_nodes(graph: &ResourceGraph) -> HashSet<NodeIndex> {
    graph
        .graph()
        .edge_references()
        .filter(|e| e.source() == e.target())
        .map(|e| e.source())
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use std::collections::HashSet;

    use super::*;
    use crate::test_helpers::{depends_edge, resource_node};

    /// Flattens cycle results into a set of member ids for order-free
    /// comparison.
    fn member_set(cycles: &[Vec<String>]) -> HashSet<&str> {
        cycles
            .iter()
            .flat_map(|c| c.iter().map(String::as_str))
            .collect()
    }

    /// A linear chain is acyclic.
    #[test]
    fn dag_chain_has_no_cycles() {
        let nodes = vec![
            resource_node("a"),
            resource_node("b"),
            resource_node("c"),
            resource_node("d"),
        ];
        let edges = vec![
            depends_edge("e-ab", "a", "b"),
            depends_edge("e-bc", "b", "c"),
            depends_edge("e-cd", "c", "d"),
        ];
        assert!(!has_cycles(&nodes, &edges));
        assert!(find_cycles(&nodes, &edges).is_empty());
    }

    /// An empty graph reports no cycles.
    #[test]
    fn empty_graph_has_no_cycles() {
        assert!(!has_cycles(&[], &[]));
        assert!(find_cycles(&[], &[]).is_empty());
    }

    /// An edge-free graph of isolated nodes reports no cycles.
    #[test]
    fn isolated_nodes_are_not_cycles() {
        let nodes = vec![resource_node("a"), resource_node("b")];
        assert!(find_cycles(&nodes, &[]).is_empty());
    }

    /// A three-node ring is one cycle containing all three nodes.
    #[test]
    fn three_node_ring_detected() {
        let nodes = vec![resource_node("a"), resource_node("b"), resource_node("c")];
        let edges = vec![
            depends_edge("e-ab", "a", "b"),
            depends_edge("e-bc", "b", "c"),
            depends_edge("e-ca", "c", "a"),
        ];
        let cycles = find_cycles(&nodes, &edges);
        assert_eq!(cycles.len(), 1);
        assert_eq!(member_set(&cycles), HashSet::from(["a", "b", "c"]));
        assert!(has_cycles(&nodes, &edges));
    }

    /// A single self-loop alone makes the graph cyclic.
    #[test]
    fn self_loop_is_a_cycle() {
        let nodes = vec![resource_node("a")];
        let edges = vec![depends_edge("e-aa", "a", "a")];
        let cycles = find_cycles(&nodes, &edges);
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0], vec!["a".to_owned()]);
        assert!(has_cycles(&nodes, &edges));
    }

    /// A two-node mutual dependency is detected.
    #[test]
    fn two_node_mutual_cycle_detected() {
        let nodes = vec![resource_node("a"), resource_node("b")];
        let edges = vec![depends_edge("e-ab", "a", "b"), depends_edge("e-ba", "b", "a")];
        let cycles = find_cycles(&nodes, &edges);
        assert_eq!(cycles.len(), 1);
        assert_eq!(member_set(&cycles), HashSet::from(["a", "b"]));
    }

    /// Two disjoint cycles are reported separately.
    #[test]
    fn disjoint_cycles_reported_separately() {
        let nodes = vec![
            resource_node("a"),
            resource_node("b"),
            resource_node("c"),
            resource_node("d"),
            resource_node("e"),
        ];
        let edges = vec![
            depends_edge("e-ab", "a", "b"),
            depends_edge("e-ba", "b", "a"),
            depends_edge("e-cd", "c", "d"),
            depends_edge("e-de", "d", "e"),
            depends_edge("e-ec", "e", "c"),
        ];
        let cycles = find_cycles(&nodes, &edges);
        assert_eq!(cycles.len(), 2);

        let sizes: HashSet<usize> = cycles.iter().map(Vec::len).collect();
        assert_eq!(sizes, HashSet::from([2, 3]));
        assert_eq!(member_set(&cycles), HashSet::from(["a", "b", "c", "d", "e"]));
    }

    /// Acyclic nodes hanging off a cycle are not reported as cycle members.
    #[test]
    fn mixed_graph_reports_only_cyclic_members() {
        let nodes = vec![
            resource_node("root"),
            resource_node("a"),
            resource_node("b"),
            resource_node("c"),
        ];
        let edges = vec![
            depends_edge("e-root-a", "root", "a"),
            depends_edge("e-ab", "a", "b"),
            depends_edge("e-ba", "b", "a"),
            depends_edge("e-bc", "b", "c"),
        ];
        let cycles = find_cycles(&nodes, &edges);
        assert_eq!(cycles.len(), 1);
        assert_eq!(member_set(&cycles), HashSet::from(["a", "b"]));
    }

    /// Dangling edges are dropped before analysis and cannot fabricate a
    /// cycle.
    #[test]
    fn dangling_edges_ignored() {
        let nodes = vec![resource_node("a")];
        let edges = vec![
            depends_edge("e-1", "a", "ghost"),
            depends_edge("e-2", "ghost", "a"),
        ];
        assert!(!has_cycles(&nodes, &edges));
    }

    /// A long ring exercises the explicit work stack well past any depth a
    /// recursive traversal could comfortably handle with tiny stacks.
    #[test]
    fn deep_ring_detected_iteratively() {
        let n = 5_000;
        let nodes: Vec<Node> = (0..n).map(|i| resource_node(&format!("n{i}"))).collect();
        let mut edges: Vec<Edge> = (0..n - 1)
            .map(|i| depends_edge(&format!("e{i}"), &format!("n{i}"), &format!("n{}", i + 1)))
            .collect();
        edges.push(depends_edge("e-close", &format!("n{}", n - 1), "n0"));

        let cycles = find_cycles(&nodes, &edges);
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].len(), n);
    }
}
