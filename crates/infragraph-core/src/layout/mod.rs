/// Layered (hierarchical) graph layout.
///
/// Implements the classic layered-drawing pipeline over the canonical graph:
///
/// 1. Normalize inputs ([`crate::graph::build_graph`]); dangling edges are
///    dropped up front.
/// 2. Consult the cycle detector; when cycles exist and the acyclicer is
///    enabled, compute a feedback-edge set that is excluded from rank
///    constraints only — the returned edge list always carries every valid
///    input edge.
/// 3. Assign ranks ([`rank`]), order nodes within each rank to reduce edge
///    crossings ([`order`]), then assign coordinates: rank along the primary
///    axis, in-rank order along the secondary axis, scaled by node size and
///    spacing, each rank centered against the widest one.
///
/// The chosen [`FlowDirection`] decides which screen axis carries ranks:
/// top-to-bottom and bottom-to-top rank vertically, left-to-right and
/// right-to-left rank horizontally; the reversed variants mirror the rank
/// axis within the overall extent.
///
/// All operations are pure: caller collections are read, never mutated, and
/// every produced coordinate is a finite number.
mod order;
mod rank;

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::graph::{ResourceGraph, build_graph, find_cycles_in};
use crate::structures::{Edge, Node, PositionedNode};

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Flow direction of the layered drawing.
///
/// Determines which axis carries ranks and which carries in-rank order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowDirection {
    /// Roots at the top, ranks advancing downward.
    #[default]
    TopToBottom,
    /// Roots at the bottom, ranks advancing upward.
    BottomToTop,
    /// Roots at the left, ranks advancing rightward.
    LeftToRight,
    /// Roots at the right, ranks advancing leftward.
    RightToLeft,
}

impl FlowDirection {
    /// `true` when ranks advance along the vertical axis.
    fn is_vertical(self) -> bool {
        match self {
            FlowDirection::TopToBottom | FlowDirection::BottomToTop => true,
            FlowDirection::LeftToRight | FlowDirection::RightToLeft => false,
        }
    }

    /// `true` when ranks advance against the axis direction and must be
    /// mirrored within the overall extent.
    fn is_reversed(self) -> bool {
        match self {
            FlowDirection::BottomToTop | FlowDirection::RightToLeft => true,
            FlowDirection::TopToBottom | FlowDirection::LeftToRight => false,
        }
    }
}

/// Rank-assignment strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ranker {
    /// Rank = longest distance from any root. Roots all sit on rank 0.
    #[default]
    LongestPath,
    /// Longest-path ranks followed by a slack-tightening pass that pulls
    /// each node as close to its successors as its predecessors allow.
    Tight,
}

/// Per-call configuration for [`layout`].
///
/// All fields have documented defaults; construct with `..Default::default()`
/// to override selectively. Values outside their documented ranges (e.g.
/// negative spacing) produce undefined but non-crashing output; strict
/// validation belongs to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct LayoutOptions {
    /// Flow direction. Default: [`FlowDirection::TopToBottom`].
    pub direction: FlowDirection,
    /// Width of every node box. Default: `172.0`.
    pub node_width: f64,
    /// Height of every node box. Default: `36.0`.
    pub node_height: f64,
    /// Gap between adjacent nodes along the horizontal axis. Default: `50.0`.
    pub horizontal_spacing: f64,
    /// Gap between adjacent nodes along the vertical axis. Default: `80.0`.
    pub vertical_spacing: f64,
    /// Rank-assignment strategy. Default: [`Ranker::LongestPath`].
    pub ranker: Ranker,
    /// Whether to break feedback edges before rank assignment when the
    /// graph is cyclic. Default: `true`.
    pub acyclicer: bool,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            direction: FlowDirection::TopToBottom,
            node_width: 172.0,
            node_height: 36.0,
            horizontal_spacing: 50.0,
            vertical_spacing: 80.0,
            ranker: Ranker::LongestPath,
            acyclicer: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Output of a whole-graph layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LayoutResult {
    /// Positioned nodes, one per distinct input node, in input order.
    pub nodes: Vec<PositionedNode>,
    /// Every valid input edge (dangling edges excluded), in input order.
    /// Feedback edges broken for layering still appear here.
    pub edges: Vec<Edge>,
    /// Overall drawing width (0 for an empty graph).
    pub width: f64,
    /// Overall drawing height (0 for an empty graph).
    pub height: f64,
}

impl LayoutResult {
    fn empty() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            width: 0.0,
            height: 0.0,
        }
    }
}

/// Axis-aligned bounding box over a set of positioned nodes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GraphBounds {
    /// Leftmost extent.
    pub min_x: f64,
    /// Topmost extent.
    pub min_y: f64,
    /// Rightmost extent.
    pub max_x: f64,
    /// Bottommost extent.
    pub max_y: f64,
    /// `max_x - min_x`.
    pub width: f64,
    /// `max_y - min_y`.
    pub height: f64,
}

// ---------------------------------------------------------------------------
// Whole-graph layout
// ---------------------------------------------------------------------------

/// Computes 2-D positions for a node/edge collection.
///
/// An empty node list yields an empty result with zero size; no input ever
/// raises an error. Every output coordinate is finite, and every output
/// edge references two ids present in the input node set.
pub fn layout(nodes: &[Node], edges: &[Edge], options: &LayoutOptions) -> LayoutResult {
    let graph = build_graph(nodes, edges);
    if graph.node_count() == 0 {
        return LayoutResult::empty();
    }

    let dense_edges = dense_edge_pairs(&graph);
    let n = graph.node_count();

    let feedback = if options.acyclicer && !find_cycles_in(&graph).is_empty() {
        rank::feedback_edges(n, &dense_edges)
    } else {
        HashSet::new()
    };

    let ranks = rank::assign_ranks(n, &dense_edges, &feedback, options.ranker);
    let ordered = order::order_ranks(n, &ranks, &dense_edges);
    let (coords, width, height) = assign_coordinates(&ordered, options);

    // Re-associate each dense index with the caller's full node data. The
    // first input node carrying a given id owns the graph slot, matching
    // the normalizer's first-wins rule.
    let mut placed: Vec<PositionedNode> = Vec::with_capacity(n);
    let mut seen: HashSet<&str> = HashSet::with_capacity(n);
    for node in nodes {
        if !seen.insert(node.id.as_str()) {
            continue;
        }
        let Some(idx) = graph.node_index(&node.id) else {
            continue;
        };
        let (x, y) = coords[idx.index()];
        placed.push(PositionedNode::at(node.clone(), x, y));
    }

    LayoutResult {
        nodes: placed,
        edges: graph.valid_edges().to_vec(),
        width,
        height,
    }
}

/// Extracts dense `(source, target)` index pairs from the canonical graph,
/// in valid-edge input order.
fn dense_edge_pairs(graph: &ResourceGraph) -> Vec<(usize, usize)> {
    graph
        .valid_edges()
        .iter()
        .filter_map(|edge| {
            let source = graph.node_index(&edge.source)?;
            let target = graph.node_index(&edge.target)?;
            Some((source.index(), target.index()))
        })
        .collect()
}

/// Assigns a coordinate to every node from its rank and in-rank order.
///
/// Returns per-dense-index `(x, y)` pairs plus the overall drawing extent.
/// Ranks advance along the primary axis; nodes within a rank advance along
/// the secondary axis, with each rank centered against the widest rank.
fn assign_coordinates(
    ordered: &[Vec<usize>],
    options: &LayoutOptions,
) -> (Vec<(f64, f64)>, f64, f64) {
    let vertical = options.direction.is_vertical();

    // Primary axis: where ranks advance. Secondary: in-rank order.
    let (node_primary, node_secondary) = if vertical {
        (options.node_height, options.node_width)
    } else {
        (options.node_width, options.node_height)
    };
    let (primary_spacing, secondary_spacing) = if vertical {
        (options.vertical_spacing, options.horizontal_spacing)
    } else {
        (options.horizontal_spacing, options.vertical_spacing)
    };

    let rank_count = ordered.len();
    let rank_step = node_primary + primary_spacing;
    let secondary_step = node_secondary + secondary_spacing;

    let rank_extent = |members: usize| -> f64 {
        if members == 0 {
            0.0
        } else {
            members as f64 * node_secondary + (members - 1) as f64 * secondary_spacing
        }
    };
    let max_secondary = ordered
        .iter()
        .map(|members| rank_extent(members.len()))
        .fold(0.0, f64::max);
    let total_primary = if rank_count == 0 {
        0.0
    } else {
        rank_count as f64 * node_primary + (rank_count - 1) as f64 * primary_spacing
    };

    let node_count: usize = ordered.iter().map(Vec::len).sum();
    let mut coords: Vec<(f64, f64)> = vec![(0.0, 0.0); node_count];

    for (rank_idx, members) in ordered.iter().enumerate() {
        let along_rank_axis = rank_idx as f64 * rank_step;
        let primary = if options.direction.is_reversed() {
            total_primary - node_primary - along_rank_axis
        } else {
            along_rank_axis
        };

        let start = (max_secondary - rank_extent(members.len())) / 2.0;
        for (offset, &node) in members.iter().enumerate() {
            let secondary = start + offset as f64 * secondary_step;
            coords[node] = if vertical {
                (secondary, primary)
            } else {
                (primary, secondary)
            };
        }
    }

    let (width, height) = if vertical {
        (max_secondary, total_primary)
    } else {
        (total_primary, max_secondary)
    };

    (coords, width, height)
}

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

/// Computes the bounding box over positioned nodes, treating each node as a
/// box of the options' node size, expanded symmetrically by `padding`.
///
/// An empty slice yields a zeroed bounds value (padding ignored).
pub fn calculate_bounds(
    nodes: &[PositionedNode],
    options: &LayoutOptions,
    padding: f64,
) -> GraphBounds {
    if nodes.is_empty() {
        return GraphBounds {
            min_x: 0.0,
            min_y: 0.0,
            max_x: 0.0,
            max_y: 0.0,
            width: 0.0,
            height: 0.0,
        };
    }

    let mut min_x = f64::MAX;
    let mut min_y = f64::MAX;
    let mut max_x = f64::MIN;
    let mut max_y = f64::MIN;

    for node in nodes {
        min_x = min_x.min(node.x);
        min_y = min_y.min(node.y);
        max_x = max_x.max(node.x + options.node_width);
        max_y = max_y.max(node.y + options.node_height);
    }

    min_x -= padding;
    min_y -= padding;
    max_x += padding;
    max_y += padding;

    GraphBounds {
        min_x,
        min_y,
        max_x,
        max_y,
        width: max_x - min_x,
        height: max_y - min_y,
    }
}

// ---------------------------------------------------------------------------
// Direction heuristic
// ---------------------------------------------------------------------------

/// Suggests a flow direction from the graph's root/leaf balance.
///
/// Among nodes with at least one valid edge, roots have zero in-degree and
/// leaves zero out-degree. More leaves than roots (fan-out, tree shape)
/// favors [`FlowDirection::TopToBottom`]; more roots than leaves (fan-in,
/// convergent dependencies) favors [`FlowDirection::LeftToRight`]. A tie, or
/// an edge-free graph, defaults to top-to-bottom.
pub fn optimal_direction(nodes: &[Node], edges: &[Edge]) -> FlowDirection {
    let graph = build_graph(nodes, edges);
    let n = graph.node_count();
    let mut in_degree: Vec<usize> = vec![0; n];
    let mut out_degree: Vec<usize> = vec![0; n];

    for (source, target) in dense_edge_pairs(&graph) {
        out_degree[source] += 1;
        in_degree[target] += 1;
    }

    let mut roots = 0usize;
    let mut leaves = 0usize;
    for v in 0..n {
        if in_degree[v] == 0 && out_degree[v] == 0 {
            continue;
        }
        if in_degree[v] == 0 {
            roots += 1;
        }
        if out_degree[v] == 0 {
            leaves += 1;
        }
    }

    if roots > leaves {
        FlowDirection::LeftToRight
    } else {
        FlowDirection::TopToBottom
    }
}

// ---------------------------------------------------------------------------
// Constrained re-layout
// ---------------------------------------------------------------------------

/// Re-runs the layered algorithm over a subset of nodes while pinning the
/// rest.
///
/// Nodes whose id is not in `subset_ids` keep their exact input coordinates
/// and decoration. Subset nodes are laid out using only edges among
/// themselves (edges out of the subset dangle and are dropped by the
/// normalizer) and replace the corresponding entries, retaining their
/// decoration flags. An empty subset returns the input unchanged.
pub fn relayout_subgraph(
    all_nodes: &[PositionedNode],
    edges: &[Edge],
    subset_ids: &HashSet<String>,
    options: &LayoutOptions,
) -> Vec<PositionedNode> {
    if subset_ids.is_empty() {
        return all_nodes.to_vec();
    }

    let subset_nodes: Vec<Node> = all_nodes
        .iter()
        .filter(|p| subset_ids.contains(p.id()))
        .map(|p| p.node.clone())
        .collect();

    let sub_result = layout(&subset_nodes, edges, options);
    let new_coords: HashMap<&str, (f64, f64)> = sub_result
        .nodes
        .iter()
        .map(|p| (p.id(), (p.x, p.y)))
        .collect();

    all_nodes
        .iter()
        .map(|p| match new_coords.get(p.id()) {
            Some(&(x, y)) => p.moved_to(x, y),
            None => p.clone(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
