/// Impact propagation ("blast radius") analysis.
///
/// Answers the question "if this node changes or fails, what else is
/// affected?" by walking the dependency graph along the edge direction.
/// An edge `A -> B` reads "B depends on A", so a change to A affects B; the
/// traversal follows edges source-to-target, breadth-first, with per-node
/// depth tracking and an optional depth cap.
///
/// The engine is forgiving by construction: an unknown source id yields an
/// empty result, a zero depth cap suppresses all expansion, and a missing
/// lookup entry during enrichment drops that node rather than erroring.
use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::enums::{NodeKindTag, Severity};
use crate::structures::{Edge, Node};

/// Depth cap applied when callers pass no explicit limit.
pub const DEFAULT_MAX_DEPTH: u32 = 10;

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// One node reached by the propagation walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AffectedNodeRef {
    /// Id of the affected node.
    pub id: String,
    /// Distance from the source: 1 for direct dependents, 2 for dependents
    /// of dependents, and so on. The source itself is never listed.
    pub depth: u32,
}

/// Full outcome of a single propagation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct BlastRadiusResult {
    /// The node the propagation started from.
    pub source_id: String,
    /// Nodes at depth 1.
    pub direct_dependent_count: usize,
    /// Nodes at depth 2 or beyond.
    pub transitive_dependent_count: usize,
    /// Affected fraction of the rest of the graph, in `[0, 1]`.
    pub impact_score: f64,
    /// Banded severity derived from the score.
    pub severity: Severity,
    /// Every reached node, in breadth-first discovery order.
    pub affected: Vec<AffectedNodeRef>,
}

impl BlastRadiusResult {
    /// Total number of affected nodes, direct and transitive.
    pub fn affected_count(&self) -> usize {
        self.affected.len()
    }

    /// Groups affected node ids by depth, ascending.
    pub fn depths(&self) -> BTreeMap<u32, Vec<String>> {
        let mut by_depth: BTreeMap<u32, Vec<String>> = BTreeMap::new();
        for entry in &self.affected {
            by_depth.entry(entry.depth).or_default().push(entry.id.clone());
        }
        by_depth
    }
}

/// An affected node enriched with display data from a node lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AffectedNode {
    pub id: String,
    pub name: String,
    pub kind: NodeKindTag,
    /// `true` when the node sits at depth 1 from the source.
    pub is_direct: bool,
    pub depth: u32,
}

/// Aggregate figures over a propagation result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ImpactSummary {
    /// Direct dependents as a percentage of all affected nodes.
    pub direct_percent: f64,
    /// Transitive dependents as a percentage of all affected nodes.
    pub transitive_percent: f64,
    /// Deepest level the walk reached (0 when nothing was affected).
    pub max_depth_reached: u32,
}

// ---------------------------------------------------------------------------
// Propagation
// ---------------------------------------------------------------------------

/// Walks the dependency relation breadth-first from `source_id`.
///
/// `total_node_count` is the size of the surrounding graph and only feeds
/// the impact score; the walk itself is driven entirely by `edges`. Nodes
/// further than `max_depth` hops from the source are not visited, and a
/// `max_depth` of zero disables expansion entirely. Unknown source ids
/// yield an empty result with a minimal severity.
pub fn propagate(
    source_id: &str,
    edges: &[Edge],
    total_node_count: usize,
    max_depth: u32,
) -> BlastRadiusResult {
    // Forward adjacency: each edge's target depends on its source.
    let mut dependents: HashMap<&str, Vec<&str>> = HashMap::new();
    for edge in edges {
        dependents
            .entry(edge.source.as_str())
            .or_default()
            .push(edge.target.as_str());
    }

    let mut affected: Vec<AffectedNodeRef> = Vec::new();
    let mut visited: HashSet<&str> = HashSet::new();
    visited.insert(source_id);

    let mut queue: VecDeque<(&str, u32)> = VecDeque::new();
    queue.push_back((source_id, 0));

    while let Some((id, depth)) = queue.pop_front() {
        if depth >= max_depth {
            continue;
        }
        let Some(next) = dependents.get(id) else {
            continue;
        };
        for &dependent in next {
            if !visited.insert(dependent) {
                continue;
            }
            affected.push(AffectedNodeRef {
                id: dependent.to_owned(),
                depth: depth + 1,
            });
            queue.push_back((dependent, depth + 1));
        }
    }

    let direct = affected.iter().filter(|a| a.depth == 1).count();
    let transitive = affected.len() - direct;

    // Score against every *other* node in the graph. Edge sets that reach
    // beyond the declared node count still produce a score in [0, 1].
    let impact_score = if total_node_count > 1 {
        (affected.len() as f64 / (total_node_count - 1) as f64).min(1.0)
    } else {
        0.0
    };

    BlastRadiusResult {
        source_id: source_id.to_owned(),
        direct_dependent_count: direct,
        transitive_dependent_count: transitive,
        impact_score,
        severity: Severity::from_score(impact_score),
        affected,
    }
}

/// Enriches a propagation result with node display data.
///
/// Affected ids missing from `lookup` are silently dropped. Output order
/// follows the result's discovery order.
pub fn resolve_affected(
    result: &BlastRadiusResult,
    lookup: &HashMap<String, Node>,
) -> Vec<AffectedNode> {
    result
        .affected
        .iter()
        .filter_map(|entry| {
            let node = lookup.get(&entry.id)?;
            Some(AffectedNode {
                id: node.id.clone(),
                name: node.name.clone(),
                kind: node.kind.clone(),
                is_direct: entry.depth == 1,
                depth: entry.depth,
            })
        })
        .collect()
}

/// Filters `edges` down to those fully inside the blast radius, the source
/// included.
pub fn affected_edges(edges: &[Edge], result: &BlastRadiusResult) -> Vec<Edge> {
    let mut inside: HashSet<&str> = result
        .affected
        .iter()
        .map(|entry| entry.id.as_str())
        .collect();
    inside.insert(result.source_id.as_str());

    edges
        .iter()
        .filter(|edge| {
            inside.contains(edge.source.as_str()) && inside.contains(edge.target.as_str())
        })
        .cloned()
        .collect()
}

/// Derives aggregate percentages and the deepest reached level.
///
/// An empty result yields all zeros rather than a division error.
pub fn summarize(result: &BlastRadiusResult) -> ImpactSummary {
    let total = result.affected.len();
    if total == 0 {
        return ImpactSummary {
            direct_percent: 0.0,
            transitive_percent: 0.0,
            max_depth_reached: 0,
        };
    }

    let direct = result.direct_dependent_count as f64;
    let transitive = result.transitive_dependent_count as f64;
    let max_depth_reached = result
        .affected
        .iter()
        .map(|entry| entry.depth)
        .max()
        .unwrap_or(0);

    ImpactSummary {
        direct_percent: direct / total as f64 * 100.0,
        transitive_percent: transitive / total as f64 * 100.0,
        max_depth_reached,
    }
}
