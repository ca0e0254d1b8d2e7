#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod enums;
pub mod graph;
pub mod impact;
pub mod layout;
pub mod structures;
#[cfg(test)]
pub mod test_helpers;
pub mod types;

pub use enums::{DependencyKind, EdgeKindTag, NodeKindTag, ResourceKind, Severity};
pub use graph::{
    EdgeWeight, GraphNode, NodeWeight, ResourceGraph, build_graph, find_cycles, find_cycles_in,
    has_cycles,
};
pub use impact::{
    AffectedNode, AffectedNodeRef, BlastRadiusResult, DEFAULT_MAX_DEPTH, ImpactSummary,
    affected_edges, propagate, resolve_affected, summarize,
};
pub use layout::{
    FlowDirection, GraphBounds, LayoutOptions, LayoutResult, Ranker, calculate_bounds, layout,
    optimal_direction, relayout_subgraph,
};
pub use structures::{Edge, Node, PositionedNode};
pub use types::SourceLocation;

/// Returns the current version of the infragraph-core library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    #[test]
    fn version_is_semver() {
        let v = version();
        let parts: Vec<&str> = v.split('.').collect();
        assert_eq!(parts.len(), 3, "version should have 3 parts: {v}");
        for part in parts {
            part.parse::<u32>().expect("each part should be a number");
        }
    }
}
