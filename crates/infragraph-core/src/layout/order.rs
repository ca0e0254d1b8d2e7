/// In-rank node ordering via the barycenter heuristic.
///
/// Classic Sugiyama crossing reduction: sweep the rank sequence downward and
/// upward alternately, reordering each rank by the mean position of each
/// node's neighbours in the adjacent fixed rank. Nodes with no neighbours in
/// the sweep direction keep their current position.
use std::cmp::Ordering;

/// Number of alternating down/up sweeps. Diminishing returns past a handful
/// of passes on the graph sizes the engine sees.
const SWEEP_ITERATIONS: usize = 4;

/// Groups nodes by rank and orders each rank to reduce edge crossings.
///
/// `ranks[v]` is the rank of dense node index `v`; `edges` lists dense
/// `(source, target)` pairs (all of them, feedback included — ordering
/// benefits from every adjacency even when an edge was excluded from rank
/// constraints). Returns one ordered `Vec` of node indices per rank. The
/// initial order within each rank is input order, so the result is
/// deterministic for a given input.
pub(super) fn order_ranks(
    node_count: usize,
    ranks: &[usize],
    edges: &[(usize, usize)],
) -> Vec<Vec<usize>> {
    let rank_count = ranks.iter().copied().max().map_or(0, |m| m + 1);
    let mut grouped: Vec<Vec<usize>> = vec![Vec::new(); rank_count];
    for node in 0..node_count {
        grouped[ranks[node]].push(node);
    }

    let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); node_count];
    let mut successors: Vec<Vec<usize>> = vec![Vec::new(); node_count];
    for &(source, target) in edges {
        if source == target {
            continue;
        }
        successors[source].push(target);
        predecessors[target].push(source);
    }

    // Current in-rank position of each node, updated after every reorder.
    let mut position: Vec<f64> = vec![0.0; node_count];
    for rank in &grouped {
        for (offset, &node) in rank.iter().enumerate() {
            position[node] = offset as f64;
        }
    }

    for iteration in 0..SWEEP_ITERATIONS {
        let downward = iteration % 2 == 0;
        let rank_indices: Vec<usize> = if downward {
            (1..rank_count).collect()
        } else {
            (0..rank_count.saturating_sub(1)).rev().collect()
        };

        for rank_idx in rank_indices {
            let neighbours = if downward { &predecessors } else { &successors };

            let mut keyed: Vec<(usize, f64)> = grouped[rank_idx]
                .iter()
                .map(|&node| {
                    let adjacent: Vec<f64> = neighbours[node]
                        .iter()
                        .map(|&other| position[other])
                        .collect();
                    let barycenter = if adjacent.is_empty() {
                        position[node]
                    } else {
                        adjacent.iter().sum::<f64>() / adjacent.len() as f64
                    };
                    (node, barycenter)
                })
                .collect();

            keyed.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));
            grouped[rank_idx] = keyed.iter().map(|&(node, _)| node).collect();

            for (offset, &(node, _)) in keyed.iter().enumerate() {
                position[node] = offset as f64;
            }
        }
    }

    grouped
}
