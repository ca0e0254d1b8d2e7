/// Rank (layer) assignment for the layered layout pipeline.
///
/// Works on a dense edge-pair representation of the canonical graph:
/// `(source, target)` pairs of dense node indices. The caller removes
/// cycles first by supplying the feedback-edge set from [`feedback_edges`];
/// those edges are excluded from rank constraints only and still appear in
/// the final layout output.
use std::collections::HashSet;

use super::Ranker;

/// Computes a feedback-edge set whose removal makes the graph acyclic.
///
/// Greedy iterative DFS: an edge into a node currently on the DFS path is a
/// back edge and joins the set. Self-loops are always feedback. The set is
/// not guaranteed minimal, only sufficient.
pub(super) fn feedback_edges(node_count: usize, edges: &[(usize, usize)]) -> HashSet<usize> {
    let mut successors: Vec<Vec<usize>> = vec![Vec::new(); node_count];
    for (pos, &(source, _)) in edges.iter().enumerate() {
        successors[source].push(pos);
    }

    // 0 = white (unvisited), 1 = gray (on path), 2 = black (done).
    let mut color: Vec<u8> = vec![0; node_count];
    let mut feedback: HashSet<usize> = HashSet::new();

    for start in 0..node_count {
        if color[start] != 0 {
            continue;
        }

        // Frame: (node, next index into its successor edge list).
        let mut stack: Vec<(usize, usize)> = vec![(start, 0)];
        color[start] = 1;

        while let Some(frame) = stack.last_mut() {
            let (node, cursor) = frame;
            let node = *node;

            if *cursor >= successors[node].len() {
                color[node] = 2;
                stack.pop();
                continue;
            }
            let edge_pos = successors[node][*cursor];
            *cursor += 1;

            let (_, target) = edges[edge_pos];
            match color[target] {
                1 => {
                    // Back edge (including self-loops): breaking it removes
                    // the cycle it closes.
                    feedback.insert(edge_pos);
                }
                0 => {
                    color[target] = 1;
                    stack.push((target, 0));
                }
                _ => {}
            }
        }
    }

    feedback
}

/// Assigns a rank to every node, consistent with edge direction.
///
/// `skip` lists edge positions excluded from rank constraints (the feedback
/// set). With [`Ranker::LongestPath`] each node's rank is its longest
/// distance from any root; [`Ranker::Tight`] additionally pulls nodes with
/// successors down to one rank above their nearest successor, reducing edge
/// slack on fan-in shapes. Isolated nodes land on rank 0.
///
/// If the constraint graph still contains a cycle (acyclicer disabled on
/// cyclic input), the nodes involved receive rank 0: a defined, finite
/// result rather than an error.
pub(super) fn assign_ranks(
    node_count: usize,
    edges: &[(usize, usize)],
    skip: &HashSet<usize>,
    ranker: Ranker,
) -> Vec<usize> {
    let mut in_degree: Vec<usize> = vec![0; node_count];
    let mut successors: Vec<Vec<usize>> = vec![Vec::new(); node_count];

    for (pos, &(source, target)) in edges.iter().enumerate() {
        if skip.contains(&pos) || source == target {
            continue;
        }
        in_degree[target] += 1;
        successors[source].push(target);
    }

    let mut ranks: Vec<usize> = vec![0; node_count];
    let mut queue: Vec<usize> = (0..node_count).filter(|&v| in_degree[v] == 0).collect();
    let mut topo_order: Vec<usize> = Vec::with_capacity(node_count);

    // Kahn's topological sweep; rank = longest path from the roots.
    let mut head = 0;
    while head < queue.len() {
        let node = queue[head];
        head += 1;
        topo_order.push(node);

        for &succ in &successors[node] {
            if ranks[succ] < ranks[node] + 1 {
                ranks[succ] = ranks[node] + 1;
            }
            in_degree[succ] -= 1;
            if in_degree[succ] == 0 {
                queue.push(succ);
            }
        }
    }

    if matches!(ranker, Ranker::Tight) {
        // Reverse-topological pass: move each node as close to its
        // successors as its predecessors allow. Only ever increases a rank,
        // so every edge constraint assigned above stays satisfied.
        for &node in topo_order.iter().rev() {
            let nearest_succ = successors[node].iter().map(|&s| ranks[s]).min();
            if let Some(succ_rank) = nearest_succ {
                if succ_rank > 0 && ranks[node] < succ_rank - 1 {
                    ranks[node] = succ_rank - 1;
                }
            }
        }
    }

    ranks
}
