//! Classic per-source Brandes over a petgraph graph.
//!
//! # Algorithm
//!
//! For each source `s`:
//!
//! 1. BFS from `s`, recording distances, shortest-path counts `σ` and the
//!    predecessor list of every reached node.
//! 2. Pop nodes in reverse BFS order, pushing `σ_v / σ_w · (1 + δ_w)` onto
//!    each predecessor `v` of `w`.
//! 3. Add `δ_w` into the score of every `w ≠ s`.
//!
//! Complexity: O(k · (V + E)) for `k` sources. Scores are unnormalized, with
//! the same ordered-pair convention as [`crate::betweenness_centrality`], so
//! the two can be compared entry by entry. Parallel edges count once.

use std::collections::VecDeque;

use petgraph::{
    Direction, EdgeType,
    graph::{Graph, IndexType, NodeIndex},
};
use tracing::instrument;

use crate::error::{BcError, Result};

/// Betweenness of every node of `graph`, summed over `sources`.
///
/// Nodes are identified by `NodeIndex::index()`. Undirected graphs are
/// walked in both directions.
///
/// # Errors
///
/// Returns [`BcError::InvalidInput`] if a source is not a node of `graph`.
#[instrument(skip(graph), fields(n = graph.node_count()))]
pub fn classic_betweenness<N, E, Ty, Ix>(
    graph: &Graph<N, E, Ty, Ix>,
    sources: &[usize],
) -> Result<Vec<f64>>
where
    Ty: EdgeType,
    Ix: IndexType,
{
    let n = graph.node_count();
    if let Some(&bad) = sources.iter().find(|&&s| s >= n) {
        return Err(BcError::invalid(format!(
            "source {bad} out of range for {n} nodes"
        )));
    }

    // Distinct successors per node, so parallel edges do not double σ.
    let successors: Vec<Vec<usize>> = (0..n)
        .map(|v| {
            let mut out: Vec<usize> = graph
                .neighbors_directed(NodeIndex::new(v), Direction::Outgoing)
                .map(|w| w.index())
                .collect();
            out.sort_unstable();
            out.dedup();
            out
        })
        .collect();

    let mut cb = vec![0.0; n];

    for &s in sources {
        let mut stack: Vec<usize> = Vec::with_capacity(n);
        let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut sigma = vec![0.0_f64; n];
        sigma[s] = 1.0;
        let mut dist: Vec<Option<usize>> = vec![None; n];
        dist[s] = Some(0);

        let mut queue = VecDeque::from([s]);
        while let Some(v) = queue.pop_front() {
            stack.push(v);
            let Some(dv) = dist[v] else { continue };

            for &w in &successors[v] {
                if dist[w].is_none() {
                    dist[w] = Some(dv + 1);
                    queue.push_back(w);
                }
                if dist[w] == Some(dv + 1) {
                    sigma[w] += sigma[v];
                    predecessors[w].push(v);
                }
            }
        }

        let mut delta = vec![0.0_f64; n];
        while let Some(w) = stack.pop() {
            for &v in &predecessors[w] {
                delta[v] += (sigma[v] / sigma[w]) * (1.0 + delta[w]);
            }
            if w != s {
                cb[w] += delta[w];
            }
        }
    }

    Ok(cb)
}

#[cfg(test)]
mod tests {
    use super::*;
    use petgraph::graph::{DiGraph, UnGraph};

    fn digraph(n: usize, edges: &[(u32, u32)]) -> DiGraph<(), ()> {
        let mut g = DiGraph::new();
        for _ in 0..n {
            g.add_node(());
        }
        g.extend_with_edges(edges.iter().copied());
        g
    }

    fn all(n: usize) -> Vec<usize> {
        (0..n).collect()
    }

    #[test]
    fn linear_chain_middle_node_has_betweenness() {
        // A → B → C
        let g = digraph(3, &[(0, 1), (1, 2)]);
        let bc = classic_betweenness(&g, &all(3)).expect("bc");
        assert_eq!(bc, vec![0.0, 1.0, 0.0]);
    }

    #[test]
    fn diamond_splits_evenly() {
        // A → B, A → C, B → D, C → D
        let g = digraph(4, &[(0, 1), (0, 2), (1, 3), (2, 3)]);
        let bc = classic_betweenness(&g, &all(4)).expect("bc");
        assert!((bc[1] - 0.5).abs() < 1e-10);
        assert!((bc[2] - 0.5).abs() < 1e-10);
        assert!(bc[0].abs() < 1e-10 && bc[3].abs() < 1e-10);
    }

    #[test]
    fn parallel_edges_count_once() {
        let g = digraph(3, &[(0, 1), (0, 1), (1, 2)]);
        let bc = classic_betweenness(&g, &all(3)).expect("bc");
        assert_eq!(bc, vec![0.0, 1.0, 0.0]);
    }

    #[test]
    fn undirected_star_counts_ordered_pairs() {
        let g = UnGraph::<(), ()>::from_edges([(0, 1), (0, 2), (0, 3), (0, 4)]);
        let bc = classic_betweenness(&g, &all(5)).expect("bc");
        assert!((bc[0] - 12.0).abs() < 1e-10);
        assert!(bc[1..].iter().all(|x| x.abs() < 1e-10));
    }

    #[test]
    fn source_subset_only_counts_its_paths() {
        let g = digraph(5, &[(0, 1), (1, 2), (2, 3), (3, 4)]);
        let bc = classic_betweenness(&g, &[0]).expect("bc");
        assert_eq!(bc, vec![0.0, 3.0, 2.0, 1.0, 0.0]);
    }

    #[test]
    fn out_of_range_source_is_rejected() {
        let g = digraph(2, &[(0, 1)]);
        assert!(classic_betweenness(&g, &[2]).is_err());
    }
}
