//! Adjacency adapters.
//!
//! An edge `i → j` becomes the stored entry `(i, j)` of a boolean `n x n`
//! matrix. Parallel edges collapse to a single entry. Undirected graphs
//! store both directions.

use petgraph::EdgeType;
use petgraph::graph::IndexType;
use petgraph::visit::EdgeRef;

use crate::error::Result;
use crate::matrix::SparseMatrix;

/// Build a boolean adjacency structure from directed `(from, to)` pairs.
///
/// # Errors
///
/// Returns [`crate::AlgebraError::IndexOutOfBounds`] if an endpoint is not
/// below `n`.
pub fn from_edges(n: usize, edges: &[(usize, usize)]) -> Result<SparseMatrix<bool>> {
    SparseMatrix::build(n, n, edges.iter().map(|&(i, j)| (i, j, true)), |a, b| a || b)
}

/// Like [`from_edges`] but stores every edge in both directions.
///
/// # Errors
///
/// Returns [`crate::AlgebraError::IndexOutOfBounds`] if an endpoint is not
/// below `n`.
pub fn from_undirected_edges(n: usize, edges: &[(usize, usize)]) -> Result<SparseMatrix<bool>> {
    SparseMatrix::build(
        n,
        n,
        edges
            .iter()
            .flat_map(|&(i, j)| [(i, j, true), (j, i, true)]),
        |a, b| a || b,
    )
}

/// Build the adjacency structure of a petgraph graph, indexed by
/// `NodeIndex::index()`.
///
/// # Errors
///
/// Returns [`crate::AlgebraError::OutOfMemory`] if the matrix cannot be
/// allocated.
pub fn from_petgraph<N, E, Ty, Ix>(
    graph: &petgraph::Graph<N, E, Ty, Ix>,
) -> Result<SparseMatrix<bool>>
where
    Ty: EdgeType,
    Ix: IndexType,
{
    let n = graph.node_count();
    let directed = graph.is_directed();
    let tuples = graph.edge_references().flat_map(|e| {
        let (i, j) = (e.source().index(), e.target().index());
        let reverse = (!directed && i != j).then_some((j, i, true));
        std::iter::once((i, j, true)).chain(reverse)
    });
    SparseMatrix::build(n, n, tuples, |a, b| a || b)
}
