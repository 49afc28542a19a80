//! Collapse per-source dependencies into one score per node.

use brandes_sparse::{DenseVector, SparseMatrix, reduce_rows};
use tracing::warn;

use crate::error::Result;

/// `result[i] = Σ_k dep(i, k) - k_total`.
///
/// Every `(node, source)` position starts at 1.0 in the dependency matrix,
/// so the `-num_sources` baseline cancels the trivial self-path count and
/// leaves `Σ_s δ_s(i)` over the selected sources.
///
/// # Errors
///
/// Returns an allocation error from the engine.
#[allow(clippy::cast_precision_loss)]
pub fn reduce_centrality(dependency: &SparseMatrix<f64>) -> Result<DenseVector<f64>> {
    let (n, num_sources) = dependency.shape();
    let mut centrality = DenseVector::filled(n, -(num_sources as f64))?;
    reduce_rows(dependency, &mut centrality, |x, y| x + y)?;
    Ok(centrality)
}

/// Scale raw scores in place.
///
/// A sample of `num_sources` sources is extrapolated to all `n` nodes
/// (`× n / num_sources`), then divided by `(n - 1)(n - 2)`, the number of
/// ordered pairs a node can lie between in a directed graph. Graphs with
/// fewer than three nodes have no interior positions and are left as-is.
#[allow(clippy::cast_precision_loss)]
pub fn normalize(scores: &mut DenseVector<f64>, num_sources: usize) {
    let n = scores.len();
    if n < 3 || num_sources == 0 {
        warn!(n, num_sources, "normalization skipped");
        return;
    }
    let extrapolate = n as f64 / num_sources as f64;
    let pairs = ((n - 1) * (n - 2)) as f64;
    let scale = extrapolate / pairs;
    for s in scores.as_mut_slice() {
        *s *= scale;
    }
}
