//! Backward phase: dependency accumulation over the recorded BFS levels.
//!
//! With `dep(v, s) = 1 + δ_s(v)` held for every node and source, Brandes'
//! recurrence
//!
//! ```text
//! δ_s(v) = Σ_{w : v ∈ P_s(w)} σ_sv / σ_sw · (1 + δ_s(w))
//! ```
//!
//! becomes, for every depth index `d` from deepest down to 1:
//!
//! ```text
//! share<S[d]>    = dep .× inv_paths        masked replace, not accumulate
//! credit<S[d-1]> = A +.× share             one hop back along out-edges
//! dep           += credit .× paths
//! ```
//!
//! Level 0 needs no step of its own: its predecessors are the sources,
//! whose own credit is discarded by the reducer.

use brandes_sparse::{Descriptor, Mask, PlusTimes, SparseMatrix, ewise_add, ewise_mult, mxm};
use tracing::{debug, instrument};

use crate::error::Result;
use crate::forward::DepthHistory;

/// `1 / paths` at every reached position.
///
/// # Errors
///
/// Returns an allocation error from the engine.
pub fn inverse_path_counts(paths: &SparseMatrix<f64>) -> Result<SparseMatrix<f64>> {
    Ok(paths.map(|&count| count.recip())?)
}

/// Accumulate the per-source dependency matrix.
///
/// Consumes `history`; each level is dropped as soon as the step that
/// reads it finishes. The returned matrix is dense (`n x k`) and only
/// meaningful once every level has been processed.
///
/// # Errors
///
/// Propagates the first failing algebra primitive.
#[instrument(skip_all, fields(depth = history.len()))]
pub fn accumulate_dependencies(
    adjacency: &SparseMatrix<bool>,
    paths: &SparseMatrix<f64>,
    inv_paths: &SparseMatrix<f64>,
    mut history: DepthHistory,
) -> Result<SparseMatrix<f64>> {
    let (n, k) = paths.shape();
    // Uniform 1.0 encodes the "+1" of (1 + δ) at every position up front.
    let mut dependency = SparseMatrix::filled(n, k, 1.0_f64)?;

    while let Some(level) = history.pop_deepest() {
        let Some(parent) = history.deepest() else {
            break;
        };

        let share = ewise_mult(
            &dependency,
            inv_paths,
            |dep, inv| dep * inv,
            Some(&Mask::structural(level.structure())),
        )?;

        let credit = mxm(
            adjacency,
            &share,
            &PlusTimes,
            Some(&Mask::structural(parent.structure())),
            Descriptor::default(),
        )?;

        let update = ewise_mult(&credit, paths, |c, p| c * p, None)?;
        dependency = ewise_add(&dependency, &update, |x, y| x + y)?;

        debug!(
            depth = history.len(),
            credited = update.nvals(),
            "backward level"
        );
    }

    Ok(dependency)
}
