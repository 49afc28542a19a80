//! Forward phase: synchronized multi-source BFS.
//!
//! # Algorithm
//!
//! Every selected source owns one column of an `n x k` matrix, so all `k`
//! traversals advance together with one masked multiply per depth:
//!
//! ```text
//! paths(s_k, k) = 1                         for every source column k
//! frontier<!paths> = Aᵀ +.× paths           one hop from the sources
//! while frontier is non-empty:
//!     history.push(pattern(frontier))       discovered at this depth
//!     paths = paths ∪+ frontier
//!     frontier<!paths> = Aᵀ +.× frontier    replace, never accumulate
//! ```
//!
//! The `!paths` structural-complement mask only admits `(node, source)`
//! pairs that have never been reached, so each pair lands in exactly one
//! history level (or none, if unreachable). The frontier values are the
//! shortest-path counts for the pairs found at that depth, and because
//! levels are disjoint a count never changes once it is in `paths`.
//!
//! Counts are `f64`. They grow exponentially with depth on layered graphs
//! and an integer count would overflow; the backward phase only ever needs
//! their ratios.

use brandes_sparse::{AlgebraError, Descriptor, Mask, PlusTimes, SparseMatrix, ewise_add, mxm};
use tracing::{debug, instrument};

use crate::error::Result;

// ---------------------------------------------------------------------------
// DepthHistory
// ---------------------------------------------------------------------------

/// Append-only record of which `(node, source)` pairs were first reached at
/// each BFS depth.
///
/// Level `d` holds the pairs at distance `d + 1` from their source (level 0
/// is the sources' direct neighbours). The backward phase consumes levels
/// deepest-first with [`DepthHistory::pop_deepest`], dropping each one as
/// soon as it is no longer needed.
#[derive(Debug, Default)]
pub struct DepthHistory {
    levels: Vec<SparseMatrix<bool>>,
}

impl DepthHistory {
    #[must_use]
    pub const fn new() -> Self {
        Self { levels: Vec::new() }
    }

    /// Append the next depth.
    ///
    /// # Errors
    ///
    /// Returns [`AlgebraError::OutOfMemory`] if the sequence cannot grow.
    pub fn push(&mut self, level: SparseMatrix<bool>) -> Result<()> {
        self.levels
            .try_reserve(1)
            .map_err(|_| AlgebraError::OutOfMemory {
                what: "depth history",
            })?;
        self.levels.push(level);
        Ok(())
    }

    /// Number of recorded depths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Discovery matrix for depth index `d`.
    #[must_use]
    pub fn level(&self, d: usize) -> Option<&SparseMatrix<bool>> {
        self.levels.get(d)
    }

    /// Deepest level still held.
    #[must_use]
    pub fn deepest(&self) -> Option<&SparseMatrix<bool>> {
        self.levels.last()
    }

    /// Remove and return the deepest level.
    pub fn pop_deepest(&mut self) -> Option<SparseMatrix<bool>> {
        self.levels.pop()
    }

    /// Levels from shallowest to deepest.
    pub fn iter(&self) -> impl Iterator<Item = &SparseMatrix<bool>> {
        self.levels.iter()
    }
}

// ---------------------------------------------------------------------------
// Forward search
// ---------------------------------------------------------------------------

/// Output of the forward phase.
#[derive(Debug)]
pub struct ForwardSearch {
    /// `paths(i, k)`: number of shortest paths from source `k` to node `i`.
    /// Absent where `i` is unreachable from source `k`.
    pub paths: SparseMatrix<f64>,
    /// Per-depth discovery levels.
    pub history: DepthHistory,
}

/// Run the batched BFS from `sources` over the boolean adjacency structure.
///
/// `sources` must already be validated (non-empty, distinct, in range).
///
/// # Errors
///
/// Propagates the first failing algebra primitive; everything built so far
/// is dropped.
#[instrument(skip_all, fields(n = adjacency.nrows(), sources = sources.len()))]
pub fn forward_discovery(
    adjacency: &SparseMatrix<bool>,
    sources: &[usize],
) -> Result<ForwardSearch> {
    let n = adjacency.nrows();

    let mut paths = SparseMatrix::build(
        n,
        sources.len(),
        sources.iter().enumerate().map(|(k, &s)| (s, k, 1.0_f64)),
        |x, y| x + y,
    )?;

    // Aᵀ is loop-invariant.
    let adjacency_t = adjacency.transpose()?;

    let mut frontier = advance(&adjacency_t, &paths, &paths)?;
    let mut history = DepthHistory::new();

    while !frontier.is_empty() {
        history.push(frontier.pattern()?)?;
        paths = ewise_add(&paths, &frontier, |x, y| x + y)?;
        frontier = advance(&adjacency_t, &frontier, &paths)?;
        debug!(
            depth = history.len(),
            discovered = paths.nvals(),
            next = frontier.nvals(),
            "bfs level"
        );
    }

    Ok(ForwardSearch { paths, history })
}

/// One hop along out-edges, restricted to pairs not yet in `paths`.
fn advance(
    adjacency_t: &SparseMatrix<bool>,
    frontier: &SparseMatrix<f64>,
    paths: &SparseMatrix<f64>,
) -> Result<SparseMatrix<f64>> {
    let unseen = Mask::complement(paths.structure());
    Ok(mxm(
        adjacency_t,
        frontier,
        &PlusTimes,
        Some(&unseen),
        Descriptor::default(),
    )?)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
