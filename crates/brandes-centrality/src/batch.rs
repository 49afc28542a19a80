//! Entry points: validate, then run forward → backward → reduce.

use brandes_sparse::{DenseVector, SparseMatrix};
use tracing::{debug, info, instrument, warn};

use crate::backward::{accumulate_dependencies, inverse_path_counts};
use crate::config::BetweennessConfig;
use crate::error::{BcError, Result};
use crate::forward::forward_discovery;
use crate::reduce::{normalize, reduce_centrality};
use crate::sources::Sources;

/// Betweenness centrality of every node, accumulated over `sources`.
///
/// The adjacency is read structurally: any stored entry is an edge,
/// whatever its value. With [`Sources::All`] the result is exact
/// (unnormalized, ordered pairs); with a subset it is the sum of the
/// subset's dependencies.
///
/// # Errors
///
/// - [`BcError::InvalidInput`] if the adjacency is not square or the
///   sources do not resolve (empty, out of range, duplicated). Nothing is
///   allocated in that case.
/// - [`BcError::Engine`] if a primitive fails, allocation failure included.
pub fn betweenness_centrality<T>(
    adjacency: &SparseMatrix<T>,
    sources: &Sources,
) -> Result<DenseVector<f64>> {
    let ids = prepare(adjacency, sources)?;
    let structure = adjacency.pattern()?;
    let run = run_batch(&structure, &ids)?;

    info!(
        n = structure.nrows(),
        sources = ids.len(),
        depth = run.depth,
        "betweenness complete"
    );
    Ok(run.scores)
}

/// Like [`betweenness_centrality`], with batching and normalization taken
/// from `config`.
///
/// Sources are processed in chunks of at most `batch_size` columns. Each
/// chunk runs the whole pipeline on its own and the per-chunk scores are
/// summed, so peak memory scales with the chunk rather than the full
/// source set while the result is unchanged.
///
/// # Errors
///
/// As [`betweenness_centrality`], plus [`BcError::InvalidInput`] for a
/// `batch_size` of zero.
pub fn betweenness_with_config<T>(
    adjacency: &SparseMatrix<T>,
    config: &BetweennessConfig,
) -> Result<DenseVector<f64>> {
    let ids = prepare(adjacency, &config.sources)?;
    let chunk = match config.batch_size {
        Some(0) => return Err(BcError::invalid("batch_size must be at least 1")),
        Some(size) => {
            if size > ids.len() {
                warn!(
                    batch_size = size,
                    sources = ids.len(),
                    "batch size exceeds source count"
                );
            }
            size.min(ids.len())
        }
        None => ids.len(),
    };

    let structure = adjacency.pattern()?;
    let mut total = DenseVector::filled(structure.nrows(), 0.0_f64)?;
    let mut depth = 0;
    let mut batches = 0_usize;

    for batch in ids.chunks(chunk) {
        let run = run_batch(&structure, batch)?;
        for (acc, score) in total.as_mut_slice().iter_mut().zip(run.scores.iter()) {
            *acc += score;
        }
        depth = depth.max(run.depth);
        batches += 1;
        debug!(batch = batches, sources = batch.len(), depth = run.depth, "batch done");
    }

    if config.normalized {
        normalize(&mut total, ids.len());
    }

    info!(
        n = structure.nrows(),
        sources = ids.len(),
        depth,
        batches,
        normalized = config.normalized,
        "betweenness complete"
    );
    Ok(total)
}

// ---------------------------------------------------------------------------
// Internals
// ---------------------------------------------------------------------------

struct BatchRun {
    scores: DenseVector<f64>,
    depth: usize,
}

/// Input checks that must pass before any matrix is built.
fn prepare<T>(adjacency: &SparseMatrix<T>, sources: &Sources) -> Result<Vec<usize>> {
    if !adjacency.is_square() {
        let (r, c) = adjacency.shape();
        return Err(BcError::invalid(format!(
            "adjacency must be square, got {r}x{c}"
        )));
    }
    sources.resolve(adjacency.nrows())
}

#[instrument(skip_all, fields(sources = sources.len()))]
fn run_batch(adjacency: &SparseMatrix<bool>, sources: &[usize]) -> Result<BatchRun> {
    let search = forward_discovery(adjacency, sources)?;
    let depth = search.history.len();
    let inv_paths = inverse_path_counts(&search.paths)?;
    let dependency =
        accumulate_dependencies(adjacency, &search.paths, &inv_paths, search.history)?;
    let scores = reduce_centrality(&dependency)?;
    Ok(BatchRun { scores, depth })
}
