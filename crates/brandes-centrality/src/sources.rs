//! Source selection.
//!
//! Exact betweenness uses every node as a source. Sampled betweenness uses
//! a subset, either given explicitly or drawn uniformly at random from a
//! seed so runs are reproducible.
//!
//! In TOML the three forms read:
//!
//! ```toml
//! sources = "all"
//! sources = [0, 4, 9]
//! sources = { sample = 32, seed = 7 }
//! ```

use std::collections::HashSet;

use rand::{SeedableRng, rngs::StdRng, seq::index};
use serde::{Deserialize, Serialize};

use crate::error::{BcError, Result};

/// Which BFS roots contribute to the score.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "SourcesRepr", into = "SourcesRepr")]
pub enum Sources {
    /// Every node, in ascending order.
    #[default]
    All,
    /// An explicit ordered list of distinct node ids.
    List(Vec<usize>),
    /// `count` distinct nodes drawn uniformly without replacement.
    Sample { count: usize, seed: u64 },
}

impl Sources {
    /// Seeded uniform sample of `count` nodes.
    #[must_use]
    pub const fn sample(count: usize, seed: u64) -> Self {
        Self::Sample { count, seed }
    }

    /// Concrete, validated source ids for an `n`-node graph.
    ///
    /// # Errors
    ///
    /// Returns [`BcError::InvalidInput`] if the resolved list is empty, names
    /// a node outside `0..n`, repeats a node, or asks for more samples than
    /// there are nodes.
    pub fn resolve(&self, n: usize) -> Result<Vec<usize>> {
        let ids = match self {
            Self::All => (0..n).collect(),
            Self::List(ids) => ids.clone(),
            Self::Sample { count, seed } => {
                if *count > n {
                    return Err(BcError::invalid(format!(
                        "cannot sample {count} sources from {n} nodes"
                    )));
                }
                let mut rng = StdRng::seed_from_u64(*seed);
                let mut ids = index::sample(&mut rng, n, *count).into_vec();
                ids.sort_unstable();
                ids
            }
        };
        validate(&ids, n)?;
        Ok(ids)
    }
}

fn validate(ids: &[usize], n: usize) -> Result<()> {
    if ids.is_empty() {
        return Err(BcError::invalid("empty source list"));
    }
    let mut seen = HashSet::with_capacity(ids.len());
    for &id in ids {
        if id >= n {
            return Err(BcError::invalid(format!(
                "source {id} out of range for {n} nodes"
            )));
        }
        if !seen.insert(id) {
            return Err(BcError::invalid(format!("duplicate source {id}")));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Serde representation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Keyword {
    All,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum SourcesRepr {
    Keyword(Keyword),
    List(Vec<usize>),
    Sample {
        sample: usize,
        #[serde(default)]
        seed: u64,
    },
}

impl From<SourcesRepr> for Sources {
    fn from(repr: SourcesRepr) -> Self {
        match repr {
            SourcesRepr::Keyword(Keyword::All) => Self::All,
            SourcesRepr::List(ids) => Self::List(ids),
            SourcesRepr::Sample { sample, seed } => Self::Sample {
                count: sample,
                seed,
            },
        }
    }
}

impl From<Sources> for SourcesRepr {
    fn from(sources: Sources) -> Self {
        match sources {
            Sources::All => Self::Keyword(Keyword::All),
            Sources::List(ids) => Self::List(ids),
            Sources::Sample { count, seed } => Self::Sample {
                sample: count,
                seed,
            },
        }
    }
}
