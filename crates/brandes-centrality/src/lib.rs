#![forbid(unsafe_code)]
//! brandes-centrality: batched betweenness centrality on sparse matrices.
//!
//! All selected sources run as columns of one `n x k` matrix. A forward
//! multi-source BFS ([`forward`]) counts shortest paths and records which
//! `(node, source)` pairs were discovered at each depth; a backward sweep
//! ([`backward`]) propagates dependencies one depth at a time; the
//! [`reduce`] step sums them into one score per node.
//!
//! ```
//! use brandes_centrality::{Sources, betweenness_centrality};
//! use brandes_sparse::graph::from_edges;
//!
//! let a = from_edges(3, &[(0, 1), (1, 2)])?;
//! let bc = betweenness_centrality(&a, &Sources::All)?;
//! assert_eq!(bc.as_slice(), &[0.0, 1.0, 0.0]);
//! # Ok::<(), brandes_centrality::BcError>(())
//! ```
//!
//! # Conventions
//!
//! - **Errors**: [`BcError`] for computation, `anyhow::Result` for config
//!   loading.
//! - **Logging**: `tracing` macros (`info!`, `warn!`, `debug!`).

pub mod backward;
pub mod batch;
pub mod config;
pub mod error;
pub mod forward;
pub mod reduce;
pub mod reference;
pub mod sources;

pub use batch::{betweenness_centrality, betweenness_with_config};
pub use config::BetweennessConfig;
pub use error::{BcError, ErrorCode, Result};
pub use reference::classic_betweenness;
pub use sources::Sources;
