#![forbid(unsafe_code)]
//! brandes-sparse: the sparse-matrix algebra the batched Brandes engine is
//! written against.
//!
//! The surface offers exactly the primitives the centrality pipeline
//! consumes:
//!
//! - masked multiply with a configurable [`Semiring`] ([`mxm`]),
//! - element-wise union and intersection ([`ewise_add`], [`ewise_mult`]),
//! - structural copy and structural-complement masking ([`SparseMatrix::pattern`], [`Mask`]),
//! - dense fill ([`SparseMatrix::filled`], [`DenseVector::filled`]),
//! - value mapping ([`SparseMatrix::map`]) and transpose,
//! - column sub-indexing ([`SparseMatrix::extract_columns`]),
//! - row reduction into an accumulator vector ([`reduce_rows`]).
//!
//! # Conventions
//!
//! - **Errors**: every fallible call returns [`AlgebraError`]; allocation
//!   failure is reported as [`AlgebraError::OutOfMemory`] rather than
//!   aborting.
//! - **Logging**: `tracing` at `trace` level only; kernels are hot.

pub mod error;
pub mod graph;
pub mod mask;
pub mod matrix;
pub mod ops;
pub mod print;
pub mod semiring;
pub mod vector;

pub use error::{AlgebraError, Result};
pub use mask::{Mask, Structure};
pub use matrix::SparseMatrix;
pub use ops::{Descriptor, ewise_add, ewise_mult, mxm, reduce_rows};
pub use print::{PrintLevel, write_vector};
pub use semiring::{PlusTimes, Semiring};
pub use vector::DenseVector;
