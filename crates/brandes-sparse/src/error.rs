//! Error type for sparse algebra primitives.

use std::collections::TryReserveError;

/// Errors returned by matrix construction and the algebra primitives.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AlgebraError {
    /// A buffer could not be reserved.
    #[error("out of memory while allocating {what}")]
    OutOfMemory { what: &'static str },

    /// Operand shapes do not line up for the requested operation.
    #[error("{op}: dimension mismatch, expected {expected:?} got {actual:?}")]
    DimensionMismatch {
        op: &'static str,
        expected: (usize, usize),
        actual: (usize, usize),
    },

    /// A row or column index lies outside the matrix.
    #[error("index ({row}, {col}) out of bounds for {nrows}x{ncols} matrix")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        nrows: usize,
        ncols: usize,
    },

    /// An operand or argument is structurally invalid.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

pub type Result<T> = std::result::Result<T, AlgebraError>;

/// Reserve `additional` slots in `buf`, reporting failure instead of aborting.
pub(crate) fn try_reserve<T>(
    buf: &mut Vec<T>,
    additional: usize,
    what: &'static str,
) -> Result<()> {
    buf.try_reserve(additional)
        .map_err(|_: TryReserveError| AlgebraError::OutOfMemory { what })
}

/// Allocate a vector of `len` copies of `value` through fallible reservation.
pub(crate) fn try_filled<T: Clone>(len: usize, value: T, what: &'static str) -> Result<Vec<T>> {
    let mut buf = Vec::new();
    try_reserve(&mut buf, len, what)?;
    buf.resize(len, value);
    Ok(buf)
}
