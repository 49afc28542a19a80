//! Masked algebra primitives.
//!
//! Every operation returns a freshly allocated result, so a masked write
//! always *replaces*: positions the mask rejects are absent from the
//! output rather than carried over from a previous value. Accumulation is
//! expressed explicitly with [`ewise_add`] or [`reduce_rows`].

use tracing::trace;

use crate::error::{AlgebraError, Result, try_filled, try_reserve};
use crate::mask::{Mask, RowMask};
use crate::matrix::SparseMatrix;
use crate::semiring::Semiring;
use crate::vector::DenseVector;

/// Per-call operand flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Descriptor {
    /// Use the transpose of the first operand.
    pub transpose_first: bool,
}

impl Descriptor {
    /// Transpose the first operand.
    #[must_use]
    pub const fn transpose_first() -> Self {
        Self {
            transpose_first: true,
        }
    }
}

fn check_mask(op: &'static str, mask: Option<&Mask<'_>>, shape: (usize, usize)) -> Result<()> {
    match mask {
        Some(m) if m.shape() != shape => Err(AlgebraError::DimensionMismatch {
            op,
            expected: shape,
            actual: m.shape(),
        }),
        _ => Ok(()),
    }
}

/// Output buffers shared by the row-merging kernels.
struct CsrBuilder<T> {
    row_ptr: Vec<usize>,
    col_idx: Vec<usize>,
    values: Vec<T>,
}

impl<T> CsrBuilder<T> {
    fn with_rows(nrows: usize) -> Result<Self> {
        let mut row_ptr = Vec::new();
        try_reserve(&mut row_ptr, nrows + 1, "row pointers")?;
        row_ptr.push(0);
        Ok(Self {
            row_ptr,
            col_idx: Vec::new(),
            values: Vec::new(),
        })
    }

    fn reserve(&mut self, additional: usize) -> Result<()> {
        try_reserve(&mut self.col_idx, additional, "column indices")?;
        try_reserve(&mut self.values, additional, "values")
    }

    fn push(&mut self, col: usize, value: T) {
        self.col_idx.push(col);
        self.values.push(value);
    }

    fn end_row(&mut self) {
        self.row_ptr.push(self.col_idx.len());
    }

    fn finish(self, nrows: usize, ncols: usize) -> SparseMatrix<T> {
        SparseMatrix::from_raw(nrows, ncols, self.row_ptr, self.col_idx, self.values)
    }
}

/// Masked matrix multiply `C<M> = A ⊕.⊗ B`.
///
/// Row-wise (Gustavson) kernel with a dense accumulator per output row.
/// With `desc.transpose_first` the product uses `Aᵀ`.
///
/// # Errors
///
/// - [`AlgebraError::DimensionMismatch`] if the inner dimensions or the mask
///   shape disagree.
/// - [`AlgebraError::OutOfMemory`] if any buffer cannot be allocated.
pub fn mxm<A, B, S>(
    a: &SparseMatrix<A>,
    b: &SparseMatrix<B>,
    semiring: &S,
    mask: Option<&Mask<'_>>,
    desc: Descriptor,
) -> Result<SparseMatrix<S::Output>>
where
    A: Copy,
    B: Copy,
    S: Semiring<A, B>,
{
    let transposed;
    let a = if desc.transpose_first {
        transposed = a.transpose()?;
        &transposed
    } else {
        a
    };

    if a.ncols() != b.nrows() {
        return Err(AlgebraError::DimensionMismatch {
            op: "mxm",
            expected: (a.ncols(), b.ncols()),
            actual: b.shape(),
        });
    }
    let (nrows, ncols) = (a.nrows(), b.ncols());
    check_mask("mxm", mask, (nrows, ncols))?;

    let mut out = CsrBuilder::with_rows(nrows)?;
    let mut acc: Vec<Option<S::Output>> = try_filled(ncols, None, "mxm accumulator")?;
    let mut touched: Vec<usize> = Vec::new();
    try_reserve(&mut touched, ncols, "mxm touched list")?;
    let mut cursor = mask.copied().map(RowMask::new);

    for i in 0..nrows {
        if let Some(cursor) = cursor.as_mut() {
            cursor.load(i);
            if !cursor.admits_any() {
                out.end_row();
                continue;
            }
        }

        let (a_cols, a_vals) = a.row(i);
        for (&k, &av) in a_cols.iter().zip(a_vals) {
            let (b_cols, b_vals) = b.row(k);
            for (&j, &bv) in b_cols.iter().zip(b_vals) {
                if cursor.as_ref().is_some_and(|c| !c.admits(j)) {
                    continue;
                }
                let product = semiring.multiply(av, bv);
                let slot = &mut acc[j];
                *slot = Some(match *slot {
                    Some(sum) => semiring.add(sum, product),
                    None => {
                        touched.push(j);
                        product
                    }
                });
            }
        }

        touched.sort_unstable();
        out.reserve(touched.len())?;
        for &j in &touched {
            if let Some(value) = acc[j].take() {
                out.push(j, value);
            }
        }
        touched.clear();
        out.end_row();
    }

    let c = out.finish(nrows, ncols);
    trace!(nrows, ncols, nvals = c.nvals(), "mxm");
    Ok(c)
}

/// Element-wise union `C = A ∪ B`.
///
/// Where both operands store a value the result is `op(a, b)`; where only
/// one does, that value is copied through.
///
/// # Errors
///
/// - [`AlgebraError::DimensionMismatch`] if the shapes differ.
/// - [`AlgebraError::OutOfMemory`] if the output cannot be allocated.
pub fn ewise_add<T: Copy>(
    a: &SparseMatrix<T>,
    b: &SparseMatrix<T>,
    op: impl Fn(T, T) -> T,
) -> Result<SparseMatrix<T>> {
    if a.shape() != b.shape() {
        return Err(AlgebraError::DimensionMismatch {
            op: "ewise_add",
            expected: a.shape(),
            actual: b.shape(),
        });
    }
    let (nrows, ncols) = a.shape();
    let mut out = CsrBuilder::with_rows(nrows)?;

    for i in 0..nrows {
        let (a_cols, a_vals) = a.row(i);
        let (b_cols, b_vals) = b.row(i);
        out.reserve(a_cols.len() + b_cols.len())?;

        let (mut p, mut q) = (0, 0);
        while p < a_cols.len() && q < b_cols.len() {
            match a_cols[p].cmp(&b_cols[q]) {
                std::cmp::Ordering::Less => {
                    out.push(a_cols[p], a_vals[p]);
                    p += 1;
                }
                std::cmp::Ordering::Greater => {
                    out.push(b_cols[q], b_vals[q]);
                    q += 1;
                }
                std::cmp::Ordering::Equal => {
                    out.push(a_cols[p], op(a_vals[p], b_vals[q]));
                    p += 1;
                    q += 1;
                }
            }
        }
        for (&j, &v) in a_cols[p..].iter().zip(&a_vals[p..]) {
            out.push(j, v);
        }
        for (&j, &v) in b_cols[q..].iter().zip(&b_vals[q..]) {
            out.push(j, v);
        }
        out.end_row();
    }

    Ok(out.finish(nrows, ncols))
}

/// Element-wise intersection `C<M> = A ∩ B`.
///
/// Only positions stored in both operands (and admitted by the mask, if
/// one is given) appear in the result, with value `op(a, b)`.
///
/// # Errors
///
/// - [`AlgebraError::DimensionMismatch`] if operand or mask shapes differ.
/// - [`AlgebraError::OutOfMemory`] if the output cannot be allocated.
pub fn ewise_mult<A: Copy, B: Copy, C>(
    a: &SparseMatrix<A>,
    b: &SparseMatrix<B>,
    op: impl Fn(A, B) -> C,
    mask: Option<&Mask<'_>>,
) -> Result<SparseMatrix<C>> {
    if a.shape() != b.shape() {
        return Err(AlgebraError::DimensionMismatch {
            op: "ewise_mult",
            expected: a.shape(),
            actual: b.shape(),
        });
    }
    let (nrows, ncols) = a.shape();
    check_mask("ewise_mult", mask, (nrows, ncols))?;

    let mut out = CsrBuilder::with_rows(nrows)?;
    let mut cursor = mask.copied().map(RowMask::new);

    for i in 0..nrows {
        if let Some(cursor) = cursor.as_mut() {
            cursor.load(i);
            if !cursor.admits_any() {
                out.end_row();
                continue;
            }
        }

        let (a_cols, a_vals) = a.row(i);
        let (b_cols, b_vals) = b.row(i);
        out.reserve(a_cols.len().min(b_cols.len()))?;

        let (mut p, mut q) = (0, 0);
        while p < a_cols.len() && q < b_cols.len() {
            match a_cols[p].cmp(&b_cols[q]) {
                std::cmp::Ordering::Less => p += 1,
                std::cmp::Ordering::Greater => q += 1,
                std::cmp::Ordering::Equal => {
                    let j = a_cols[p];
                    if cursor.as_ref().is_none_or(|c| c.admits(j)) {
                        out.push(j, op(a_vals[p], b_vals[q]));
                    }
                    p += 1;
                    q += 1;
                }
            }
        }
        out.end_row();
    }

    Ok(out.finish(nrows, ncols))
}

/// Reduce every row of `m` with `op` and accumulate into `acc`.
///
/// `acc[i] = op(acc[i], op-fold of row i)`. Rows with no stored entries
/// leave `acc[i]` untouched.
///
/// # Errors
///
/// Returns [`AlgebraError::DimensionMismatch`] if `acc.len() != m.nrows()`.
pub fn reduce_rows<T: Copy>(
    m: &SparseMatrix<T>,
    acc: &mut DenseVector<T>,
    op: impl Fn(T, T) -> T,
) -> Result<()> {
    if acc.len() != m.nrows() {
        return Err(AlgebraError::DimensionMismatch {
            op: "reduce_rows",
            expected: (m.nrows(), 1),
            actual: (acc.len(), 1),
        });
    }
    let out = acc.as_mut_slice();
    for (i, slot) in out.iter_mut().enumerate() {
        let (_, vals) = m.row(i);
        if let Some(row_sum) = vals.iter().copied().reduce(&op) {
            *slot = op(*slot, row_sum);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
