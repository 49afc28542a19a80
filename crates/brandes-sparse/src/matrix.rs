//! Compressed sparse row matrix.
//!
//! # Layout
//!
//! ```text
//! row_ptr  = prefix sum of per-row entry counts, length nrows + 1
//! col_idx  = column of every stored entry, sorted and unique within a row
//! values   = value of every stored entry, parallel to col_idx
//!
//! row(i)   = col_idx[row_ptr[i] .. row_ptr[i + 1]]
//! ```
//!
//! A position that is not stored is *absent*, which is different from a
//! stored zero. Masks and element-wise operations look only at which
//! positions are stored.

use crate::error::{AlgebraError, Result, try_filled, try_reserve};
use crate::mask::Structure;

/// Sparse matrix in CSR form with typed values.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseMatrix<T> {
    nrows: usize,
    ncols: usize,
    row_ptr: Vec<usize>,
    col_idx: Vec<usize>,
    values: Vec<T>,
}

impl<T> SparseMatrix<T> {
    /// Empty `nrows x ncols` matrix with no stored entries.
    ///
    /// # Errors
    ///
    /// Returns [`AlgebraError::OutOfMemory`] if the row pointer array cannot
    /// be allocated.
    pub fn new(nrows: usize, ncols: usize) -> Result<Self> {
        let row_ptr = try_filled(
            nrows.checked_add(1).ok_or(AlgebraError::OutOfMemory { what: "row pointers" })?,
            0,
            "row pointers",
        )?;
        Ok(Self {
            nrows,
            ncols,
            row_ptr,
            col_idx: Vec::new(),
            values: Vec::new(),
        })
    }

    /// Assemble a matrix from raw CSR arrays produced by an operation that
    /// already guarantees sorted, unique, in-range columns.
    pub(crate) fn from_raw(
        nrows: usize,
        ncols: usize,
        row_ptr: Vec<usize>,
        col_idx: Vec<usize>,
        values: Vec<T>,
    ) -> Self {
        debug_assert_eq!(row_ptr.len(), nrows + 1);
        debug_assert_eq!(col_idx.len(), values.len());
        Self {
            nrows,
            ncols,
            row_ptr,
            col_idx,
            values,
        }
    }

    #[must_use]
    pub const fn nrows(&self) -> usize {
        self.nrows
    }

    #[must_use]
    pub const fn ncols(&self) -> usize {
        self.ncols
    }

    /// `(nrows, ncols)`.
    #[must_use]
    pub const fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    #[must_use]
    pub const fn is_square(&self) -> bool {
        self.nrows == self.ncols
    }

    /// Number of stored entries.
    #[must_use]
    pub fn nvals(&self) -> usize {
        self.values.len()
    }

    /// True when no entry is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Columns and values stored in row `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= nrows`.
    #[must_use]
    pub fn row(&self, i: usize) -> (&[usize], &[T]) {
        let range = self.row_ptr[i]..self.row_ptr[i + 1];
        (&self.col_idx[range.clone()], &self.values[range])
    }

    /// Stored value at `(i, j)`, if any.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> Option<&T> {
        if i >= self.nrows || j >= self.ncols {
            return None;
        }
        let (cols, vals) = self.row(i);
        cols.binary_search(&j).ok().map(|pos| &vals[pos])
    }

    /// Iterate stored entries in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &T)> + '_ {
        (0..self.nrows).flat_map(move |i| {
            let (cols, vals) = self.row(i);
            cols.iter().zip(vals).map(move |(&j, v)| (i, j, v))
        })
    }

    /// Borrowed, type-erased view of the stored positions.
    #[must_use]
    pub fn structure(&self) -> Structure<'_> {
        Structure::new(self.nrows, self.ncols, &self.row_ptr, &self.col_idx)
    }

    /// Apply `f` to every stored value, keeping the structure.
    ///
    /// # Errors
    ///
    /// Returns [`AlgebraError::OutOfMemory`] if the output cannot be allocated.
    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> Result<SparseMatrix<U>> {
        let mut values = Vec::new();
        try_reserve(&mut values, self.values.len(), "mapped values")?;
        values.extend(self.values.iter().map(&mut f));
        Ok(SparseMatrix {
            nrows: self.nrows,
            ncols: self.ncols,
            row_ptr: clone_buf(&self.row_ptr, "row pointers")?,
            col_idx: clone_buf(&self.col_idx, "column indices")?,
            values,
        })
    }

    /// Boolean copy of the structure: every stored position becomes `true`.
    ///
    /// # Errors
    ///
    /// Returns [`AlgebraError::OutOfMemory`] if the copy cannot be allocated.
    pub fn pattern(&self) -> Result<SparseMatrix<bool>> {
        self.map(|_| true)
    }
}

impl<T: Clone> SparseMatrix<T> {
    /// Dense `nrows x ncols` matrix with every position set to `value`.
    ///
    /// # Errors
    ///
    /// Returns [`AlgebraError::OutOfMemory`] if `nrows * ncols` overflows or
    /// the entries cannot be allocated.
    pub fn filled(nrows: usize, ncols: usize, value: T) -> Result<Self> {
        let nnz = nrows
            .checked_mul(ncols)
            .ok_or(AlgebraError::OutOfMemory { what: "dense fill" })?;

        let mut row_ptr = Vec::new();
        try_reserve(&mut row_ptr, nrows + 1, "row pointers")?;
        row_ptr.extend((0..=nrows).map(|i| i * ncols));

        let mut col_idx = Vec::new();
        try_reserve(&mut col_idx, nnz, "column indices")?;
        for _ in 0..nrows {
            col_idx.extend(0..ncols);
        }

        let values = try_filled(nnz, value, "dense fill")?;

        Ok(Self {
            nrows,
            ncols,
            row_ptr,
            col_idx,
            values,
        })
    }

    /// Build from `(row, col, value)` tuples in any order.
    ///
    /// Tuples that land on the same position are merged with `dup`, in
    /// input order.
    ///
    /// # Errors
    ///
    /// - [`AlgebraError::IndexOutOfBounds`] if a tuple lies outside the shape.
    /// - [`AlgebraError::OutOfMemory`] if the buffers cannot be allocated.
    pub fn build<I>(nrows: usize, ncols: usize, tuples: I, dup: impl Fn(T, T) -> T) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, usize, T)>,
    {
        let tuples = tuples.into_iter();
        let mut sorted: Vec<(usize, usize, T)> = Vec::new();
        try_reserve(&mut sorted, tuples.size_hint().0, "build tuples")?;
        for (row, col, value) in tuples {
            if row >= nrows || col >= ncols {
                return Err(AlgebraError::IndexOutOfBounds {
                    row,
                    col,
                    nrows,
                    ncols,
                });
            }
            if sorted.len() == sorted.capacity() {
                let grow = sorted.len().max(8);
                try_reserve(&mut sorted, grow, "build tuples")?;
            }
            sorted.push((row, col, value));
        }
        // Stable sort keeps duplicates in input order for `dup`.
        sorted.sort_by_key(|&(r, c, _)| (r, c));

        let mut row_ptr = try_filled(nrows + 1, 0_usize, "row pointers")?;
        let mut col_idx: Vec<usize> = Vec::new();
        let mut values: Vec<T> = Vec::new();
        try_reserve(&mut col_idx, sorted.len(), "column indices")?;
        try_reserve(&mut values, sorted.len(), "values")?;

        let mut last: Option<(usize, usize)> = None;
        for (row, col, value) in sorted {
            if last == Some((row, col)) {
                if let Some(prev) = values.pop() {
                    values.push(dup(prev, value));
                }
                continue;
            }
            last = Some((row, col));
            row_ptr[row + 1] += 1;
            col_idx.push(col);
            values.push(value);
        }
        for i in 0..nrows {
            row_ptr[i + 1] += row_ptr[i];
        }

        Ok(Self {
            nrows,
            ncols,
            row_ptr,
            col_idx,
            values,
        })
    }

    /// Transposed copy.
    ///
    /// # Errors
    ///
    /// Returns [`AlgebraError::OutOfMemory`] if the output cannot be allocated.
    pub fn transpose(&self) -> Result<Self> {
        let nnz = self.nvals();
        let mut row_ptr = try_filled(self.ncols + 1, 0_usize, "row pointers")?;
        for &c in &self.col_idx {
            row_ptr[c + 1] += 1;
        }
        for c in 0..self.ncols {
            row_ptr[c + 1] += row_ptr[c];
        }

        let mut next = clone_buf(&row_ptr[..self.ncols], "scatter cursor")?;
        let mut col_idx = try_filled(nnz, 0_usize, "column indices")?;
        let mut slots: Vec<Option<T>> = try_filled(nnz, None, "values")?;

        // Rows are visited in increasing order, so every output row stays sorted.
        for i in 0..self.nrows {
            let (cols, vals) = self.row(i);
            for (&c, v) in cols.iter().zip(vals) {
                let dst = next[c];
                next[c] += 1;
                col_idx[dst] = i;
                slots[dst] = Some(v.clone());
            }
        }

        let values = slots.into_iter().flatten().collect::<Vec<_>>();
        debug_assert_eq!(values.len(), nnz);

        Ok(Self {
            nrows: self.ncols,
            ncols: self.nrows,
            row_ptr,
            col_idx,
            values,
        })
    }
    /// Every row, restricted to the listed columns in the listed order.
    ///
    /// Column `cols[k]` of `self` becomes column `k` of the result.
    ///
    /// # Errors
    ///
    /// - [`AlgebraError::IndexOutOfBounds`] if a listed column is not below
    ///   `ncols`.
    /// - [`AlgebraError::InvalidValue`] if a column is listed twice.
    /// - [`AlgebraError::OutOfMemory`] if the output cannot be allocated.
    pub fn extract_columns(&self, cols: &[usize]) -> Result<Self> {
        let mut slot_of: Vec<Option<usize>> = try_filled(self.ncols, None, "column map")?;
        for (k, &c) in cols.iter().enumerate() {
            let Some(slot) = slot_of.get_mut(c) else {
                return Err(AlgebraError::IndexOutOfBounds {
                    row: 0,
                    col: c,
                    nrows: self.nrows,
                    ncols: self.ncols,
                });
            };
            if slot.replace(k).is_some() {
                return Err(AlgebraError::InvalidValue(format!(
                    "column {c} listed twice"
                )));
            }
        }

        let mut row_ptr = Vec::new();
        try_reserve(&mut row_ptr, self.nrows + 1, "row pointers")?;
        row_ptr.push(0);
        let mut entries: Vec<(usize, T)> = Vec::new();
        let mut col_idx = Vec::new();
        let mut values = Vec::new();

        for i in 0..self.nrows {
            let (row_cols, row_vals) = self.row(i);
            entries.clear();
            try_reserve(&mut entries, row_cols.len(), "extract row")?;
            entries.extend(
                row_cols
                    .iter()
                    .zip(row_vals)
                    .filter_map(|(&c, v)| slot_of[c].map(|k| (k, v.clone()))),
            );
            entries.sort_unstable_by_key(|&(k, _)| k);

            try_reserve(&mut col_idx, entries.len(), "column indices")?;
            try_reserve(&mut values, entries.len(), "values")?;
            for (k, v) in entries.drain(..) {
                col_idx.push(k);
                values.push(v);
            }
            row_ptr.push(col_idx.len());
        }

        Ok(Self {
            nrows: self.nrows,
            ncols: cols.len(),
            row_ptr,
            col_idx,
            values,
        })
    }
}

fn clone_buf<T: Clone>(src: &[T], what: &'static str) -> Result<Vec<T>> {
    let mut out = Vec::new();
    try_reserve(&mut out, src.len(), what)?;
    out.extend_from_slice(src);
    Ok(out)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SparseMatrix<i64> {
        // [ .  2  . ]
        // [ 1  .  3 ]
        SparseMatrix::build(2, 3, [(1, 2, 3), (0, 1, 2), (1, 0, 1)], |a, _| a).expect("build")
    }

    #[test]
    fn build_sorts_rows() {
        let m = sample();
        assert_eq!(m.nvals(), 3);
        assert_eq!(m.row(0), (&[1_usize][..], &[2_i64][..]));
        assert_eq!(m.row(1), (&[0_usize, 2][..], &[1_i64, 3][..]));
    }

    #[test]
    fn build_merges_duplicates_in_order() {
        let m = SparseMatrix::build(1, 1, [(0, 0, 5), (0, 0, 3)], |a, b| a - b).expect("build");
        assert_eq!(m.get(0, 0), Some(&2));
        assert_eq!(m.nvals(), 1);
    }

    #[test]
    fn build_rejects_out_of_range() {
        let err = SparseMatrix::build(2, 2, [(2, 0, 1_i64)], |a, _| a).unwrap_err();
        assert!(matches!(err, AlgebraError::IndexOutOfBounds { row: 2, .. }));
    }

    #[test]
    fn get_distinguishes_absent_from_zero() {
        let m = SparseMatrix::build(1, 2, [(0, 0, 0_i64)], |a, _| a).expect("build");
        assert_eq!(m.get(0, 0), Some(&0));
        assert_eq!(m.get(0, 1), None);
        assert_eq!(m.get(5, 0), None);
    }

    #[test]
    fn transpose_swaps_positions() {
        let t = sample().transpose().expect("transpose");
        assert_eq!(t.shape(), (3, 2));
        assert_eq!(t.get(1, 0), Some(&2));
        assert_eq!(t.get(0, 1), Some(&1));
        assert_eq!(t.get(2, 1), Some(&3));
        assert_eq!(t.nvals(), 3);
        assert_eq!(t.transpose().expect("transpose back"), sample());
    }

    #[test]
    fn filled_is_dense() {
        let m = SparseMatrix::filled(2, 3, 1.0_f64).expect("fill");
        assert_eq!(m.nvals(), 6);
        assert!(m.iter().all(|(_, _, &v)| (v - 1.0).abs() < f64::EPSILON));
        assert_eq!(m.row(1).0, &[0, 1, 2]);
    }

    #[test]
    fn empty_matrix_has_no_entries() {
        let m: SparseMatrix<f64> = SparseMatrix::new(3, 4).expect("new");
        assert!(m.is_empty());
        assert_eq!(m.iter().count(), 0);
        assert_eq!(m.shape(), (3, 4));
    }

    #[test]
    fn pattern_keeps_structure() {
        let p = sample().pattern().expect("pattern");
        assert_eq!(p.get(1, 2), Some(&true));
        assert_eq!(p.get(0, 0), None);
        assert_eq!(p.structure().nvals(), 3);
    }

    #[test]
    fn extract_columns_reorders() {
        let m = sample().extract_columns(&[2, 0]).expect("extract");
        assert_eq!(m.shape(), (2, 2));
        assert_eq!(m.row(0).0, &[] as &[usize]);
        assert_eq!(m.row(1), (&[0_usize, 1][..], &[3_i64, 1][..]));
    }

    #[test]
    fn extract_columns_rejects_bad_lists() {
        assert!(matches!(
            sample().extract_columns(&[3]),
            Err(AlgebraError::IndexOutOfBounds { col: 3, .. })
        ));
        assert!(matches!(
            sample().extract_columns(&[1, 1]),
            Err(AlgebraError::InvalidValue(_))
        ));
    }

    #[test]
    fn map_inverts_values() {
        let inv = sample().map(|&v| 1.0 / v as f64).expect("map");
        assert_eq!(inv.get(0, 1), Some(&0.5));
    }
}
