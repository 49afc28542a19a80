//! Structural masks.
//!
//! A mask restricts where an operation may write. Only the *structure* of
//! the mask matrix matters (which positions are stored), never its values,
//! so a [`Structure`] is a type-erased borrow of the row pointers and column
//! indices of any [`crate::SparseMatrix`].

use fixedbitset::FixedBitSet;

/// Borrowed view of the stored positions of a matrix.
#[derive(Debug, Clone, Copy)]
pub struct Structure<'a> {
    nrows: usize,
    ncols: usize,
    row_ptr: &'a [usize],
    col_idx: &'a [usize],
}

impl<'a> Structure<'a> {
    pub(crate) const fn new(
        nrows: usize,
        ncols: usize,
        row_ptr: &'a [usize],
        col_idx: &'a [usize],
    ) -> Self {
        Self {
            nrows,
            ncols,
            row_ptr,
            col_idx,
        }
    }

    #[must_use]
    pub const fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    #[must_use]
    pub fn nvals(&self) -> usize {
        self.col_idx.len()
    }

    /// Columns stored in row `i`.
    #[must_use]
    pub fn row(&self, i: usize) -> &'a [usize] {
        &self.col_idx[self.row_ptr[i]..self.row_ptr[i + 1]]
    }

    /// True if `(i, j)` is stored.
    #[must_use]
    pub fn contains(&self, i: usize, j: usize) -> bool {
        i < self.nrows && self.row(i).binary_search(&j).is_ok()
    }
}

/// A structural mask, optionally complemented.
///
/// - `Mask::structural(s)` admits exactly the positions stored in `s`.
/// - `Mask::complement(s)` admits exactly the positions *absent* from `s`.
#[derive(Debug, Clone, Copy)]
pub struct Mask<'a> {
    structure: Structure<'a>,
    complement: bool,
}

impl<'a> Mask<'a> {
    #[must_use]
    pub const fn structural(structure: Structure<'a>) -> Self {
        Self {
            structure,
            complement: false,
        }
    }

    #[must_use]
    pub const fn complement(structure: Structure<'a>) -> Self {
        Self {
            structure,
            complement: true,
        }
    }

    #[must_use]
    pub const fn shape(&self) -> (usize, usize) {
        self.structure.shape()
    }

    #[must_use]
    pub const fn is_complement(&self) -> bool {
        self.complement
    }

    /// True if the mask lets an operation write `(i, j)`.
    #[must_use]
    pub fn admits(&self, i: usize, j: usize) -> bool {
        self.structure.contains(i, j) != self.complement
    }
}

/// Row-at-a-time mask cursor backed by a bitset, for kernels that walk
/// output rows in order.
pub(crate) struct RowMask<'a> {
    mask: Mask<'a>,
    bits: FixedBitSet,
    loaded: Option<usize>,
}

impl<'a> RowMask<'a> {
    pub(crate) fn new(mask: Mask<'a>) -> Self {
        Self {
            bits: FixedBitSet::with_capacity(mask.structure.ncols),
            mask,
            loaded: None,
        }
    }

    /// Point the cursor at row `i`.
    pub(crate) fn load(&mut self, i: usize) {
        if let Some(prev) = self.loaded.take() {
            for &c in self.mask.structure.row(prev) {
                self.bits.set(c, false);
            }
        }
        for &c in self.mask.structure.row(i) {
            self.bits.insert(c);
        }
        self.loaded = Some(i);
    }

    /// False when the loaded row admits no column at all.
    pub(crate) fn admits_any(&self) -> bool {
        let stored = self
            .loaded
            .map_or(0, |i| self.mask.structure.row(i).len());
        if self.mask.complement {
            stored < self.mask.structure.ncols
        } else {
            stored > 0
        }
    }

    /// True if column `j` of the loaded row is admitted.
    pub(crate) fn admits(&self, j: usize) -> bool {
        self.bits.contains(j) != self.mask.complement
    }
}
