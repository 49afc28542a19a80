//! Dense vector.

use std::ops::Index;

use crate::error::{Result, try_filled};

/// A value at every index `0..len`.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseVector<T> {
    values: Vec<T>,
}

impl<T: Clone> DenseVector<T> {
    /// Vector of `len` copies of `value`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::AlgebraError::OutOfMemory`] if the storage cannot be
    /// allocated.
    pub fn filled(len: usize, value: T) -> Result<Self> {
        Ok(Self {
            values: try_filled(len, value, "dense vector")?,
        })
    }
}

impl<T> DenseVector<T> {
    #[must_use]
    pub const fn from_vec(values: Vec<T>) -> Self {
        Self { values }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn get(&self, i: usize) -> Option<&T> {
        self.values.get(i)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.values
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.values
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.values
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.values.iter()
    }
}

impl<T> Index<usize> for DenseVector<T> {
    type Output = T;

    fn index(&self, i: usize) -> &T {
        &self.values[i]
    }
}

impl<T> From<Vec<T>> for DenseVector<T> {
    fn from(values: Vec<T>) -> Self {
        Self::from_vec(values)
    }
}

impl<'a, T> IntoIterator for &'a DenseVector<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
