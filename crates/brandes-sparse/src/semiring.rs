//! Combine/reduce operator pairs for masked multiplication.
//!
//! A [`Semiring`] supplies `multiply` (combine one entry of each operand)
//! and `add` (reduce the products landing on one output position). The
//! operand types may differ; a `bool` operand is read as structural one so
//! an adjacency pattern can drive numeric products without being copied
//! into a numeric matrix first.
//!
//! Integer arithmetic saturates at the type bounds instead of wrapping.

/// Operator pair used by [`crate::mxm`].
pub trait Semiring<A, B> {
    type Output: Copy;

    /// Reduce two partial results.
    fn add(&self, x: Self::Output, y: Self::Output) -> Self::Output;

    /// Combine one entry of the first operand with one of the second.
    fn multiply(&self, a: A, b: B) -> Self::Output;
}

/// The conventional `(+, x)` semiring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlusTimes;

impl Semiring<i64, i64> for PlusTimes {
    type Output = i64;

    fn add(&self, x: i64, y: i64) -> i64 {
        x.saturating_add(y)
    }

    fn multiply(&self, a: i64, b: i64) -> i64 {
        a.saturating_mul(b)
    }
}

impl Semiring<f64, f64> for PlusTimes {
    type Output = f64;

    fn add(&self, x: f64, y: f64) -> f64 {
        x + y
    }

    fn multiply(&self, a: f64, b: f64) -> f64 {
        a * b
    }
}

impl Semiring<bool, i64> for PlusTimes {
    type Output = i64;

    fn add(&self, x: i64, y: i64) -> i64 {
        x.saturating_add(y)
    }

    fn multiply(&self, a: bool, b: i64) -> i64 {
        if a { b } else { 0 }
    }
}

impl Semiring<bool, f64> for PlusTimes {
    type Output = f64;

    fn add(&self, x: f64, y: f64) -> f64 {
        x + y
    }

    fn multiply(&self, a: bool, b: f64) -> f64 {
        if a { b } else { 0.0 }
    }
}
