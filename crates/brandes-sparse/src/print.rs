//! Human-readable dumps of vectors for diagnostics.
//!
//! Output format:
//!
//! ```text
//! f64 vector: n: 5 entries: 5
//!     (0)   0
//!     (1)   3
//!     ...
//! ```

use std::io::{self, Write};

use crate::vector::DenseVector;

/// Entries shown before a summary dump stops.
pub const SUMMARY_ENTRIES: usize = 30;

/// How much of a vector to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PrintLevel {
    /// Print nothing.
    Silent,
    /// Header line only.
    OneLine,
    /// Header line only.
    Terse,
    /// Header plus the first [`SUMMARY_ENTRIES`] entries.
    Summary,
    /// Header plus every entry.
    Full,
    /// As `Summary`, floats with 15 significant digits.
    SummaryPrecise,
    /// As `Full`, floats with 15 significant digits.
    FullPrecise,
}

impl PrintLevel {
    /// Map a numeric level `-1..=5` onto a variant. Anything below `-1` is
    /// silent and anything above `5` prints everything precisely.
    #[must_use]
    pub const fn from_level(level: i32) -> Self {
        match level {
            i32::MIN..=-1 => Self::Silent,
            0 => Self::OneLine,
            1 => Self::Terse,
            2 => Self::Summary,
            3 => Self::Full,
            4 => Self::SummaryPrecise,
            _ => Self::FullPrecise,
        }
    }

    const fn lists_entries(self) -> bool {
        matches!(
            self,
            Self::Summary | Self::Full | Self::SummaryPrecise | Self::FullPrecise
        )
    }

    const fn is_summary(self) -> bool {
        matches!(self, Self::Summary | Self::SummaryPrecise)
    }

    const fn is_precise(self) -> bool {
        matches!(self, Self::SummaryPrecise | Self::FullPrecise)
    }
}

/// Element types that can be dumped.
pub trait PrintValue {
    const TYPE_NAME: &'static str;

    fn render(&self, precise: bool) -> String;
}

impl PrintValue for bool {
    const TYPE_NAME: &'static str = "bool";

    fn render(&self, _precise: bool) -> String {
        u8::from(*self).to_string()
    }
}

impl PrintValue for i64 {
    const TYPE_NAME: &'static str = "i64";

    fn render(&self, _precise: bool) -> String {
        self.to_string()
    }
}

impl PrintValue for u64 {
    const TYPE_NAME: &'static str = "u64";

    fn render(&self, _precise: bool) -> String {
        self.to_string()
    }
}

impl PrintValue for f64 {
    const TYPE_NAME: &'static str = "f64";

    fn render(&self, precise: bool) -> String {
        format_general(*self, if precise { 15 } else { 6 })
    }
}

/// Format `x` like C's `%.<digits>g`: fixed or exponent notation chosen
/// from the rounded exponent, trailing zeros trimmed, and the exponent
/// written signed with at least two digits.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap
)]
fn format_general(x: f64, digits: usize) -> String {
    if x == 0.0 {
        return "0".to_string();
    }
    if !x.is_finite() {
        return x.to_string();
    }
    let digits = digits.max(1);
    let sci = format!("{:.*e}", digits - 1, x);
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    let Ok(exp) = exp.parse::<i32>() else {
        return sci;
    };
    if exp < -4 || exp >= digits as i32 {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{sign}{:02}", trim_zeros(mantissa), exp.unsigned_abs())
    } else {
        let decimals = (digits as i32 - 1 - exp).max(0) as usize;
        trim_zeros(&format!("{x:.decimals$}")).to_string()
    }
}

fn trim_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// Write `v` to `w` at the requested level.
///
/// # Errors
///
/// Propagates I/O errors from `w`.
pub fn write_vector<W, T>(w: &mut W, v: &DenseVector<T>, level: PrintLevel) -> io::Result<()>
where
    W: Write,
    T: PrintValue,
{
    if level == PrintLevel::Silent {
        return Ok(());
    }
    writeln!(w, "{} vector: n: {} entries: {}", T::TYPE_NAME, v.len(), v.len())?;
    if !level.lists_entries() {
        return Ok(());
    }

    let summary = level.is_summary() && v.len() > SUMMARY_ENTRIES;
    for (i, x) in v.iter().enumerate() {
        writeln!(w, "    ({i})   {}", x.render(level.is_precise()))?;
        if summary && i + 1 >= SUMMARY_ENTRIES {
            writeln!(w, "    ...")?;
            break;
        }
    }
    Ok(())
}
