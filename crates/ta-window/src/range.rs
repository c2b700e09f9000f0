//! Index ranges: request, validation and the resulting output range.
//!
//! A caller asks for an [`IndexRange`] over the input index space. The range
//! is checked against every input series by [`validate_range`], giving a
//! [`ValidRange`]. After the indicator's lookback is applied the valid part
//! becomes an [`OutputRange`]; output buffers are densely packed, so
//! `out[0]` always corresponds to input index [`OutputRange::begin`].
//!
//! # Example
//!
//! ```
//! use ta_window::range::{validate_range, IndexRange, OutputRange};
//!
//! let valid = validate_range(IndexRange::Full, &[5]).unwrap();
//! assert_eq!((valid.start, valid.end), (0, 4));
//!
//! let out = OutputRange::resolve(valid, 2);
//! assert_eq!(out.begin(), 2);
//! assert_eq!(out.end(), Some(4));
//! assert_eq!(out.len(), 3);
//!
//! assert!(validate_range(1..=7, &[5]).is_err());
//! ```

use std::ops::{Range, RangeFull, RangeInclusive};

use crate::error::{Error, Result};
use crate::traits::SeriesElement;

/// A closed interval `[start, end]` of series indices requested by a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexRange {
    /// The whole series.
    #[default]
    Full,
    /// An explicit closed interval.
    Span {
        /// First index.
        start: usize,
        /// Last index, inclusive.
        end: usize,
    },
}

impl IndexRange {
    /// Creates an explicit closed range.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self::Span { start, end }
    }
}

impl From<RangeFull> for IndexRange {
    fn from(_: RangeFull) -> Self {
        Self::Full
    }
}

impl From<RangeInclusive<usize>> for IndexRange {
    fn from(range: RangeInclusive<usize>) -> Self {
        Self::Span {
            start: *range.start(),
            end: *range.end(),
        }
    }
}

/// Converts a `Range<usize>` (half open) into a closed request.
///
/// An empty half-open range has no closed equivalent and is reported as
/// `end < start`, which [`validate_range`] rejects.
impl From<Range<usize>> for IndexRange {
    fn from(range: Range<usize>) -> Self {
        match range.end.checked_sub(1) {
            Some(end) => Self::Span {
                start: range.start,
                end,
            },
            None => Self::Span {
                start: range.start.max(1),
                end: 0,
            },
        }
    }
}

/// A validated request: `start <= end < len` for every input series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidRange {
    /// First requested index.
    pub start: usize,
    /// Last requested index, inclusive.
    pub end: usize,
}

/// Validates a requested range against the lengths of the input series.
///
/// The series do not need equal lengths; each one must cover the range.
/// [`IndexRange::Full`] resolves against the shortest series.
///
/// # Errors
///
/// - `Error::EmptyInput` if any input is empty and the full range was requested
/// - `Error::OutOfRange` if `end < start` or `end` is past the shortest series
pub fn validate_range(range: impl Into<IndexRange>, lens: &[usize]) -> Result<ValidRange> {
    let len = lens.iter().copied().min().unwrap_or(0);

    match range.into() {
        IndexRange::Full => {
            if len == 0 {
                return Err(Error::EmptyInput);
            }
            Ok(ValidRange {
                start: 0,
                end: len - 1,
            })
        }
        IndexRange::Span { start, end } => {
            if end < start || end >= len {
                return Err(Error::OutOfRange { start, end, len });
            }
            Ok(ValidRange { start, end })
        }
    }
}

/// The sub-range of the input index space for which output values were written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OutputRange {
    begin: usize,
    len: usize,
}

impl OutputRange {
    /// Result of a call that had too little data after the lookback.
    pub const EMPTY: Self = Self { begin: 0, len: 0 };

    /// Applies a lookback to a validated range.
    ///
    /// `begin = max(start, lookback)`; if that passes `end` the result is
    /// [`OutputRange::EMPTY`].
    #[must_use]
    pub fn resolve(range: ValidRange, lookback: usize) -> Self {
        let begin = range.start.max(lookback);
        if begin > range.end {
            Self::EMPTY
        } else {
            Self {
                begin,
                len: range.end - begin + 1,
            }
        }
    }

    /// Input index that `out[0]` corresponds to.
    #[inline]
    #[must_use]
    pub const fn begin(&self) -> usize {
        self.begin
    }

    /// Last input index written, or `None` when nothing was written.
    #[inline]
    #[must_use]
    pub const fn end(&self) -> Option<usize> {
        if self.len == 0 {
            None
        } else {
            Some(self.begin + self.len - 1)
        }
    }

    /// Number of output values written.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if no output value was written.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Input indices covered by the output, in order.
    #[must_use]
    pub const fn indices(&self) -> Range<usize> {
        self.begin..self.begin + self.len
    }
}

/// Owned output of [`collect`].
#[derive(Debug, Clone, PartialEq)]
pub struct Computed<T> {
    /// Where the values sit in the input index space.
    pub range: OutputRange,
    /// Densely packed values, `values.len() == range.len()`.
    pub values: Vec<T>,
}

/// Allocates an output buffer of `len` slots, runs `compute` into it and
/// truncates the buffer to the values actually written.
///
/// ```
/// use ta_window::indicators::sma_into;
/// use ta_window::range::collect;
///
/// let data = [1.0_f64, 2.0, 3.0, 4.0, 5.0];
/// let sma = collect(data.len(), |out| sma_into(.., &data, 3, out)).unwrap();
/// assert_eq!(sma.range.begin(), 2);
/// assert_eq!(sma.values, vec![2.0, 3.0, 4.0]);
/// ```
///
/// # Errors
///
/// Propagates the error returned by `compute`.
pub fn collect<T, F>(len: usize, compute: F) -> Result<Computed<T>>
where
    T: SeriesElement,
    F: FnOnce(&mut [T]) -> Result<OutputRange>,
{
    let mut values = vec![T::zero(); len];
    let range = compute(&mut values)?;
    values.truncate(range.len());
    Ok(Computed { range, values })
}
