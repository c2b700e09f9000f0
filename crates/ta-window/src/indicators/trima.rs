//! Triangular Moving Average (TRIMA).
//!
//! A simple average of a simple average, computed in one pass. For an odd
//! period both averages span `(period + 1) / 2` samples; for an even period
//! the inner one spans `period / 2 + 1` and the outer `period / 2`. The
//! resulting weights rise linearly to the middle of the window and fall again,
//! e.g. `1 2 3 2 1` for period 5 and `1 2 2 1` for period 4.

use crate::error::Result;
use crate::indicators::Series;
use crate::kernels::TriangularSum;
use crate::lookback::{require, window_lookback};
use crate::range::{IndexRange, OutputRange};
use crate::traits::SeriesElement;

const MIN_PERIOD: usize = 2;

/// Returns the lookback of the TRIMA: `period - 1`, or `None` for `period < 2`.
#[inline]
#[must_use]
pub const fn trima_lookback(period: usize) -> Option<usize> {
    window_lookback(period, MIN_PERIOD)
}

/// Computes the Triangular Moving Average of `data` over `range` into `output`.
///
/// # Errors
///
/// - `Error::EmptyInput` / `Error::OutOfRange` if `range` is not covered by `data`
/// - `Error::InvalidPeriod` if `period < 2`
/// - `Error::BufferTooSmall` if `output` cannot hold the result
///
/// # Example
///
/// ```
/// use ta_window::indicators::trima::trima_into;
///
/// let data = [1.0_f64, 2.0, 6.0, 2.0, 1.0];
/// let mut out = [0.0; 5];
/// let range = trima_into(.., &data, 5, &mut out).unwrap();
///
/// // (1*1 + 2*2 + 3*6 + 2*2 + 1*1) / 9
/// assert_eq!(range.len(), 1);
/// assert!((out[0] - 28.0 / 9.0).abs() < 1e-12);
/// ```
pub fn trima_into<T: SeriesElement>(
    range: impl Into<IndexRange>,
    data: &[T],
    period: usize,
    output: &mut [T],
) -> Result<OutputRange> {
    trima_with(range, Series::Split(data, output), period)
}

/// Computes the Triangular Moving Average with `buffer` as both input and output.
///
/// # Errors
///
/// Same as [`trima_into`].
pub fn trima_in_place<T: SeriesElement>(
    range: impl Into<IndexRange>,
    buffer: &mut [T],
    period: usize,
) -> Result<OutputRange> {
    trima_with(range, Series::InPlace(buffer), period)
}

pub(crate) fn trima_with<T: SeriesElement>(
    range: impl Into<IndexRange>,
    series: Series<'_, T>,
    period: usize,
) -> Result<OutputRange> {
    let range = series.validate(range)?;
    let lookback = require(trima_lookback(period), "period", period, MIN_PERIOD)?;
    series.run(&mut TriangularSum::new(period)?, range, lookback)
}
