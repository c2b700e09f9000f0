//! Moving sum and Simple Moving Average (SMA).
//!
//! # Algorithm
//!
//! Both keep one rolling sum. Each step adds the newest sample, emits, and
//! removes the sample leaving the window:
//!
//! ```text
//! SUM[i] = x[i - period + 1] + ... + x[i]
//! SMA[i] = SUM[i] / period
//! ```
//!
//! # Example
//!
//! ```
//! use ta_window::indicators::sma::{sma_into, sum_into};
//!
//! let data = [1.0_f64, 2.0, 3.0, 4.0, 5.0];
//! let mut out = [0.0; 5];
//!
//! let range = sma_into(.., &data, 3, &mut out).unwrap();
//! assert_eq!((range.begin(), range.end()), (2, Some(4)));
//! assert_eq!(&out[..3], &[2.0, 3.0, 4.0]);
//!
//! let range = sum_into(3..=4, &data, 3, &mut out).unwrap();
//! assert_eq!(range.begin(), 3);
//! assert_eq!(&out[..2], &[9.0, 12.0]);
//! ```

use crate::error::Result;
use crate::indicators::Series;
use crate::kernels::RollingSum;
use crate::lookback::{require, window_lookback};
use crate::range::{IndexRange, OutputRange};
use crate::traits::SeriesElement;

const MIN_PERIOD: usize = 2;

/// Returns the lookback of the moving sum: `period - 1`, or `None` for `period < 2`.
///
/// # Example
///
/// ```
/// use ta_window::indicators::sma::sum_lookback;
///
/// assert_eq!(sum_lookback(30), Some(29));
/// assert_eq!(sum_lookback(1), None);
/// ```
#[inline]
#[must_use]
pub const fn sum_lookback(period: usize) -> Option<usize> {
    window_lookback(period, MIN_PERIOD)
}

/// Returns the lookback of the SMA: `period - 1`, or `None` for `period < 2`.
#[inline]
#[must_use]
pub const fn sma_lookback(period: usize) -> Option<usize> {
    window_lookback(period, MIN_PERIOD)
}

/// Computes the moving sum of `data` over `range` into `output`.
///
/// # Errors
///
/// - `Error::EmptyInput` / `Error::OutOfRange` if `range` is not covered by `data`
/// - `Error::InvalidPeriod` if `period < 2`
/// - `Error::BufferTooSmall` if `output` cannot hold the result
pub fn sum_into<T: SeriesElement>(
    range: impl Into<IndexRange>,
    data: &[T],
    period: usize,
    output: &mut [T],
) -> Result<OutputRange> {
    sum_with(range, Series::Split(data, output), period)
}

/// Computes the moving sum with `buffer` as both input and output.
///
/// # Errors
///
/// Same as [`sum_into`].
pub fn sum_in_place<T: SeriesElement>(
    range: impl Into<IndexRange>,
    buffer: &mut [T],
    period: usize,
) -> Result<OutputRange> {
    sum_with(range, Series::InPlace(buffer), period)
}

fn sum_with<T: SeriesElement>(
    range: impl Into<IndexRange>,
    series: Series<'_, T>,
    period: usize,
) -> Result<OutputRange> {
    let range = series.validate(range)?;
    let lookback = require(sum_lookback(period), "period", period, MIN_PERIOD)?;
    series.run(&mut RollingSum::new(period), range, lookback)
}

/// Computes the Simple Moving Average of `data` over `range` into `output`.
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
/// use ta_window::error::RetCode;
/// use ta_window::indicators::sma::{sma_into, sma_lookback};
///
/// let data = [1.0_f64, 2.0, 3.0];
/// let mut out = [-1.0; 3];
///
/// let result = sma_into(.., &data, 1, &mut out);
/// assert_eq!(RetCode::of(&result), RetCode::BadParam);
/// assert_eq!(sma_lookback(1), None);
/// assert_eq!(out, [-1.0; 3]);
/// ```
pub fn sma_into<T: SeriesElement>(
    range: impl Into<IndexRange>,
    data: &[T],
    period: usize,
    output: &mut [T],
) -> Result<OutputRange> {
    sma_with(range, Series::Split(data, output), period)
}

/// Computes the Simple Moving Average with `buffer` as both input and output.
///
/// # Errors
///
/// Same as [`sma_into`].
pub fn sma_in_place<T: SeriesElement>(
    range: impl Into<IndexRange>,
    buffer: &mut [T],
    period: usize,
) -> Result<OutputRange> {
    sma_with(range, Series::InPlace(buffer), period)
}

pub(crate) fn sma_with<T: SeriesElement>(
    range: impl Into<IndexRange>,
    series: Series<'_, T>,
    period: usize,
) -> Result<OutputRange> {
    let range = series.validate(range)?;
    let lookback = require(sma_lookback(period), "period", period, MIN_PERIOD)?;
    series.run(&mut RollingSum::mean(period)?, range, lookback)
}
