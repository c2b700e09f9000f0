//! Weighted Moving Average (WMA).
//!
//! Linear weights `1..=period`, newest sample heaviest:
//!
//! ```text
//! WMA[i] = (1*x[i-p+1] + 2*x[i-p+2] + ... + p*x[i]) / (p*(p+1)/2)
//! ```

use crate::error::Result;
use crate::indicators::Series;
use crate::kernels::WeightedSum;
use crate::lookback::{require, window_lookback};
use crate::range::{IndexRange, OutputRange};
use crate::traits::SeriesElement;

const MIN_PERIOD: usize = 2;

/// Returns the lookback of the WMA: `period - 1`, or `None` for `period < 2`.
#[inline]
#[must_use]
pub const fn wma_lookback(period: usize) -> Option<usize> {
    window_lookback(period, MIN_PERIOD)
}

/// Computes the Weighted Moving Average of `data` over `range` into `output`.
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
/// use ta_window::indicators::wma::wma_into;
///
/// let data = [1.0_f64, 2.0, 3.0, 4.0];
/// let mut out = [0.0; 4];
/// let range = wma_into(.., &data, 3, &mut out).unwrap();
///
/// // (1*1 + 2*2 + 3*3) / 6 and (1*2 + 2*3 + 3*4) / 6
/// assert!((out[0] - 14.0 / 6.0).abs() < 1e-12);
/// assert!((out[1] - 20.0 / 6.0).abs() < 1e-12);
/// assert_eq!(range.len(), 2);
/// ```
pub fn wma_into<T: SeriesElement>(
    range: impl Into<IndexRange>,
    data: &[T],
    period: usize,
    output: &mut [T],
) -> Result<OutputRange> {
    wma_with(range, Series::Split(data, output), period)
}

/// Computes the Weighted Moving Average with `buffer` as both input and output.
///
/// # Errors
///
/// Same as [`wma_into`].
pub fn wma_in_place<T: SeriesElement>(
    range: impl Into<IndexRange>,
    buffer: &mut [T],
    period: usize,
) -> Result<OutputRange> {
    wma_with(range, Series::InPlace(buffer), period)
}

pub(crate) fn wma_with<T: SeriesElement>(
    range: impl Into<IndexRange>,
    series: Series<'_, T>,
    period: usize,
) -> Result<OutputRange> {
    let range = series.validate(range)?;
    let lookback = require(wma_lookback(period), "period", period, MIN_PERIOD)?;
    series.run(&mut WeightedSum::new(period)?, range, lookback)
}
