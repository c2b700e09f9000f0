//! Double Exponential Moving Average (DEMA).
//!
//! ```text
//! DEMA = 2 × EMA(x) - EMA(EMA(x))
//! ```
//!
//! Both EMAs run as one two-layer cascade in a single pass. The lookback is
//! twice the EMA lookback, unstable period included.

use crate::error::Result;
use crate::indicators::ema::{ema_lookback_with, MIN_PERIOD};
use crate::indicators::Series;
use crate::kernels::{ExpCascade, Project};
use crate::lookback::require;
use crate::range::{IndexRange, OutputRange};
use crate::traits::SeriesElement;
use crate::unstable::UnstablePeriods;

/// Returns the lookback of the DEMA: `2 × ema_lookback(period)`, or `None`
/// for `period < 2`.
#[inline]
#[must_use]
pub fn dema_lookback(period: usize) -> Option<usize> {
    dema_lookback_with(&UnstablePeriods::current(), period)
}

/// Like [`dema_lookback`], with the EMA unstable period taken from `periods`.
#[inline]
#[must_use]
pub fn dema_lookback_with(periods: &UnstablePeriods, period: usize) -> Option<usize> {
    ema_lookback_with(periods, period).and_then(|lookback| lookback.checked_mul(2))
}

/// Computes the Double Exponential Moving Average of `data` over `range` into `output`.
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
/// use ta_window::indicators::dema::dema_into;
///
/// // DEMA removes the lag of an EMA on a straight line
/// let data: Vec<f64> = (0..20).map(f64::from).collect();
/// let mut out = vec![0.0; data.len()];
/// let range = dema_into(.., &data, 3, &mut out).unwrap();
///
/// assert_eq!(range.begin(), 4);
/// for (offset, idx) in range.indices().enumerate() {
///     assert!((out[offset] - data[idx]).abs() < 1e-9);
/// }
/// ```
pub fn dema_into<T: SeriesElement>(
    range: impl Into<IndexRange>,
    data: &[T],
    period: usize,
    output: &mut [T],
) -> Result<OutputRange> {
    dema_with(range, Series::Split(data, output), period)
}

/// Computes the Double Exponential Moving Average with `buffer` as both input and output.
///
/// # Errors
///
/// Same as [`dema_into`].
pub fn dema_in_place<T: SeriesElement>(
    range: impl Into<IndexRange>,
    buffer: &mut [T],
    period: usize,
) -> Result<OutputRange> {
    dema_with(range, Series::InPlace(buffer), period)
}

pub(crate) fn dema_with<T: SeriesElement>(
    range: impl Into<IndexRange>,
    series: Series<'_, T>,
    period: usize,
) -> Result<OutputRange> {
    let range = series.validate(range)?;
    let lookback = require(dema_lookback(period), "period", period, MIN_PERIOD)?;
    let mut kernel = Project::new(ExpCascade::<T, 2>::new(period)?, |[e1, e2]: [T; 2]| {
        T::two() * e1 - e2
    });
    series.run(&mut kernel, range, lookback)
}
