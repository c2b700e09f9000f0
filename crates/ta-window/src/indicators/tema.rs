//! Triple Exponential Moving Average (TEMA).
//!
//! ```text
//! TEMA = 3 × EMA1 - 3 × EMA2 + EMA3
//! ```
//!
//! where `EMA2` smooths `EMA1` and `EMA3` smooths `EMA2`. The lookback is three
//! times the EMA lookback.

use crate::error::Result;
use crate::indicators::ema::{ema_lookback_with, MIN_PERIOD};
use crate::indicators::Series;
use crate::kernels::{ExpCascade, Project};
use crate::lookback::require;
use crate::range::{IndexRange, OutputRange};
use crate::traits::SeriesElement;
use crate::unstable::UnstablePeriods;

/// Returns the lookback of the TEMA: `3 × ema_lookback(period)`, or `None`
/// for `period < 2`.
#[inline]
#[must_use]
pub fn tema_lookback(period: usize) -> Option<usize> {
    tema_lookback_with(&UnstablePeriods::current(), period)
}

/// Like [`tema_lookback`], with the EMA unstable period taken from `periods`.
#[inline]
#[must_use]
pub fn tema_lookback_with(periods: &UnstablePeriods, period: usize) -> Option<usize> {
    ema_lookback_with(periods, period).and_then(|lookback| lookback.checked_mul(3))
}

/// Computes the Triple Exponential Moving Average of `data` over `range` into `output`.
///
/// # Errors
///
/// - `Error::EmptyInput` / `Error::OutOfRange` if `range` is not covered by `data`
/// - `Error::InvalidPeriod` if `period < 2`
/// - `Error::BufferTooSmall` if `output` cannot hold the result
pub fn tema_into<T: SeriesElement>(
    range: impl Into<IndexRange>,
    data: &[T],
    period: usize,
    output: &mut [T],
) -> Result<OutputRange> {
    tema_with(range, Series::Split(data, output), period)
}

/// Computes the Triple Exponential Moving Average with `buffer` as both input and output.
///
/// # Errors
///
/// Same as [`tema_into`].
pub fn tema_in_place<T: SeriesElement>(
    range: impl Into<IndexRange>,
    buffer: &mut [T],
    period: usize,
) -> Result<OutputRange> {
    tema_with(range, Series::InPlace(buffer), period)
}

pub(crate) fn tema_with<T: SeriesElement>(
    range: impl Into<IndexRange>,
    series: Series<'_, T>,
    period: usize,
) -> Result<OutputRange> {
    let range = series.validate(range)?;
    let lookback = require(tema_lookback(period), "period", period, MIN_PERIOD)?;
    let three = T::two() + T::one();
    let mut kernel = Project::new(ExpCascade::<T, 3>::new(period)?, move |[e1, e2, e3]: [T; 3]| {
        three * e1 - three * e2 + e3
    });
    series.run(&mut kernel, range, lookback)
}
