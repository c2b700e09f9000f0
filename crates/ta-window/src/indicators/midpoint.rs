//! Midpoint over a period (MIDPOINT) and midpoint price (MIDPRICE).
//!
//! ```text
//! MIDPOINT[i] = (highest(x) + lowest(x)) / 2
//! MIDPRICE[i] = (highest(high) + lowest(low)) / 2
//! ```

use crate::error::Result;
use crate::indicators::Series;
use crate::kernels::{drive, Extremum, HighLow, RollingExtremum, Split, WindowKernel};
use crate::lookback::{require, window_lookback};
use crate::range::{validate_range, IndexRange, OutputRange};
use crate::traits::SeriesElement;

const MIN_PERIOD: usize = 2;

/// Returns the lookback of MIDPOINT: `period - 1`, or `None` for `period < 2`.
#[inline]
#[must_use]
pub const fn midpoint_lookback(period: usize) -> Option<usize> {
    window_lookback(period, MIN_PERIOD)
}

/// Returns the lookback of MIDPRICE: `period - 1`, or `None` for `period < 2`.
#[inline]
#[must_use]
pub const fn midprice_lookback(period: usize) -> Option<usize> {
    window_lookback(period, MIN_PERIOD)
}

struct Midpoint<T> {
    highest: RollingExtremum<T>,
    lowest: RollingExtremum<T>,
}

impl<T: SeriesElement> Midpoint<T> {
    const fn new(period: usize) -> Self {
        Self {
            highest: RollingExtremum::new(period, Extremum::Highest),
            lowest: RollingExtremum::new(period, Extremum::Lowest),
        }
    }

    fn span(&self) -> usize {
        self.highest.period().saturating_sub(1)
    }
}

impl<T: SeriesElement> WindowKernel<[T]> for Midpoint<T> {
    type Output = T;

    fn warmup(&self) -> usize {
        self.span()
    }

    fn seed(&mut self, _input: &[T], _idx: usize) {}

    #[inline]
    fn step(&mut self, input: &[T], idx: usize) -> T {
        let (_, high) = self.highest.update(input, idx);
        let (_, low) = self.lowest.update(input, idx);
        (high + low) / T::two()
    }
}

impl<'a, T: SeriesElement> WindowKernel<HighLow<'a, T>> for Midpoint<T> {
    type Output = T;

    fn warmup(&self) -> usize {
        self.span()
    }

    fn seed(&mut self, _input: &HighLow<'a, T>, _idx: usize) {}

    #[inline]
    fn step(&mut self, input: &HighLow<'a, T>, idx: usize) -> T {
        let (_, high) = self.highest.update(input.high, idx);
        let (_, low) = self.lowest.update(input.low, idx);
        (high + low) / T::two()
    }
}

/// Computes the midpoint of `data` over each window of `period` samples.
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
/// use ta_window::indicators::midpoint::midpoint_into;
///
/// let data = [1.0_f64, 9.0, 4.0, 3.0];
/// let mut out = [0.0; 4];
/// let range = midpoint_into(.., &data, 3, &mut out).unwrap();
/// assert_eq!(&out[..range.len()], &[5.0, 6.0]);
/// ```
pub fn midpoint_into<T: SeriesElement>(
    range: impl Into<IndexRange>,
    data: &[T],
    period: usize,
    output: &mut [T],
) -> Result<OutputRange> {
    midpoint_with(range, Series::Split(data, output), period)
}

/// Computes the midpoint with `buffer` as both input and output.
///
/// # Errors
///
/// Same as [`midpoint_into`].
pub fn midpoint_in_place<T: SeriesElement>(
    range: impl Into<IndexRange>,
    buffer: &mut [T],
    period: usize,
) -> Result<OutputRange> {
    midpoint_with(range, Series::InPlace(buffer), period)
}

fn midpoint_with<T: SeriesElement>(
    range: impl Into<IndexRange>,
    series: Series<'_, T>,
    period: usize,
) -> Result<OutputRange> {
    let range = series.validate(range)?;
    let lookback = require(midpoint_lookback(period), "period", period, MIN_PERIOD)?;
    series.run(&mut Midpoint::new(period), range, lookback)
}

/// Computes the midpoint of the highest high and the lowest low over each window.
///
/// # Errors
///
/// - `Error::EmptyInput` / `Error::OutOfRange` if `range` is not covered by both inputs
/// - `Error::InvalidPeriod` if `period < 2`
/// - `Error::BufferTooSmall` if `output` cannot hold the result
pub fn midprice_into<T: SeriesElement>(
    range: impl Into<IndexRange>,
    high: &[T],
    low: &[T],
    period: usize,
    output: &mut [T],
) -> Result<OutputRange> {
    let range = validate_range(range, &[high.len(), low.len()])?;
    let lookback = require(midprice_lookback(period), "period", period, MIN_PERIOD)?;
    let input = HighLow { high, low };
    drive(&mut Midpoint::new(period), &mut Split::new(&input, output), range, lookback)
}
