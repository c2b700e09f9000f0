//! Rolling highest and lowest values (MAX, MIN, MINMAX) and their indices.
//!
//! # Algorithm
//!
//! A [`RollingExtremum`] keeps the index and value of the current extremum
//! and rescans the window only when that index slides out. Ties resolve to
//! the most recent index.
//!
//! Index outputs are positions in the input series, not offsets into the
//! output buffer.
//!
//! # Example
//!
//! ```
//! use ta_window::indicators::extrema::{max_index_into, max_into};
//!
//! let data = [5.0_f64, 3.0, 8.0, 1.0, 2.0];
//! let mut out = [0.0; 5];
//! let mut at = [0_usize; 5];
//!
//! let range = max_into(.., &data, 3, &mut out).unwrap();
//! assert_eq!(range.begin(), 2);
//! assert_eq!(&out[..3], &[8.0, 8.0, 8.0]);
//!
//! max_index_into(.., &data, 3, &mut at).unwrap();
//! assert_eq!(&at[..3], &[2, 2, 2]);
//! ```

use crate::error::Result;
use crate::indicators::Series;
use crate::kernels::{drive, Extremum, Project, RollingExtremum, Split, WindowKernel};
use crate::lookback::{require, window_lookback};
use crate::range::{validate_range, IndexRange, OutputRange};
use crate::traits::SeriesElement;

const MIN_PERIOD: usize = 2;

/// Returns the lookback of MAX and MAXINDEX: `period - 1`, or `None` for `period < 2`.
#[inline]
#[must_use]
pub const fn max_lookback(period: usize) -> Option<usize> {
    window_lookback(period, MIN_PERIOD)
}

/// Returns the lookback of MIN, MININDEX, MINMAX and MINMAXINDEX:
/// `period - 1`, or `None` for `period < 2`.
#[inline]
#[must_use]
pub const fn min_lookback(period: usize) -> Option<usize> {
    window_lookback(period, MIN_PERIOD)
}

/// Lowest and highest value over one window, tracked together.
#[derive(Debug, Clone)]
struct Envelope<T> {
    lowest: RollingExtremum<T>,
    highest: RollingExtremum<T>,
}

impl<T: SeriesElement> Envelope<T> {
    const fn new(period: usize) -> Self {
        Self {
            lowest: RollingExtremum::new(period, Extremum::Lowest),
            highest: RollingExtremum::new(period, Extremum::Highest),
        }
    }
}

impl<T: SeriesElement> WindowKernel<[T]> for Envelope<T> {
    type Output = ((usize, T), (usize, T));

    fn warmup(&self) -> usize {
        self.lowest.period().saturating_sub(1)
    }

    fn seed(&mut self, _input: &[T], _idx: usize) {}

    #[inline]
    fn step(&mut self, input: &[T], idx: usize) -> Self::Output {
        (self.lowest.update(input, idx), self.highest.update(input, idx))
    }
}

fn extremum_with<T: SeriesElement>(
    range: impl Into<IndexRange>,
    series: Series<'_, T>,
    period: usize,
    kind: Extremum,
) -> Result<OutputRange> {
    let range = series.validate(range)?;
    let lookback = require(window_lookback(period, MIN_PERIOD), "period", period, MIN_PERIOD)?;
    let mut kernel = Project::new(RollingExtremum::new(period, kind), |(_, value): (usize, T)| value);
    series.run(&mut kernel, range, lookback)
}

fn extremum_index<T: SeriesElement>(
    range: impl Into<IndexRange>,
    data: &[T],
    period: usize,
    kind: Extremum,
    output: &mut [usize],
) -> Result<OutputRange> {
    let range = validate_range(range, &[data.len()])?;
    let lookback = require(window_lookback(period, MIN_PERIOD), "period", period, MIN_PERIOD)?;
    let mut kernel = Project::new(RollingExtremum::new(period, kind), |(at, _): (usize, T)| at);
    drive(&mut kernel, &mut Split::new(data, output), range, lookback)
}

/// Computes the highest value over each window of `period` samples.
///
/// # Errors
///
/// - `Error::EmptyInput` / `Error::OutOfRange` if `range` is not covered by `data`
/// - `Error::InvalidPeriod` if `period < 2`
/// - `Error::BufferTooSmall` if `output` cannot hold the result
pub fn max_into<T: SeriesElement>(
    range: impl Into<IndexRange>,
    data: &[T],
    period: usize,
    output: &mut [T],
) -> Result<OutputRange> {
    extremum_with(range, Series::Split(data, output), period, Extremum::Highest)
}

/// Computes the highest value with `buffer` as both input and output.
///
/// # Errors
///
/// Same as [`max_into`].
pub fn max_in_place<T: SeriesElement>(
    range: impl Into<IndexRange>,
    buffer: &mut [T],
    period: usize,
) -> Result<OutputRange> {
    extremum_with(range, Series::InPlace(buffer), period, Extremum::Highest)
}

/// Computes the lowest value over each window of `period` samples.
///
/// # Errors
///
/// Same as [`max_into`].
pub fn min_into<T: SeriesElement>(
    range: impl Into<IndexRange>,
    data: &[T],
    period: usize,
    output: &mut [T],
) -> Result<OutputRange> {
    extremum_with(range, Series::Split(data, output), period, Extremum::Lowest)
}

/// Computes the lowest value with `buffer` as both input and output.
///
/// # Errors
///
/// Same as [`max_into`].
pub fn min_in_place<T: SeriesElement>(
    range: impl Into<IndexRange>,
    buffer: &mut [T],
    period: usize,
) -> Result<OutputRange> {
    extremum_with(range, Series::InPlace(buffer), period, Extremum::Lowest)
}

/// Computes the input index of the highest value in each window.
///
/// # Errors
///
/// Same as [`max_into`].
pub fn max_index_into<T: SeriesElement>(
    range: impl Into<IndexRange>,
    data: &[T],
    period: usize,
    output: &mut [usize],
) -> Result<OutputRange> {
    extremum_index(range, data, period, Extremum::Highest, output)
}

/// Computes the input index of the lowest value in each window.
///
/// # Errors
///
/// Same as [`max_into`].
pub fn min_index_into<T: SeriesElement>(
    range: impl Into<IndexRange>,
    data: &[T],
    period: usize,
    output: &mut [usize],
) -> Result<OutputRange> {
    extremum_index(range, data, period, Extremum::Lowest, output)
}

/// Computes the lowest and highest value of each window in one pass.
///
/// # Errors
///
/// Same as [`max_into`]; `Error::BufferTooSmall` if either output is too short.
pub fn min_max_into<T: SeriesElement>(
    range: impl Into<IndexRange>,
    data: &[T],
    period: usize,
    min_out: &mut [T],
    max_out: &mut [T],
) -> Result<OutputRange> {
    let range = validate_range(range, &[data.len()])?;
    let lookback = require(min_lookback(period), "period", period, MIN_PERIOD)?;
    let mut kernel = Project::new(
        Envelope::new(period),
        |((_, low), (_, high)): ((usize, T), (usize, T))| (low, high),
    );
    drive(&mut kernel, &mut Split::new(data, &mut (min_out, max_out)), range, lookback)
}

/// Computes the input indices of the lowest and highest value of each window.
///
/// # Errors
///
/// Same as [`min_max_into`].
pub fn min_max_index_into<T: SeriesElement>(
    range: impl Into<IndexRange>,
    data: &[T],
    period: usize,
    min_idx: &mut [usize],
    max_idx: &mut [usize],
) -> Result<OutputRange> {
    let range = validate_range(range, &[data.len()])?;
    let lookback = require(min_lookback(period), "period", period, MIN_PERIOD)?;
    let mut kernel = Project::new(
        Envelope::new(period),
        |((low, _), (high, _)): ((usize, T), (usize, T))| (low, high),
    );
    drive(&mut kernel, &mut Split::new(data, &mut (min_idx, max_idx)), range, lookback)
}
