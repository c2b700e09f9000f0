//! Williams %R indicator.
//!
//! Williams %R is a momentum indicator that measures overbought and oversold
//! levels on a negative scale from -100 to 0.
//!
//! # Algorithm
//!
//! ```text
//! %R = -100 × (Highest High - Close) / (Highest High - Lowest Low)
//! ```
//!
//! Highest high and lowest low are tracked with rolling extrema over the
//! window ending at the current bar.
//!
//! # Edge Cases
//!
//! - When Highest High == Lowest Low (range = 0), %R = 0 for that bar only.
//!   The value is written at the bar's own output slot like every other one.
//!
//! # Example
//!
//! ```
//! use ta_window::indicators::williams_r::willr_into;
//!
//! let high = [48.70_f64, 48.72, 48.90, 48.87, 48.82, 49.05, 49.20, 49.35];
//! let low = [47.79_f64, 48.14, 48.39, 48.37, 48.24, 48.64, 48.94, 48.86];
//! let close = [48.16_f64, 48.61, 48.75, 48.63, 48.74, 49.03, 49.07, 49.32];
//! let mut out = [0.0; 8];
//!
//! let range = willr_into(.., &high, &low, &close, 5, &mut out).unwrap();
//! assert_eq!(range.begin(), 4);
//! for value in &out[..range.len()] {
//!     assert!((-100.0..=0.0).contains(value));
//! }
//! ```

use crate::error::Result;
use crate::kernels::{drive, Bars, Extremum, RollingExtremum, Split, WindowKernel};
use crate::lookback::{require, window_lookback};
use crate::range::{validate_range, IndexRange, OutputRange};
use crate::traits::SeriesElement;

const MIN_PERIOD: usize = 2;

/// Returns the lookback of Williams %R: `period - 1`, or `None` for `period < 2`.
///
/// # Example
///
/// ```
/// use ta_window::indicators::williams_r::willr_lookback;
///
/// assert_eq!(willr_lookback(14), Some(13));
/// assert_eq!(willr_lookback(1), None);
/// ```
#[inline]
#[must_use]
pub const fn willr_lookback(period: usize) -> Option<usize> {
    window_lookback(period, MIN_PERIOD)
}

struct WilliamsR<T> {
    highest: RollingExtremum<T>,
    lowest: RollingExtremum<T>,
}

impl<'a, T: SeriesElement> WindowKernel<Bars<'a, T>> for WilliamsR<T> {
    type Output = T;

    fn warmup(&self) -> usize {
        self.highest.period().saturating_sub(1)
    }

    fn seed(&mut self, _input: &Bars<'a, T>, _idx: usize) {}

    #[inline]
    fn step(&mut self, input: &Bars<'a, T>, idx: usize) -> T {
        let (_, hh) = self.highest.update(input.high, idx);
        let (_, ll) = self.lowest.update(input.low, idx);
        let ratio = (hh - input.close[idx]).ratio_or_zero(hh - ll);
        -T::hundred() * ratio
    }
}

/// Computes Williams %R over `range` into `output`.
///
/// # Errors
///
/// - `Error::EmptyInput` / `Error::OutOfRange` if `range` is not covered by all inputs
/// - `Error::InvalidPeriod` if `period < 2`
/// - `Error::BufferTooSmall` if `output` cannot hold the result
pub fn willr_into<T: SeriesElement>(
    range: impl Into<IndexRange>,
    high: &[T],
    low: &[T],
    close: &[T],
    period: usize,
    output: &mut [T],
) -> Result<OutputRange> {
    let range = validate_range(range, &[high.len(), low.len(), close.len()])?;
    let lookback = require(willr_lookback(period), "period", period, MIN_PERIOD)?;
    let input = Bars { high, low, close };
    let mut kernel = WilliamsR {
        highest: RollingExtremum::new(period, Extremum::Highest),
        lowest: RollingExtremum::new(period, Extremum::Lowest),
    };
    drive(&mut kernel, &mut Split::new(&input, output), range, lookback)
}
