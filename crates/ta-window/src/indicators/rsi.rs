//! Relative Strength Index (RSI) indicator.
//!
//! RSI is a momentum oscillator bounded to `[0, 100]`.
//!
//! # Algorithm
//!
//! 1. Price changes are split into gains and losses
//! 2. The first averages are the plain means over `period` changes
//! 3. Later averages use Wilder smoothing:
//!    `avg = (avg_prev × (period - 1) + current) / period`
//! 4. `RSI = 100 × avg_gain / (avg_gain + avg_loss)`
//!
//! A window with neither gains nor losses yields `0`.
//!
//! The smoothing never forgets its seed, so the unstable period configured
//! for [`FuncUnstId::Rsi`] is added to the lookback of `period`.

use crate::error::Result;
use crate::indicators::Series;
use crate::kernels::WindowKernel;
use crate::lookback::{require, with_unstable};
use crate::range::{IndexRange, OutputRange};
use crate::traits::SeriesElement;
use crate::unstable::{FuncUnstId, UnstablePeriods};

const MIN_PERIOD: usize = 2;

/// Returns the lookback of the RSI: `period` plus the configured unstable
/// period, or `None` for `period < 2`.
///
/// # Example
///
/// ```
/// use ta_window::indicators::rsi::rsi_lookback;
///
/// assert_eq!(rsi_lookback(1), None);
/// assert!(rsi_lookback(14).unwrap() >= 14);
/// ```
#[inline]
#[must_use]
pub fn rsi_lookback(period: usize) -> Option<usize> {
    rsi_lookback_with(&UnstablePeriods::current(), period)
}

/// Like [`rsi_lookback`], with the unstable period taken from `periods`.
#[inline]
#[must_use]
pub const fn rsi_lookback_with(periods: &UnstablePeriods, period: usize) -> Option<usize> {
    let structural = if period < MIN_PERIOD { None } else { Some(period) };
    with_unstable(structural, periods, FuncUnstId::Rsi)
}

/// Wilder-smoothed gain and loss averages.
struct Rsi<T> {
    period: usize,
    n: T,
    prev: Option<T>,
    gain: T,
    loss: T,
    averaged: bool,
}

impl<T: SeriesElement> Rsi<T> {
    fn new(period: usize) -> Result<Self> {
        Ok(Self {
            period,
            n: T::from_usize(period)?,
            prev: None,
            gain: T::zero(),
            loss: T::zero(),
            averaged: false,
        })
    }

    /// Splits the change since the previous sample into (gain, loss).
    fn change(&mut self, x: T) -> (T, T) {
        let delta = self.prev.map_or(T::zero(), |prev| x - prev);
        self.prev = Some(x);
        if delta < T::zero() {
            (T::zero(), -delta)
        } else {
            (delta, T::zero())
        }
    }
}

impl<T: SeriesElement> WindowKernel<[T]> for Rsi<T> {
    type Output = T;

    fn warmup(&self) -> usize {
        self.period
    }

    fn seed(&mut self, input: &[T], idx: usize) {
        let (gain, loss) = self.change(input[idx]);
        self.gain = self.gain + gain;
        self.loss = self.loss + loss;
    }

    fn step(&mut self, input: &[T], idx: usize) -> T {
        let (gain, loss) = self.change(input[idx]);
        if self.averaged {
            let keep = self.n - T::one();
            self.gain = (self.gain * keep + gain) / self.n;
            self.loss = (self.loss * keep + loss) / self.n;
        } else {
            self.gain = (self.gain + gain) / self.n;
            self.loss = (self.loss + loss) / self.n;
            self.averaged = true;
        }
        T::hundred() * self.gain.ratio_or_zero(self.gain + self.loss)
    }
}

/// Computes the Relative Strength Index of `data` over `range` into `output`.
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
/// use ta_window::indicators::rsi::rsi_into;
///
/// let data = [1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0];
/// let mut out = [0.0; 6];
/// let range = rsi_into(.., &data, 3, &mut out).unwrap();
///
/// assert_eq!(range.begin(), 3);
/// assert!(out[..range.len()].iter().all(|&v| v == 100.0));
/// ```
pub fn rsi_into<T: SeriesElement>(
    range: impl Into<IndexRange>,
    data: &[T],
    period: usize,
    output: &mut [T],
) -> Result<OutputRange> {
    rsi_with(range, Series::Split(data, output), period)
}

/// Computes the Relative Strength Index with `buffer` as both input and output.
///
/// # Errors
///
/// Same as [`rsi_into`].
pub fn rsi_in_place<T: SeriesElement>(
    range: impl Into<IndexRange>,
    buffer: &mut [T],
    period: usize,
) -> Result<OutputRange> {
    rsi_with(range, Series::InPlace(buffer), period)
}

fn rsi_with<T: SeriesElement>(
    range: impl Into<IndexRange>,
    series: Series<'_, T>,
    period: usize,
) -> Result<OutputRange> {
    let range = series.validate(range)?;
    let lookback = require(rsi_lookback(period), "period", period, MIN_PERIOD)?;
    series.run(&mut Rsi::new(period)?, range, lookback)
}
