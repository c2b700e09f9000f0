//! Kaufman Adaptive Moving Average (KAMA).
//!
//! KAMA adjusts its smoothing to the market's efficiency: in a clean trend it
//! follows price almost as fast as a 2-period EMA; in noise it slows down to
//! a 30-period EMA.
//!
//! # Algorithm
//!
//! ```text
//! change     = |x[i] - x[i - period]|
//! volatility = Σ |x[j] - x[j - 1]|              j in (i - period, i]
//! ER         = min(change / volatility, 1)      0 when volatility is 0
//! SC         = (ER × (2/3 - 2/31) + 2/31)²
//! KAMA[i]    = KAMA[i-1] + SC × (x[i] - KAMA[i-1])
//! ```
//!
//! The first KAMA uses the previous sample as `KAMA[i-1]`. The lookback is
//! `period` plus the unstable period configured for [`FuncUnstId::Kama`].

use crate::error::Result;
use crate::indicators::Series;
use crate::kernels::WindowKernel;
use crate::lookback::{require, with_unstable};
use crate::range::{IndexRange, OutputRange};
use crate::traits::SeriesElement;
use crate::unstable::{FuncUnstId, UnstablePeriods};

const MIN_PERIOD: usize = 2;
const FAST_PERIOD: usize = 2;
const SLOW_PERIOD: usize = 30;

/// Returns the lookback of KAMA: `period` plus the configured unstable
/// period, or `None` for `period < 2`.
#[inline]
#[must_use]
pub fn kama_lookback(period: usize) -> Option<usize> {
    kama_lookback_with(&UnstablePeriods::current(), period)
}

/// Like [`kama_lookback`], with the unstable period taken from `periods`.
#[inline]
#[must_use]
pub const fn kama_lookback_with(periods: &UnstablePeriods, period: usize) -> Option<usize> {
    let structural = if period < MIN_PERIOD { None } else { Some(period) };
    with_unstable(structural, periods, FuncUnstId::Kama)
}

struct Kama<T> {
    period: usize,
    fastest: T,
    slowest: T,
    volatility: T,
    primed: bool,
    prev: T,
    kama: Option<T>,
}

impl<T: SeriesElement> Kama<T> {
    fn new(period: usize) -> Result<Self> {
        Ok(Self {
            period,
            fastest: T::two() / T::from_usize(FAST_PERIOD + 1)?,
            slowest: T::two() / T::from_usize(SLOW_PERIOD + 1)?,
            volatility: T::zero(),
            primed: false,
            prev: T::zero(),
            kama: None,
        })
    }

    fn efficiency(&self, change: T) -> T {
        if self.volatility > T::zero() {
            (change / self.volatility).min(T::one())
        } else {
            T::zero()
        }
    }
}

impl<T: SeriesElement> WindowKernel<[T]> for Kama<T> {
    type Output = T;

    fn warmup(&self) -> usize {
        self.period
    }

    fn seed(&mut self, input: &[T], idx: usize) {
        let x = input[idx];
        if self.primed {
            self.volatility = self.volatility + (x - self.prev).abs();
        }
        self.primed = true;
        self.prev = x;
    }

    fn step(&mut self, input: &[T], idx: usize) -> T {
        let x = input[idx];
        let trailing = idx - self.period;
        self.volatility = self.volatility + (x - self.prev).abs();

        let change = (x - input[trailing]).abs();
        let er = self.efficiency(change);
        let sc = er * (self.fastest - self.slowest) + self.slowest;
        let sc = sc * sc;

        let last = self.kama.unwrap_or(self.prev);
        let kama = last + sc * (x - last);
        self.kama = Some(kama);
        self.prev = x;

        // The oldest change leaves with the next step
        self.volatility = self.volatility - (input[trailing + 1] - input[trailing]).abs();
        kama
    }
}

/// Computes the Kaufman Adaptive Moving Average of `data` over `range` into `output`.
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
/// use ta_window::indicators::kama::kama_into;
///
/// let data = [1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0];
/// let mut out = [0.0; 6];
/// let range = kama_into(.., &data, 3, &mut out).unwrap();
///
/// // A straight line is perfectly efficient: SC = (2/3)²
/// assert_eq!(range.begin(), 3);
/// assert!((out[0] - (3.0 + 4.0 / 9.0)).abs() < 1e-12);
/// ```
pub fn kama_into<T: SeriesElement>(
    range: impl Into<IndexRange>,
    data: &[T],
    period: usize,
    output: &mut [T],
) -> Result<OutputRange> {
    kama_with(range, Series::Split(data, output), period)
}

/// Computes the Kaufman Adaptive Moving Average with `buffer` as both input and output.
///
/// # Errors
///
/// Same as [`kama_into`].
pub fn kama_in_place<T: SeriesElement>(
    range: impl Into<IndexRange>,
    buffer: &mut [T],
    period: usize,
) -> Result<OutputRange> {
    kama_with(range, Series::InPlace(buffer), period)
}

pub(crate) fn kama_with<T: SeriesElement>(
    range: impl Into<IndexRange>,
    series: Series<'_, T>,
    period: usize,
) -> Result<OutputRange> {
    let range = series.validate(range)?;
    let lookback = require(kama_lookback(period), "period", period, MIN_PERIOD)?;
    series.run(&mut Kama::new(period)?, range, lookback)
}
