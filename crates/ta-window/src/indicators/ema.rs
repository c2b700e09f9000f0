//! Exponential Moving Average (EMA) indicator.
//!
//! The Exponential Moving Average is a trend-following indicator that gives more
//! weight to recent prices. Unlike the Simple Moving Average, the EMA responds
//! more quickly to recent price changes.
//!
//! # Algorithm
//!
//! 1. The seed is the SMA of the first `period` samples of the computation
//! 2. Every later sample applies `EMA = EMA_prev + α × (Price - EMA_prev)`
//!    with `α = 2 / (period + 1)`
//!
//! # Unstable Period
//!
//! An EMA depends on every sample since its seed, so its first values still
//! carry the seed's influence. The unstable period configured for
//! [`FuncUnstId::Ema`] is added to the lookback: the computation starts that
//! many samples earlier and the extra values are computed but not written.
//!
//! # Formula
//!
//! ```text
//! lookback = period - 1 + unstable(Ema)
//! EMA[s + period - 1] = SMA(x[s..s + period])       s = begin - lookback
//! EMA[i] = EMA[i-1] + α × (x[i] - EMA[i-1])
//! ```
//!
//! # Example
//!
//! ```
//! use ta_window::indicators::ema::{ema_into, ema_lookback};
//!
//! let data = [1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0];
//! let mut out = [0.0; 6];
//!
//! let range = ema_into(.., &data, 3, &mut out).unwrap();
//! assert_eq!(Some(range.begin()), ema_lookback(3));
//! // Seed = (1 + 2 + 3) / 3, then α = 0.5
//! assert_eq!(&out[..range.len()], &[2.0, 3.0, 4.0, 5.0]);
//! ```

use crate::error::Result;
use crate::indicators::Series;
use crate::kernels::ExpLayer;
use crate::lookback::{require, window_lookback, with_unstable};
use crate::range::{IndexRange, OutputRange};
use crate::traits::SeriesElement;
use crate::unstable::{FuncUnstId, UnstablePeriods};

pub(crate) const MIN_PERIOD: usize = 2;

/// Returns the lookback of the EMA: `period - 1` plus the configured
/// unstable period, or `None` for `period < 2`.
///
/// # Example
///
/// ```
/// use ta_window::indicators::ema::ema_lookback;
///
/// assert_eq!(ema_lookback(1), None);
/// assert!(ema_lookback(10).unwrap() >= 9);
/// ```
#[inline]
#[must_use]
pub fn ema_lookback(period: usize) -> Option<usize> {
    ema_lookback_with(&UnstablePeriods::current(), period)
}

/// Like [`ema_lookback`], with the unstable period taken from `periods`.
#[inline]
#[must_use]
pub const fn ema_lookback_with(periods: &UnstablePeriods, period: usize) -> Option<usize> {
    with_unstable(window_lookback(period, MIN_PERIOD), periods, FuncUnstId::Ema)
}

/// Computes the Exponential Moving Average of `data` over `range` into `output`.
///
/// # Errors
///
/// - `Error::EmptyInput` / `Error::OutOfRange` if `range` is not covered by `data`
/// - `Error::InvalidPeriod` if `period < 2`
/// - `Error::BufferTooSmall` if `output` cannot hold the result
pub fn ema_into<T: SeriesElement>(
    range: impl Into<IndexRange>,
    data: &[T],
    period: usize,
    output: &mut [T],
) -> Result<OutputRange> {
    ema_with(range, Series::Split(data, output), period)
}

/// Computes the Exponential Moving Average with `buffer` as both input and output.
///
/// # Errors
///
/// Same as [`ema_into`].
pub fn ema_in_place<T: SeriesElement>(
    range: impl Into<IndexRange>,
    buffer: &mut [T],
    period: usize,
) -> Result<OutputRange> {
    ema_with(range, Series::InPlace(buffer), period)
}

pub(crate) fn ema_with<T: SeriesElement>(
    range: impl Into<IndexRange>,
    series: Series<'_, T>,
    period: usize,
) -> Result<OutputRange> {
    let range = series.validate(range)?;
    let lookback = require(ema_lookback(period), "period", period, MIN_PERIOD)?;
    series.run(&mut ExpLayer::new(period)?, range, lookback)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Unit tests here leave the unstable table at its default of zero; the
    // tests that change it live in tests/unstable_period.rs.

    #[test]
    fn test_ema_seed_is_sma() {
        let data = [2.0_f64, 4.0, 6.0, 8.0];
        let mut out = [0.0; 4];
        let range = ema_into(.., &data, 3, &mut out).unwrap();
        assert_eq!(range.begin(), 2);
        assert_eq!(out[0], 4.0);
        // 4 + 0.5 * (8 - 4)
        assert_eq!(out[1], 6.0);
    }

    #[test]
    fn test_ema_constant_series() {
        let data = [7.5_f64; 20];
        let mut out = [0.0; 20];
        let range = ema_into(.., &data, 5, &mut out).unwrap();
        assert!(out[..range.len()].iter().all(|v| (v - 7.5).abs() < 1e-12));
    }

    #[test]
    fn test_ema_subrange_seeds_from_lookback() {
        let data: Vec<f64> = (0..12).map(f64::from).collect();
        let mut out = [0.0; 3];
        let range = ema_into(9..=11, &data, 4, &mut out).unwrap();
        assert_eq!(range.begin(), 9);
        // Seeded over x[6..=9]; the series is linear so EMA lags by (period - 1) / 2
        assert!((out[0] - 7.5).abs() < 1e-12);
        assert!((out[2] - 9.5).abs() < 1e-12);
    }

    #[test]
    fn test_ema_in_place() {
        let data: Vec<f32> = (0..16).map(|i| (i as f32 * 0.8).cos()).collect();
        let mut out = vec![0.0_f32; data.len()];
        let expected = ema_into(.., &data, 4, &mut out).unwrap();
        let mut buffer = data.clone();
        let range = ema_in_place(.., &mut buffer, 4).unwrap();
        assert_eq!(range, expected);
        assert_eq!(&buffer[..range.len()], &out[..range.len()]);
    }
}
