//! Rolling statistics: variance, standard deviation and correlation.
//!
//! All three are population statistics over a window of `period` samples,
//! computed from running power sums in one pass.
//!
//! # Formulas
//!
//! ```text
//! VAR    = Σx²/n - (Σx/n)²
//! STDDEV = sqrt(VAR) × nbdev               0 when VAR <= 0
//! CORREL = cov(x, y) / (σx × σy)           0 when either σ is 0
//! ```
//!
//! # Example
//!
//! ```
//! use ta_window::indicators::statistics::{correl_into, stddev_into};
//!
//! let x = [2.0_f64, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
//! let mut out = [0.0; 8];
//! let range = stddev_into(.., &x, 8, 1.0, &mut out).unwrap();
//! assert_eq!(range.begin(), 7);
//! assert!((out[0] - 2.0).abs() < 1e-12);
//!
//! let range = correl_into(.., &x, &x, 4, &mut out).unwrap();
//! assert!(out[..range.len()].iter().all(|v| (v - 1.0).abs() < 1e-12));
//! ```

use num_traits::Float;

use crate::error::{Error, Result};
use crate::indicators::Series;
use crate::kernels::{drive, Paired, PairedMoments, Project, RunningMoments, Split};
use crate::lookback::{require, window_lookback};
use crate::range::{validate_range, IndexRange, OutputRange};
use crate::traits::SeriesElement;

const VAR_MIN_PERIOD: usize = 1;
const STDDEV_MIN_PERIOD: usize = 2;
const CORREL_MIN_PERIOD: usize = 1;

/// Returns the lookback of the variance: `period - 1`, or `None` for `period < 1`.
#[inline]
#[must_use]
pub const fn var_lookback(period: usize) -> Option<usize> {
    window_lookback(period, VAR_MIN_PERIOD)
}

/// Returns the lookback of the standard deviation: `period - 1`, or `None`
/// for `period < 2` or a non-finite `nbdev`.
#[inline]
#[must_use]
pub fn stddev_lookback(period: usize, nbdev: f64) -> Option<usize> {
    if nbdev.is_finite() {
        window_lookback(period, STDDEV_MIN_PERIOD)
    } else {
        None
    }
}

/// Returns the lookback of the correlation: `period - 1`, or `None` for `period < 1`.
#[inline]
#[must_use]
pub const fn correl_lookback(period: usize) -> Option<usize> {
    window_lookback(period, CORREL_MIN_PERIOD)
}

/// Computes the rolling population variance of `data` over `range` into `output`.
///
/// # Errors
///
/// - `Error::EmptyInput` / `Error::OutOfRange` if `range` is not covered by `data`
/// - `Error::InvalidPeriod` if `period < 1`
/// - `Error::BufferTooSmall` if `output` cannot hold the result
pub fn var_into<T: SeriesElement>(
    range: impl Into<IndexRange>,
    data: &[T],
    period: usize,
    output: &mut [T],
) -> Result<OutputRange> {
    var_with(range, Series::Split(data, output), period)
}

/// Computes the rolling population variance with `buffer` as both input and output.
///
/// # Errors
///
/// Same as [`var_into`].
pub fn var_in_place<T: SeriesElement>(
    range: impl Into<IndexRange>,
    buffer: &mut [T],
    period: usize,
) -> Result<OutputRange> {
    var_with(range, Series::InPlace(buffer), period)
}

fn var_with<T: SeriesElement>(
    range: impl Into<IndexRange>,
    series: Series<'_, T>,
    period: usize,
) -> Result<OutputRange> {
    let range = series.validate(range)?;
    let lookback = require(var_lookback(period), "period", period, VAR_MIN_PERIOD)?;
    series.run(&mut RunningMoments::new(period)?, range, lookback)
}

/// Computes the rolling population standard deviation of `data`, scaled by
/// `nbdev`, over `range` into `output`.
///
/// # Errors
///
/// - `Error::EmptyInput` / `Error::OutOfRange` if `range` is not covered by `data`
/// - `Error::InvalidParam` if `nbdev` is not finite
/// - `Error::InvalidPeriod` if `period < 2`
/// - `Error::BufferTooSmall` if `output` cannot hold the result
pub fn stddev_into<T: SeriesElement>(
    range: impl Into<IndexRange>,
    data: &[T],
    period: usize,
    nbdev: f64,
    output: &mut [T],
) -> Result<OutputRange> {
    stddev_with(range, Series::Split(data, output), period, nbdev)
}

/// Computes the scaled rolling standard deviation with `buffer` as both
/// input and output.
///
/// # Errors
///
/// Same as [`stddev_into`].
pub fn stddev_in_place<T: SeriesElement>(
    range: impl Into<IndexRange>,
    buffer: &mut [T],
    period: usize,
    nbdev: f64,
) -> Result<OutputRange> {
    stddev_with(range, Series::InPlace(buffer), period, nbdev)
}

/// Square root of a variance that may have drifted below zero.
#[inline]
pub(crate) fn deviation<T: SeriesElement>(variance: T) -> T {
    if variance > T::zero() {
        Float::sqrt(variance)
    } else {
        T::zero()
    }
}

/// Rejects a non-finite band multiplier.
pub(crate) fn check_multiplier(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(Error::InvalidParam {
            name,
            reason: "must be finite",
        })
    }
}

fn stddev_with<T: SeriesElement>(
    range: impl Into<IndexRange>,
    series: Series<'_, T>,
    period: usize,
    nbdev: f64,
) -> Result<OutputRange> {
    let range = series.validate(range)?;
    check_multiplier("nbdev", nbdev)?;
    let lookback = require(
        stddev_lookback(period, nbdev),
        "period",
        period,
        STDDEV_MIN_PERIOD,
    )?;

    let scale = T::from_f64(nbdev)?;
    let mut kernel = Project::new(RunningMoments::new(period)?, move |variance: T| {
        deviation(variance) * scale
    });
    series.run(&mut kernel, range, lookback)
}

/// Computes the rolling Pearson correlation of `x` and `y` over `range` into `output`.
///
/// Windows where either series is constant yield `0`.
///
/// # Errors
///
/// - `Error::EmptyInput` / `Error::OutOfRange` if `range` is not covered by both inputs
/// - `Error::InvalidPeriod` if `period < 1`
/// - `Error::BufferTooSmall` if `output` cannot hold the result
pub fn correl_into<T: SeriesElement>(
    range: impl Into<IndexRange>,
    x: &[T],
    y: &[T],
    period: usize,
    output: &mut [T],
) -> Result<OutputRange> {
    let range = validate_range(range, &[x.len(), y.len()])?;
    let lookback = require(correl_lookback(period), "period", period, CORREL_MIN_PERIOD)?;
    let input = Paired { x, y };
    drive(
        &mut PairedMoments::new(period)?,
        &mut Split::new(&input, output),
        range,
        lookback,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive_variance(window: &[f64]) -> f64 {
        let n = window.len() as f64;
        let mean = window.iter().sum::<f64>() / n;
        window.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n
    }

    #[test]
    fn test_lookbacks() {
        assert_eq!(var_lookback(0), None);
        assert_eq!(var_lookback(1), Some(0));
        assert_eq!(stddev_lookback(1, 1.0), None);
        assert_eq!(stddev_lookback(5, 2.0), Some(4));
        assert_eq!(stddev_lookback(5, f64::INFINITY), None);
        assert_eq!(correl_lookback(1), Some(0));
        assert_eq!(correl_lookback(30), Some(29));
    }

    #[test]
    fn test_var_matches_naive() {
        let data: Vec<f64> = (0..40).map(|i| ((i * 17) % 11) as f64 * 1.5).collect();
        let mut out = vec![0.0; data.len()];
        let range = var_into(.., &data, 6, &mut out).unwrap();
        for (offset, idx) in range.indices().enumerate() {
            let expected = naive_variance(&data[idx + 1 - 6..=idx]);
            assert!((out[offset] - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_var_period_one_is_zero() {
        let data = [3.0_f64, -1.0, 8.0];
        let mut out = [1.0; 3];
        let range = var_into(.., &data, 1, &mut out).unwrap();
        assert_eq!(range.len(), 3);
        assert_eq!(out, [0.0; 3]);
    }

    #[test]
    fn test_stddev_scaled() {
        let data = [1.0_f64, 3.0, 1.0, 3.0];
        let mut out = [0.0; 4];
        let range = stddev_into(.., &data, 2, 2.0, &mut out).unwrap();
        assert_eq!(range.begin(), 1);
        assert_eq!(&out[..range.len()], &[2.0, 2.0, 2.0]);
    }

    #[test]
    fn test_stddev_flat_is_zero() {
        let data = [0.1_f64; 12];
        let mut out = [f64::NAN; 12];
        let range = stddev_into(.., &data, 5, 1.0, &mut out).unwrap();
        assert!(out[..range.len()].iter().all(|v| *v >= 0.0 && v.is_finite()));
    }

    #[test]
    fn test_stddev_rejects_nonfinite_multiplier() {
        let data = [1.0_f64; 5];
        let mut out = [0.0; 5];
        assert!(matches!(
            stddev_into(.., &data, 2, f64::NAN, &mut out),
            Err(Error::InvalidParam { name: "nbdev", .. })
        ));
    }

    #[test]
    fn test_correl_anticorrelated() {
        let x: Vec<f64> = (0..10).map(f64::from).collect();
        let y: Vec<f64> = x.iter().map(|v| 5.0 - 2.0 * v).collect();
        let mut out = vec![0.0; x.len()];
        let range = correl_into(.., &x, &y, 4, &mut out).unwrap();
        assert!(out[..range.len()].iter().all(|v| (v + 1.0).abs() < 1e-9));
    }

    #[test]
    fn test_correl_constant_series_is_zero() {
        let x = [1.0_f64, 2.0, 3.0, 4.0];
        let y = [2.0_f64; 4];
        let mut out = [f64::NAN; 4];
        let range = correl_into(.., &x, &y, 3, &mut out).unwrap();
        assert_eq!(&out[..range.len()], &[0.0, 0.0]);
    }

    #[test]
    fn test_correl_range_checked_against_both_inputs() {
        let x = [1.0_f64; 10];
        let y = [1.0_f64; 6];
        let mut out = [0.0; 10];
        assert!(matches!(
            correl_into(0..=8, &x, &y, 3, &mut out),
            Err(Error::OutOfRange { len: 6, .. })
        ));
    }
}
