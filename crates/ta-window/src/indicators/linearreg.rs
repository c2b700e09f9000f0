//! Rolling linear regression family.
//!
//! Each window of `period` samples is fitted with a least-squares line
//! against the sample position `x = 0..period-1`. The indicators differ only
//! in what they report from the fit:
//!
//! | Indicator             | Value                                   |
//! |-----------------------|-----------------------------------------|
//! | `linearreg`           | fitted value at the newest sample       |
//! | `linearreg_slope`     | slope per sample                        |
//! | `linearreg_intercept` | fitted value at the oldest sample       |
//! | `linearreg_angle`     | slope as an angle in degrees            |
//! | `tsf`                 | fitted value one sample past the window |
//!
//! # Example
//!
//! ```
//! use ta_window::indicators::linearreg::{linearreg_slope_into, tsf_into};
//!
//! let data = [1.0_f64, 3.0, 5.0, 7.0, 9.0];
//! let mut out = [0.0; 5];
//!
//! let range = linearreg_slope_into(.., &data, 3, &mut out).unwrap();
//! assert_eq!(&out[..range.len()], &[2.0, 2.0, 2.0]);
//!
//! let range = tsf_into(.., &data, 3, &mut out).unwrap();
//! assert_eq!(&out[..range.len()], &[7.0, 9.0, 11.0]);
//! ```

use crate::error::Result;
use crate::indicators::Series;
use crate::kernels::running_moments::{LineFit, RegressionSums};
use crate::kernels::Project;
use crate::lookback::{require, window_lookback};
use crate::range::{IndexRange, OutputRange};
use crate::traits::SeriesElement;

const MIN_PERIOD: usize = 2;

/// Returns the lookback shared by the regression family: `period - 1`, or
/// `None` for `period < 2`.
#[inline]
#[must_use]
pub const fn linearreg_lookback(period: usize) -> Option<usize> {
    window_lookback(period, MIN_PERIOD)
}

fn fit_with<T, F>(
    range: impl Into<IndexRange>,
    series: Series<'_, T>,
    period: usize,
    report: F,
) -> Result<OutputRange>
where
    T: SeriesElement,
    F: FnMut(LineFit<T>) -> T,
{
    let range = series.validate(range)?;
    let lookback = require(linearreg_lookback(period), "period", period, MIN_PERIOD)?;
    let mut kernel = Project::new(RegressionSums::new(period)?, report);
    series.run(&mut kernel, range, lookback)
}

/// Computes the end point of the rolling regression line of `data` over
/// `range` into `output`.
///
/// # Errors
///
/// - `Error::EmptyInput` / `Error::OutOfRange` if `range` is not covered by `data`
/// - `Error::InvalidPeriod` if `period < 2`
/// - `Error::BufferTooSmall` if `output` cannot hold the result
pub fn linearreg_into<T: SeriesElement>(
    range: impl Into<IndexRange>,
    data: &[T],
    period: usize,
    output: &mut [T],
) -> Result<OutputRange> {
    fit_with(range, Series::Split(data, output), period, |fit: LineFit<T>| fit.at_end())
}

/// Computes the regression end point with `buffer` as both input and output.
///
/// # Errors
///
/// Same as [`linearreg_into`].
pub fn linearreg_in_place<T: SeriesElement>(
    range: impl Into<IndexRange>,
    buffer: &mut [T],
    period: usize,
) -> Result<OutputRange> {
    fit_with(range, Series::InPlace(buffer), period, |fit: LineFit<T>| fit.at_end())
}

/// Computes the rolling regression slope of `data` over `range` into `output`.
///
/// # Errors
///
/// Same as [`linearreg_into`].
pub fn linearreg_slope_into<T: SeriesElement>(
    range: impl Into<IndexRange>,
    data: &[T],
    period: usize,
    output: &mut [T],
) -> Result<OutputRange> {
    fit_with(range, Series::Split(data, output), period, |fit: LineFit<T>| fit.slope)
}

/// Computes the rolling regression intercept of `data` over `range` into `output`.
///
/// The intercept is the fitted value at the oldest sample of each window.
///
/// # Errors
///
/// Same as [`linearreg_into`].
pub fn linearreg_intercept_into<T: SeriesElement>(
    range: impl Into<IndexRange>,
    data: &[T],
    period: usize,
    output: &mut [T],
) -> Result<OutputRange> {
    fit_with(range, Series::Split(data, output), period, |fit: LineFit<T>| fit.intercept)
}

/// Computes the rolling regression angle, in degrees, of `data` over `range`
/// into `output`.
///
/// # Errors
///
/// Same as [`linearreg_into`].
pub fn linearreg_angle_into<T: SeriesElement>(
    range: impl Into<IndexRange>,
    data: &[T],
    period: usize,
    output: &mut [T],
) -> Result<OutputRange> {
    fit_with(range, Series::Split(data, output), period, |fit: LineFit<T>| {
        fit.angle_degrees()
    })
}

/// Computes the Time Series Forecast of `data` over `range` into `output`:
/// the regression line extended one sample past each window.
///
/// # Errors
///
/// Same as [`linearreg_into`].
pub fn tsf_into<T: SeriesElement>(
    range: impl Into<IndexRange>,
    data: &[T],
    period: usize,
    output: &mut [T],
) -> Result<OutputRange> {
    fit_with(range, Series::Split(data, output), period, |fit: LineFit<T>| fit.forecast())
}

/// Computes the Time Series Forecast with `buffer` as both input and output.
///
/// # Errors
///
/// Same as [`linearreg_into`].
pub fn tsf_in_place<T: SeriesElement>(
    range: impl Into<IndexRange>,
    buffer: &mut [T],
    period: usize,
) -> Result<OutputRange> {
    fit_with(range, Series::InPlace(buffer), period, |fit: LineFit<T>| fit.forecast())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    /// Least squares by direct summation over one window.
    fn naive_fit(window: &[f64]) -> (f64, f64) {
        let n = window.len() as f64;
        let mean_x = (n - 1.0) / 2.0;
        let mean_y = window.iter().sum::<f64>() / n;
        let mut cov = 0.0;
        let mut var = 0.0;
        for (x, y) in window.iter().enumerate() {
            let dx = x as f64 - mean_x;
            cov += dx * (y - mean_y);
            var += dx * dx;
        }
        let slope = cov / var;
        (slope, mean_y - slope * mean_x)
    }

    fn sample() -> Vec<f64> {
        (0..50).map(|i| 100.0 + (i as f64 * 0.3).cos() * 6.0 + (i % 4) as f64).collect()
    }

    #[test]
    fn test_linearreg_lookback() {
        assert_eq!(linearreg_lookback(1), None);
        assert_eq!(linearreg_lookback(14), Some(13));
    }

    #[test]
    fn test_family_matches_naive_fit() {
        let data = sample();
        let period = 9;
        let len = data.len();
        let (mut end, mut slope, mut intercept, mut angle, mut tsf) =
            (vec![0.0; len], vec![0.0; len], vec![0.0; len], vec![0.0; len], vec![0.0; len]);

        let range = linearreg_into(.., &data, period, &mut end).unwrap();
        assert_eq!(linearreg_slope_into(.., &data, period, &mut slope).unwrap(), range);
        assert_eq!(linearreg_intercept_into(.., &data, period, &mut intercept).unwrap(), range);
        assert_eq!(linearreg_angle_into(.., &data, period, &mut angle).unwrap(), range);
        assert_eq!(tsf_into(.., &data, period, &mut tsf).unwrap(), range);

        for (offset, idx) in range.indices().enumerate() {
            let (b, a) = naive_fit(&data[idx + 1 - period..=idx]);
            let last = (period - 1) as f64;
            assert!((slope[offset] - b).abs() < 1e-8);
            assert!((intercept[offset] - a).abs() < 1e-8);
            assert!((end[offset] - (a + b * last)).abs() < 1e-8);
            assert!((tsf[offset] - (a + b * (last + 1.0))).abs() < 1e-8);
            assert!((angle[offset] - b.atan().to_degrees()).abs() < 1e-6);
        }
    }

    #[test]
    fn test_flat_window_has_zero_slope() {
        let data = [4.0_f64; 8];
        let mut out = [1.0; 8];
        let range = linearreg_angle_into(.., &data, 4, &mut out).unwrap();
        assert!(out[..range.len()].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_in_place_variants() {
        let data = sample();
        let mut out = vec![0.0; data.len()];

        let expected = linearreg_into(3..=49, &data, 7, &mut out).unwrap();
        let mut buffer = data.clone();
        let range = linearreg_in_place(3..=49, &mut buffer, 7).unwrap();
        assert_eq!(range, expected);
        assert_eq!(&buffer[..range.len()], &out[..range.len()]);

        let expected = tsf_into(3..=49, &data, 7, &mut out).unwrap();
        let mut buffer = data.clone();
        let range = tsf_in_place(3..=49, &mut buffer, 7).unwrap();
        assert_eq!(range, expected);
        assert_eq!(&buffer[..range.len()], &out[..range.len()]);
    }

    #[test]
    fn test_invalid_period() {
        let data = sample();
        let mut out = vec![0.0; data.len()];
        assert!(matches!(
            tsf_into(.., &data, 1, &mut out),
            Err(Error::InvalidPeriod { min: 2, .. })
        ));
    }
}
