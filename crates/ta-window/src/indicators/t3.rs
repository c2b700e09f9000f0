//! T3 Moving Average (Tillson).
//!
//! T3 applies six EMAs in series and combines the last four layers:
//!
//! ```text
//! T3 = c1*e6 + c2*e5 + c3*e4 + c4*e3
//! ```
//!
//! Where:
//! - c1 = -v^3
//! - c2 = 3*v^2 + 3*v^3
//! - c3 = -6*v^2 - 3*v - 3*v^3
//! - c4 = 1 + 3*v + v^3 + 3*v^2
//!
//! and `v` is the volume factor in `[0, 1]`. The coefficients sum to one, so
//! a constant series maps to itself.

use crate::error::{Error, Result};
use crate::indicators::Series;
use crate::kernels::{ExpCascade, Project};
use crate::lookback::{require, window_lookback, with_unstable};
use crate::range::{IndexRange, OutputRange};
use crate::traits::SeriesElement;
use crate::unstable::{FuncUnstId, UnstablePeriods};

const MIN_PERIOD: usize = 2;

/// Volume factor used when the caller has no preference.
pub const DEFAULT_VFACTOR: f64 = 0.7;

#[inline]
fn vfactor_in_domain(vfactor: f64) -> bool {
    (0.0..=1.0).contains(&vfactor)
}

/// Returns the lookback of T3: `6 × (period - 1)` plus the configured
/// unstable period, or `None` for `period < 2` or `vfactor` outside `[0, 1]`.
///
/// # Example
///
/// ```
/// use ta_window::indicators::t3::t3_lookback;
///
/// assert_eq!(t3_lookback(1, 0.7), None);
/// assert_eq!(t3_lookback(5, 1.5), None);
/// assert!(t3_lookback(5, 0.7).unwrap() >= 24);
/// ```
#[must_use]
pub fn t3_lookback(period: usize, vfactor: f64) -> Option<usize> {
    t3_lookback_with(&UnstablePeriods::current(), period, vfactor)
}

/// Like [`t3_lookback`], with the unstable period taken from `periods`.
#[must_use]
pub fn t3_lookback_with(periods: &UnstablePeriods, period: usize, vfactor: f64) -> Option<usize> {
    if !vfactor_in_domain(vfactor) {
        return None;
    }
    let structural = window_lookback(period, MIN_PERIOD).and_then(|lookback| lookback.checked_mul(6));
    with_unstable(structural, periods, FuncUnstId::T3)
}

/// Computes the T3 moving average of `data` over `range` into `output`.
///
/// # Errors
///
/// - `Error::EmptyInput` / `Error::OutOfRange` if `range` is not covered by `data`
/// - `Error::InvalidParam` if `vfactor` is outside `[0, 1]`
/// - `Error::InvalidPeriod` if `period < 2`
/// - `Error::BufferTooSmall` if `output` cannot hold the result
pub fn t3_into<T: SeriesElement>(
    range: impl Into<IndexRange>,
    data: &[T],
    period: usize,
    vfactor: f64,
    output: &mut [T],
) -> Result<OutputRange> {
    t3_with(range, Series::Split(data, output), period, vfactor)
}

/// Computes the T3 moving average with `buffer` as both input and output.
///
/// # Errors
///
/// Same as [`t3_into`].
pub fn t3_in_place<T: SeriesElement>(
    range: impl Into<IndexRange>,
    buffer: &mut [T],
    period: usize,
    vfactor: f64,
) -> Result<OutputRange> {
    t3_with(range, Series::InPlace(buffer), period, vfactor)
}

pub(crate) fn t3_with<T: SeriesElement>(
    range: impl Into<IndexRange>,
    series: Series<'_, T>,
    period: usize,
    vfactor: f64,
) -> Result<OutputRange> {
    let range = series.validate(range)?;
    if !vfactor_in_domain(vfactor) {
        return Err(Error::InvalidParam {
            name: "vfactor",
            reason: "must be within [0, 1]",
        });
    }
    let lookback = require(t3_lookback(period, vfactor), "period", period, MIN_PERIOD)?;

    let v = T::from_f64(vfactor)?;
    let three = T::two() + T::one();
    let (v2, v3) = (v * v, v * v * v);
    let c1 = -v3;
    let c2 = three * v2 + three * v3;
    let c3 = -(three + three) * v2 - three * v - three * v3;
    let c4 = T::one() + three * v + v3 + three * v2;

    let mut kernel = Project::new(
        ExpCascade::<T, 6>::new(period)?,
        move |[_, _, e3, e4, e5, e6]: [T; 6]| c1 * e6 + c2 * e5 + c3 * e4 + c4 * e3,
    );
    series.run(&mut kernel, range, lookback)
}
