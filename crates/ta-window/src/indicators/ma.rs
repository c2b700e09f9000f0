//! Moving average selected at run time.
//!
//! [`ma_into`] dispatches to one of the moving averages of this crate by
//! [`MaType`]. A period of 1 is accepted for every type and copies the input.
//!
//! # Example
//!
//! ```
//! use ta_window::indicators::ma::{ma_into, ma_lookback, MaType};
//!
//! let data = [1.0_f64, 2.0, 3.0, 4.0, 5.0];
//! let mut out = [0.0; 5];
//!
//! let range = ma_into(.., &data, 3, MaType::Sma, &mut out).unwrap();
//! assert_eq!(&out[..range.len()], &[2.0, 3.0, 4.0]);
//!
//! assert_eq!(ma_lookback(1, MaType::Kama), Some(0));
//! let range = ma_into(.., &data, 1, MaType::Kama, &mut out).unwrap();
//! assert_eq!(&out[..range.len()], &data);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::indicators::dema::{dema_lookback_with, dema_with};
use crate::indicators::ema::{ema_lookback_with, ema_with};
use crate::indicators::kama::{kama_lookback_with, kama_with};
use crate::indicators::sma::{sma_lookback, sma_with};
use crate::indicators::t3::{t3_lookback_with, t3_with, DEFAULT_VFACTOR};
use crate::indicators::tema::{tema_lookback_with, tema_with};
use crate::indicators::trima::{trima_lookback, trima_with};
use crate::indicators::wma::{wma_lookback, wma_with};
use crate::indicators::Series;
use crate::kernels::Identity;
use crate::lookback::require;
use crate::range::{IndexRange, OutputRange};
use crate::traits::SeriesElement;
use crate::unstable::UnstablePeriods;

const MIN_PERIOD: usize = 1;

/// The moving averages [`ma_into`] can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaType {
    /// Simple moving average.
    #[default]
    Sma,
    /// Exponential moving average.
    Ema,
    /// Linearly weighted moving average.
    Wma,
    /// Double exponential moving average.
    Dema,
    /// Triple exponential moving average.
    Tema,
    /// Triangular moving average.
    Trima,
    /// Kaufman adaptive moving average.
    Kama,
    /// Tillson T3 with the default volume factor.
    T3,
}

/// Returns the lookback of the selected moving average.
///
/// A period of 1 gives `Some(0)` for every type; a period of 0 gives `None`.
#[must_use]
pub fn ma_lookback(period: usize, ma_type: MaType) -> Option<usize> {
    ma_lookback_with(&UnstablePeriods::current(), period, ma_type)
}

/// Like [`ma_lookback`], with unstable periods taken from `periods`.
#[must_use]
pub fn ma_lookback_with(periods: &UnstablePeriods, period: usize, ma_type: MaType) -> Option<usize> {
    match period {
        0 => None,
        1 => Some(0),
        _ => match ma_type {
            MaType::Sma => sma_lookback(period),
            MaType::Ema => ema_lookback_with(periods, period),
            MaType::Wma => wma_lookback(period),
            MaType::Dema => dema_lookback_with(periods, period),
            MaType::Tema => tema_lookback_with(periods, period),
            MaType::Trima => trima_lookback(period),
            MaType::Kama => kama_lookback_with(periods, period),
            MaType::T3 => t3_lookback_with(periods, period, DEFAULT_VFACTOR),
        },
    }
}

/// Computes the selected moving average of `data` over `range` into `output`.
///
/// # Errors
///
/// - `Error::EmptyInput` / `Error::OutOfRange` if `range` is not covered by `data`
/// - `Error::InvalidPeriod` if `period == 0`
/// - `Error::BufferTooSmall` if `output` cannot hold the result
pub fn ma_into<T: SeriesElement>(
    range: impl Into<IndexRange>,
    data: &[T],
    period: usize,
    ma_type: MaType,
    output: &mut [T],
) -> Result<OutputRange> {
    ma_with(range, Series::Split(data, output), period, ma_type)
}

/// Computes the selected moving average with `buffer` as both input and output.
///
/// # Errors
///
/// Same as [`ma_into`].
pub fn ma_in_place<T: SeriesElement>(
    range: impl Into<IndexRange>,
    buffer: &mut [T],
    period: usize,
    ma_type: MaType,
) -> Result<OutputRange> {
    ma_with(range, Series::InPlace(buffer), period, ma_type)
}

pub(crate) fn ma_with<T: SeriesElement>(
    range: impl Into<IndexRange>,
    series: Series<'_, T>,
    period: usize,
    ma_type: MaType,
) -> Result<OutputRange> {
    let range = range.into();
    let valid = series.validate(range)?;
    require(ma_lookback(period, ma_type), "period", period, MIN_PERIOD)?;

    if period == 1 {
        return series.run(&mut Identity, valid, 0);
    }

    tracing::trace!(?ma_type, period, "dispatching moving average");
    match ma_type {
        MaType::Sma => sma_with(range, series, period),
        MaType::Ema => ema_with(range, series, period),
        MaType::Wma => wma_with(range, series, period),
        MaType::Dema => dema_with(range, series, period),
        MaType::Tema => tema_with(range, series, period),
        MaType::Trima => trima_with(range, series, period),
        MaType::Kama => kama_with(range, series, period),
        MaType::T3 => t3_with(range, series, period, DEFAULT_VFACTOR),
    }
}
