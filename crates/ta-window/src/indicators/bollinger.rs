//! Bollinger Bands indicator.
//!
//! Bollinger Bands are a volatility indicator consisting of three bands:
//! - **Middle Band**: a moving average of the price, selected by [`MaType`]
//! - **Upper Band**: Middle Band + (`nbdev_up` × Standard Deviation)
//! - **Lower Band**: Middle Band - (`nbdev_dn` × Standard Deviation)
//!
//! The standard deviation is the population deviation of the last `period`
//! samples, taken at the same index as the middle band. The lookback is the
//! lookback of the moving average.
//!
//! # Example
//!
//! ```
//! use ta_window::indicators::bollinger::{bbands_into, BollingerBands};
//!
//! let prices = [
//!     44.0_f64, 44.5, 43.5, 44.5, 44.0, 43.0, 42.5, 43.5, 44.5, 45.0,
//! ];
//! let bands = BollingerBands::new().period(4).nbdev_up(2.0).nbdev_dn(1.0);
//! let (mut upper, mut middle, mut lower) = ([0.0; 10], [0.0; 10], [0.0; 10]);
//!
//! let range = bbands_into(.., &prices, &bands, &mut upper, &mut middle, &mut lower).unwrap();
//! assert_eq!(range.begin(), 3);
//! for i in 0..range.len() {
//!     assert!(upper[i] >= middle[i] && middle[i] >= lower[i]);
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::indicators::ma::{ma_lookback_with, ma_with, MaType};
use crate::indicators::statistics::{check_multiplier, deviation};
use crate::indicators::Series;
use crate::kernels::{drive, RunningMoments, Split};
use crate::lookback::require;
use crate::range::{validate_range, IndexRange, OutputRange};
use crate::traits::SeriesElement;
use crate::unstable::UnstablePeriods;

const MIN_PERIOD: usize = 2;

/// Bollinger Bands parameters with a fluent builder API.
///
/// Defaults: period 5, two deviations on both sides, simple moving average.
///
/// # Example
///
/// ```
/// use ta_window::indicators::bollinger::BollingerBands;
/// use ta_window::indicators::MaType;
///
/// let bands = BollingerBands::default().period(20).ma_type(MaType::Ema);
/// assert_eq!(bands.get_period(), 20);
/// assert!(bands.lookback().is_some());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BollingerBands {
    period: usize,
    nbdev_up: f64,
    nbdev_dn: f64,
    ma_type: MaType,
}

impl Default for BollingerBands {
    fn default() -> Self {
        Self {
            period: 5,
            nbdev_up: 2.0,
            nbdev_dn: 2.0,
            ma_type: MaType::Sma,
        }
    }
}

impl BollingerBands {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the window of both the moving average and the deviation.
    #[must_use]
    pub const fn period(mut self, period: usize) -> Self {
        self.period = period;
        self
    }

    /// Sets the deviation multiplier of the upper band.
    #[must_use]
    pub const fn nbdev_up(mut self, nbdev_up: f64) -> Self {
        self.nbdev_up = nbdev_up;
        self
    }

    /// Sets the deviation multiplier of the lower band.
    #[must_use]
    pub const fn nbdev_dn(mut self, nbdev_dn: f64) -> Self {
        self.nbdev_dn = nbdev_dn;
        self
    }

    /// Sets the moving average used for the middle band.
    #[must_use]
    pub const fn ma_type(mut self, ma_type: MaType) -> Self {
        self.ma_type = ma_type;
        self
    }

    /// Returns the period.
    #[must_use]
    pub const fn get_period(&self) -> usize {
        self.period
    }

    /// Returns the upper band multiplier.
    #[must_use]
    pub const fn get_nbdev_up(&self) -> f64 {
        self.nbdev_up
    }

    /// Returns the lower band multiplier.
    #[must_use]
    pub const fn get_nbdev_dn(&self) -> f64 {
        self.nbdev_dn
    }

    /// Returns the middle band moving average.
    #[must_use]
    pub const fn get_ma_type(&self) -> MaType {
        self.ma_type
    }

    /// Returns the lookback for this configuration; see [`bbands_lookback`].
    #[must_use]
    pub fn lookback(&self) -> Option<usize> {
        bbands_lookback(self)
    }
}

/// Returns the lookback of the bands: the lookback of the middle band's
/// moving average, or `None` for `period < 2` or a non-finite multiplier.
#[must_use]
pub fn bbands_lookback(bands: &BollingerBands) -> Option<usize> {
    bbands_lookback_with(&UnstablePeriods::current(), bands)
}

/// Like [`bbands_lookback`], with unstable periods taken from `periods`.
#[must_use]
pub fn bbands_lookback_with(periods: &UnstablePeriods, bands: &BollingerBands) -> Option<usize> {
    if bands.period < MIN_PERIOD || !bands.nbdev_up.is_finite() || !bands.nbdev_dn.is_finite() {
        return None;
    }
    ma_lookback_with(periods, bands.period, bands.ma_type)
}

/// Computes Bollinger Bands of `data` over `range`.
///
/// All three outputs share the returned [`OutputRange`].
///
/// # Errors
///
/// - `Error::EmptyInput` / `Error::OutOfRange` if `range` is not covered by `data`
/// - `Error::InvalidParam` if `nbdev_up` or `nbdev_dn` is not finite
/// - `Error::InvalidPeriod` if `period < 2`
/// - `Error::BufferTooSmall` if any output cannot hold the result; nothing is
///   written in that case
pub fn bbands_into<T: SeriesElement>(
    range: impl Into<IndexRange>,
    data: &[T],
    bands: &BollingerBands,
    upper: &mut [T],
    middle: &mut [T],
    lower: &mut [T],
) -> Result<OutputRange> {
    let range = range.into();
    let valid = validate_range(range, &[data.len()])?;
    check_multiplier("nbdev_up", bands.nbdev_up)?;
    check_multiplier("nbdev_dn", bands.nbdev_dn)?;
    let lookback = require(bbands_lookback(bands), "period", bands.period, MIN_PERIOD)?;

    let out = OutputRange::resolve(valid, lookback);
    if out.is_empty() {
        return Ok(out);
    }
    let capacity = upper.len().min(middle.len()).min(lower.len());
    if capacity < out.len() {
        return Err(Error::BufferTooSmall {
            required: out.len(),
            actual: capacity,
        });
    }

    let up = T::from_f64(bands.nbdev_up)?;
    let dn = T::from_f64(bands.nbdev_dn)?;

    ma_with(range, Series::Split(data, middle), bands.period, bands.ma_type)?;
    // The variance lands in `upper` first and is turned into both bands below
    drive(
        &mut RunningMoments::new(bands.period)?,
        &mut Split::new(data, upper),
        valid,
        lookback,
    )?;

    for ((hi, lo), mid) in upper[..out.len()]
        .iter_mut()
        .zip(lower[..out.len()].iter_mut())
        .zip(&middle[..out.len()])
    {
        let sd = deviation(*hi);
        *hi = *mid + up * sd;
        *lo = *mid - dn * sd;
    }
    Ok(out)
}
