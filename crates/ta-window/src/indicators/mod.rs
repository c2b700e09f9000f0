//! Technical analysis indicators.
//!
//! Every indicator follows the same call contract:
//!
//! - `name_lookback(params..) -> Option<usize>`: number of leading input
//!   samples consumed before the first output, or `None` when a parameter is
//!   outside its domain. Indicators with an unstable period also expose
//!   `name_lookback_with(&UnstablePeriods, params..)`, which reads the
//!   unstable period from the given table instead of the process-wide one.
//! - `name_into(range, inputs.., params.., outputs..) -> Result<OutputRange>`:
//!   validates `range` against the inputs, then the parameters, and writes
//!   densely packed values so that `out[0]` corresponds to input index
//!   [`OutputRange::begin`](crate::range::OutputRange::begin).
//! - `name_in_place(range, buf, params..)`: single-input, single-output
//!   indicators can use one buffer as both input and output.
//!
//! Range errors take precedence over parameter errors, and nothing is written
//! before both checks pass. Running out of data after the lookback returns
//! `Ok` with an empty range.
//!
//! # Indicator Categories
//!
//! ## Element-wise
//!
//! - [`math`]: unary transforms (`ln`, `sqrt`, trigonometry, ...) and binary
//!   operators on two series
//!
//! ## Moving Averages
//!
//! - [`sma`]: moving sum and simple moving average
//! - [`wma`]: linearly weighted moving average
//! - [`trima`]: triangular moving average
//! - [`ema`], [`dema`], [`tema`], [`t3`]: exponential family
//! - [`kama`]: Kaufman adaptive moving average
//! - [`ma`]: any of the above, selected by [`MaType`]
//!
//! ## Range
//!
//! - [`extrema`]: rolling highest/lowest value and index
//! - [`midpoint`]: midpoint of one series, midprice of high/low
//! - [`williams_r`]: Williams %R
//!
//! ## Momentum and Statistics
//!
//! - [`rsi`]: relative strength index
//! - [`statistics`]: variance, standard deviation, correlation
//! - [`linearreg`]: rolling linear regression family and time series forecast
//! - [`bollinger`]: Bollinger Bands
//!
//! # Example
//!
//! ```
//! use ta_window::indicators::{sma_into, sma_lookback};
//!
//! let prices = [1.0_f64, 2.0, 3.0, 4.0, 5.0];
//! let mut out = vec![0.0; prices.len()];
//!
//! let range = sma_into(.., &prices, 3, &mut out).unwrap();
//! assert_eq!(sma_lookback(3), Some(2));
//! assert_eq!(range.begin(), 2);
//! assert_eq!(&out[..range.len()], &[2.0, 3.0, 4.0]);
//! ```

pub mod bollinger;
pub mod dema;
pub mod ema;
pub mod extrema;
pub mod kama;
pub mod linearreg;
pub mod ma;
pub mod math;
pub mod midpoint;
pub mod rsi;
pub mod sma;
pub mod statistics;
pub mod t3;
pub mod tema;
pub mod trima;
pub mod williams_r;
pub mod wma;

use crate::error::Result;
use crate::kernels::{drive, InPlace, Split, WindowKernel};
use crate::range::{validate_range, IndexRange, OutputRange, ValidRange};
use crate::traits::SeriesElement;

// Re-export indicator functions for convenient access.
pub use bollinger::{bbands_into, bbands_lookback, bbands_lookback_with, BollingerBands};
pub use dema::{dema_in_place, dema_into, dema_lookback, dema_lookback_with};
pub use ema::{ema_in_place, ema_into, ema_lookback, ema_lookback_with};
pub use extrema::{
    max_in_place, max_index_into, max_into, max_lookback, min_in_place, min_index_into, min_into,
    min_lookback, min_max_index_into, min_max_into,
};
pub use kama::{kama_in_place, kama_into, kama_lookback, kama_lookback_with};
pub use linearreg::{
    linearreg_angle_into, linearreg_in_place, linearreg_intercept_into, linearreg_into,
    linearreg_lookback, linearreg_slope_into, tsf_in_place, tsf_into,
};
pub use ma::{ma_in_place, ma_into, ma_lookback, ma_lookback_with, MaType};
pub use math::{
    operator_into, operator_lookback, transform_in_place, transform_into, transform_lookback,
    MathOperator, MathTransform,
};
pub use midpoint::{midpoint_in_place, midpoint_into, midpoint_lookback, midprice_into, midprice_lookback};
pub use rsi::{rsi_in_place, rsi_into, rsi_lookback, rsi_lookback_with};
pub use sma::{sma_in_place, sma_into, sma_lookback, sum_in_place, sum_into, sum_lookback};
pub use statistics::{
    correl_into, correl_lookback, stddev_in_place, stddev_into, stddev_lookback, var_in_place,
    var_into, var_lookback,
};
pub use t3::{t3_in_place, t3_into, t3_lookback, t3_lookback_with};
pub use tema::{tema_in_place, tema_into, tema_lookback, tema_lookback_with};
pub use trima::{trima_in_place, trima_into, trima_lookback};
pub use williams_r::{willr_into, willr_lookback};
pub use wma::{wma_in_place, wma_into, wma_lookback};

/// Input and output buffers of a single-series indicator call.
pub(crate) enum Series<'a, T> {
    /// Distinct input and output.
    Split(&'a [T], &'a mut [T]),
    /// One buffer holding the input and receiving the output.
    InPlace(&'a mut [T]),
}

impl<T: SeriesElement> Series<'_, T> {
    /// Length of the input series.
    pub(crate) fn len(&self) -> usize {
        match self {
            Self::Split(input, _) => input.len(),
            Self::InPlace(buffer) => buffer.len(),
        }
    }

    /// Validates a requested range against the input series.
    pub(crate) fn validate(&self, range: impl Into<IndexRange>) -> Result<ValidRange> {
        validate_range(range, &[self.len()])
    }

    /// Drives `kernel` over the buffers.
    pub(crate) fn run<K>(self, kernel: &mut K, range: ValidRange, lookback: usize) -> Result<OutputRange>
    where
        K: WindowKernel<[T], Output = T>,
    {
        match self {
            Self::Split(input, output) => drive(kernel, &mut Split::new(input, output), range, lookback),
            Self::InPlace(buffer) => drive(kernel, &mut InPlace::new(buffer), range, lookback),
        }
    }
}
