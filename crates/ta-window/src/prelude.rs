//! Commonly used types and traits for convenient importing.
//!
//! # Usage
//!
//! ```
//! use ta_window::prelude::*;
//!
//! let prices = [1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
//!
//! let sma = collect(prices.len(), |out| sma_into(.., &prices, 3, out)).unwrap();
//! let ema = collect(prices.len(), |out| ema_into(.., &prices, 3, out)).unwrap();
//! let rsi = collect(prices.len(), |out| rsi_into(.., &prices, 5, out)).unwrap();
//!
//! assert_eq!(sma.range.begin(), 2);
//! assert_eq!(ema.values.len(), ema.range.len());
//! assert!(rsi.values.iter().all(|&v| v == 100.0));
//! ```
//!
//! # Contents
//!
//! ## Error Handling
//! - [`Error`], [`Result`] and the status code [`RetCode`]
//!
//! ## Ranges
//! - [`IndexRange`], [`OutputRange`] and the allocating helper [`collect`]
//!
//! ## Traits
//! - [`SeriesElement`]: numeric types usable in indicators
//!
//! ## Unstable Periods
//! - [`FuncUnstId`], [`UnstablePeriods`] and the process-wide accessors
//!
//! ## Indicators
//! Every `*_into`, `*_in_place` and `*_lookback` function, and their
//! parameter types.

// Error types
pub use crate::error::{Error, Result, RetCode};

// Ranges
pub use crate::range::{collect, Computed, IndexRange, OutputRange};

// Traits
pub use crate::traits::SeriesElement;

// Unstable-period configuration
pub use crate::unstable::{
    set_all_unstable_periods, set_unstable_period, unstable_period, FuncUnstId, UnstablePeriods,
};

// Parameter types
pub use crate::indicators::{BollingerBands, MaType, MathOperator, MathTransform};

// Indicator functions
pub use crate::indicators::{
    bbands_into, correl_into, dema_in_place, dema_into, ema_in_place, ema_into, kama_in_place,
    kama_into, linearreg_angle_into, linearreg_in_place, linearreg_intercept_into, linearreg_into,
    linearreg_slope_into, ma_in_place, ma_into, max_in_place, max_index_into, max_into,
    midpoint_in_place, midpoint_into, midprice_into, min_in_place, min_index_into, min_into,
    min_max_index_into, min_max_into, operator_into, rsi_in_place, rsi_into, sma_in_place,
    sma_into, stddev_in_place, stddev_into, sum_in_place, sum_into, t3_in_place, t3_into,
    tema_in_place, tema_into, transform_in_place, transform_into, trima_in_place, trima_into,
    tsf_in_place, tsf_into, var_in_place, var_into, willr_into, wma_in_place, wma_into,
};

// Lookback functions
pub use crate::indicators::{
    bbands_lookback, correl_lookback, dema_lookback, ema_lookback, kama_lookback,
    linearreg_lookback, ma_lookback, max_lookback, midpoint_lookback, midprice_lookback,
    min_lookback, operator_lookback, rsi_lookback, sma_lookback, stddev_lookback, sum_lookback,
    t3_lookback, tema_lookback, transform_lookback, trima_lookback, var_lookback, willr_lookback,
    wma_lookback,
};

// Lookback functions over an explicit unstable-period table
pub use crate::indicators::{
    bbands_lookback_with, dema_lookback_with, ema_lookback_with, kama_lookback_with,
    ma_lookback_with, rsi_lookback_with, t3_lookback_with, tema_lookback_with,
};
