//! ta-window: range-validated, lookback-aware technical analysis indicators
//!
//! Every indicator in this crate computes over a caller-chosen index range of
//! its inputs and writes a densely packed output, reporting the exact input
//! index the first output value belongs to.
//!
//! # Features
//!
//! - **One engine**: each indicator is a small seed/step kernel run by the
//!   same windowed recurrence driver
//! - **Lookback queries**: `*_lookback` tells callers how many leading samples
//!   an indicator consumes, unstable settling period included
//! - **In-place**: single-series indicators can overwrite their input
//! - **Generics**: works with both `f32` and `f64` data types
//! - **No panics**: malformed ranges and parameters are returned as errors
//!
//! # Quick Start
//!
//! ```
//! use ta_window::prelude::*;
//!
//! let data = [1.0_f64, 2.0, 3.0, 4.0, 5.0];
//! let mut out = [0.0; 5];
//!
//! let range = sma_into(.., &data, 3, &mut out).unwrap();
//!
//! // out[0] is the SMA at input index 2
//! assert_eq!(range.begin(), 2);
//! assert_eq!(&out[..range.len()], &[2.0, 3.0, 4.0]);
//! ```
//!
//! # Ranges and Lookback
//!
//! A call asks for the closed range `[start, end]`. The first value is
//! written for `max(start, lookback)`, and `out[k]` belongs to input index
//! `begin + k`:
//!
//! ```
//! use ta_window::prelude::*;
//!
//! let data: Vec<f64> = (0..10).map(f64::from).collect();
//! let mut out = [0.0; 10];
//!
//! let range = max_into(1..=6, &data, 4, &mut out).unwrap();
//! assert_eq!(range.begin(), 3);
//! assert_eq!(range.end(), Some(6));
//! assert_eq!(&out[..range.len()], &[3.0, 4.0, 5.0, 6.0]);
//! ```
//!
//! # Error Handling
//!
//! Range problems are reported before parameter problems, and nothing is
//! written when either is found. [`RetCode`] condenses an outcome into the
//! three-way status used by callers that only need a code:
//!
//! ```
//! use ta_window::prelude::*;
//!
//! let data = [1.0_f64, 2.0, 3.0];
//! let mut out = [0.0; 3];
//!
//! assert_eq!(RetCode::of(&sma_into(0..=5, &data, 2, &mut out)), RetCode::OutOfRangeParam);
//! assert_eq!(RetCode::of(&sma_into(.., &data, 1, &mut out)), RetCode::BadParam);
//!
//! // Too little data is not an error
//! let range = sma_into(.., &data, 30, &mut out).unwrap();
//! assert!(range.is_empty());
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::perf)]
#![warn(clippy::nursery)]
#![warn(clippy::needless_collect)]
#![warn(clippy::or_fun_call)]
#![warn(clippy::inefficient_to_string)]
#![warn(clippy::useless_conversion)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod indicators;
pub mod kernels;
pub mod lookback;
pub mod prelude;
pub mod range;
pub mod traits;
pub mod unstable;

// Re-export commonly used types at crate root
pub use error::{Error, Result, RetCode};
pub use range::{collect, IndexRange, OutputRange};
pub use traits::SeriesElement;
pub use unstable::{FuncUnstId, UnstablePeriods};
