//! Core numeric trait for ta-window series.
//!
//! [`SeriesElement`] abstracts over `f32` and `f64` so every kernel and
//! indicator is written once. It also carries the library-wide zero
//! denominator policy through [`SeriesElement::ratio_or_zero`].
//!
//! # Example
//!
//! ```
//! use ta_window::traits::SeriesElement;
//!
//! fn mean<T: SeriesElement>(data: &[T]) -> ta_window::Result<T> {
//!     let n = T::from_usize(data.len())?;
//!     let sum = data.iter().fold(T::zero(), |acc, &x| acc + x);
//!     Ok(sum.ratio_or_zero(n))
//! }
//!
//! assert!((mean(&[1.0_f64, 2.0, 3.0]).unwrap() - 2.0).abs() < 1e-12);
//! assert_eq!(mean::<f64>(&[]).unwrap(), 0.0);
//! ```

use num_traits::{Float, NumCast};

use crate::error::{Error, Result};

/// A trait for types that can be used as elements in a data series.
///
/// The trait requires:
/// - `Float`: Standard floating-point operations
/// - `NumCast`: Conversion from periods and factors
/// - `Copy` + `Default`: cheap value semantics
/// - `Send` + `Sync`: series can be shared across threads by the caller
pub trait SeriesElement: Float + NumCast + Copy + Default + Send + Sync + 'static {
    /// Creates a series element from a `usize` value.
    ///
    /// # Errors
    ///
    /// Returns `Error::NumericConversion` if the value cannot be represented in this type.
    #[inline]
    fn from_usize(value: usize) -> Result<Self> {
        <Self as NumCast>::from(value).ok_or(Error::NumericConversion {
            context: "usize to series element",
        })
    }

    /// Creates a series element from an `f64` value.
    ///
    /// # Errors
    ///
    /// Returns `Error::NumericConversion` if the value cannot be represented in this type.
    #[inline]
    fn from_f64(value: f64) -> Result<Self> {
        <Self as NumCast>::from(value).ok_or(Error::NumericConversion {
            context: "f64 to series element",
        })
    }

    /// Returns the constant 2 as this type.
    ///
    /// Used for the exponential smoothing factor `k = 2 / (period + 1)`.
    #[inline]
    #[must_use]
    fn two() -> Self {
        Self::one() + Self::one()
    }

    /// Returns the constant 100 as this type.
    #[inline]
    #[must_use]
    fn hundred() -> Self {
        // 100 is exactly representable in every Float type
        <Self as NumCast>::from(100).unwrap_or_else(Self::nan)
    }

    /// Divides `self` by `denom`, returning zero when `denom` is exactly zero.
    ///
    /// This is the only division policy kernels apply to emitted samples: a
    /// degenerate window produces `0` for that sample and computation continues.
    #[inline]
    #[must_use]
    fn ratio_or_zero(self, denom: Self) -> Self {
        if denom == Self::zero() {
            Self::zero()
        } else {
            self / denom
        }
    }
}

// Blanket implementation for all types that satisfy the bounds
impl<T: Float + NumCast + Copy + Default + Send + Sync + 'static> SeriesElement for T {}
