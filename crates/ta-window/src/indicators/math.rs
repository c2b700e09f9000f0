//! Element-wise math transforms and operators.
//!
//! These have a lookback of zero: output `i` depends on input `i` only.
//! Values outside a function's domain (`ln` of a negative number, `asin`
//! of 2) follow IEEE semantics and produce NaN; division by zero in
//! [`MathOperator::Div`] yields `0`.
//!
//! # Example
//!
//! ```
//! use ta_window::indicators::math::{operator_into, transform_into, MathOperator, MathTransform};
//!
//! let data = [1.0_f64, 4.0, 9.0];
//! let mut out = [0.0; 3];
//! transform_into(.., &data, MathTransform::Sqrt, &mut out).unwrap();
//! assert_eq!(out, [1.0, 2.0, 3.0]);
//!
//! let divisor = [2.0_f64, 0.0, 3.0];
//! operator_into(.., &data, &divisor, MathOperator::Div, &mut out).unwrap();
//! assert_eq!(out, [0.5, 0.0, 3.0]);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::indicators::Series;
use crate::kernels::{drive, Map, Paired, Split, WindowKernel};
use crate::range::{validate_range, IndexRange, OutputRange};
use crate::traits::SeriesElement;

/// Unary function applied to every sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MathTransform {
    /// Arc cosine.
    Acos,
    /// Arc sine.
    Asin,
    /// Arc tangent.
    Atan,
    /// Smallest integer not less than the sample.
    Ceil,
    /// Cosine.
    Cos,
    /// Hyperbolic cosine.
    Cosh,
    /// Exponential.
    Exp,
    /// Largest integer not greater than the sample.
    Floor,
    /// Natural logarithm.
    Ln,
    /// Base-10 logarithm.
    Log10,
    /// Sine.
    Sin,
    /// Hyperbolic sine.
    Sinh,
    /// Square root.
    Sqrt,
    /// Tangent.
    Tan,
    /// Hyperbolic tangent.
    Tanh,
}

impl MathTransform {
    /// Applies the transform to one value.
    #[must_use]
    pub fn apply<T: SeriesElement>(self, x: T) -> T {
        match self {
            Self::Acos => x.acos(),
            Self::Asin => x.asin(),
            Self::Atan => x.atan(),
            Self::Ceil => x.ceil(),
            Self::Cos => x.cos(),
            Self::Cosh => x.cosh(),
            Self::Exp => x.exp(),
            Self::Floor => x.floor(),
            Self::Ln => x.ln(),
            Self::Log10 => x.log10(),
            Self::Sin => x.sin(),
            Self::Sinh => x.sinh(),
            Self::Sqrt => x.sqrt(),
            Self::Tan => x.tan(),
            Self::Tanh => x.tanh(),
        }
    }
}

/// Binary operator applied to two aligned series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MathOperator {
    /// `a + b`
    Add,
    /// `a - b`
    Sub,
    /// `a × b`
    Mult,
    /// `a / b`, or `0` when `b` is zero.
    Div,
}

impl MathOperator {
    /// Applies the operator to one pair of values.
    #[must_use]
    pub fn apply<T: SeriesElement>(self, a: T, b: T) -> T {
        match self {
            Self::Add => a + b,
            Self::Sub => a - b,
            Self::Mult => a * b,
            Self::Div => a.ratio_or_zero(b),
        }
    }
}

/// Returns the lookback of any transform: always `Some(0)`.
#[inline]
#[must_use]
pub const fn transform_lookback(_transform: MathTransform) -> Option<usize> {
    Some(0)
}

/// Returns the lookback of any operator: always `Some(0)`.
#[inline]
#[must_use]
pub const fn operator_lookback(_operator: MathOperator) -> Option<usize> {
    Some(0)
}

/// Applies `transform` to every sample of `data` in `range`, writing into `output`.
///
/// # Errors
///
/// - `Error::EmptyInput` / `Error::OutOfRange` if `range` is not covered by `data`
/// - `Error::BufferTooSmall` if `output` cannot hold the result
pub fn transform_into<T: SeriesElement>(
    range: impl Into<IndexRange>,
    data: &[T],
    transform: MathTransform,
    output: &mut [T],
) -> Result<OutputRange> {
    transform_with(range, Series::Split(data, output), transform)
}

/// Applies `transform` to every sample of `buffer` in `range`, in place.
///
/// # Errors
///
/// Same as [`transform_into`].
pub fn transform_in_place<T: SeriesElement>(
    range: impl Into<IndexRange>,
    buffer: &mut [T],
    transform: MathTransform,
) -> Result<OutputRange> {
    transform_with(range, Series::InPlace(buffer), transform)
}

fn transform_with<T: SeriesElement>(
    range: impl Into<IndexRange>,
    series: Series<'_, T>,
    transform: MathTransform,
) -> Result<OutputRange> {
    let range = series.validate(range)?;
    let mut kernel = Map(move |x: T| transform.apply(x));
    series.run(&mut kernel, range, 0)
}

struct Combine(MathOperator);

impl<'a, T: SeriesElement> WindowKernel<Paired<'a, T>> for Combine {
    type Output = T;

    fn warmup(&self) -> usize {
        0
    }

    fn seed(&mut self, _input: &Paired<'a, T>, _idx: usize) {}

    #[inline]
    fn step(&mut self, input: &Paired<'a, T>, idx: usize) -> T {
        self.0.apply(input.x[idx], input.y[idx])
    }
}

/// Combines `a` and `b` sample by sample with `operator` over `range`,
/// writing into `output`.
///
/// # Errors
///
/// - `Error::EmptyInput` / `Error::OutOfRange` if `range` is not covered by both inputs
/// - `Error::BufferTooSmall` if `output` cannot hold the result
pub fn operator_into<T: SeriesElement>(
    range: impl Into<IndexRange>,
    a: &[T],
    b: &[T],
    operator: MathOperator,
    output: &mut [T],
) -> Result<OutputRange> {
    let range = validate_range(range, &[a.len(), b.len()])?;
    let input = Paired { x: a, y: b };
    drive(&mut Combine(operator), &mut Split::new(&input, output), range, 0)
}
