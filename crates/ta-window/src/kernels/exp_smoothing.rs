//! Exponential recurrence, single layer and cascaded.
//!
//! # Algorithm
//!
//! A layer averages its first `period` inputs to seed the accumulator, then
//! applies `acc = acc + k * (x - acc)` with `k = 2 / (period + 1)` to every
//! later input.
//!
//! A cascade of `N` layers feeds each layer's fresh output into the next one
//! within the same step, so layer `n` starts emitting once layer `n - 1` has
//! emitted `period` values. The whole cascade therefore needs
//! `N * (period - 1)` warm-up samples before its last layer emits. DEMA, TEMA
//! and T3 are linear combinations of the layers of one cascade.
//!
//! # Example
//!
//! ```
//! use ta_window::kernels::exp_smoothing::ExpLayer;
//!
//! let mut ema = ExpLayer::<f64>::new(3).unwrap();
//! assert_eq!(ema.push(1.0), None);
//! assert_eq!(ema.push(2.0), None);
//! assert_eq!(ema.push(3.0), Some(2.0));
//! // k = 0.5
//! assert_eq!(ema.push(6.0), Some(4.0));
//! ```

use crate::error::Result;
use crate::kernels::WindowKernel;
use crate::traits::SeriesElement;

/// One exponential smoothing layer.
#[derive(Debug, Clone, Copy)]
pub struct ExpLayer<T> {
    period: usize,
    k: T,
    divisor: T,
    seen: usize,
    acc: T,
}

impl<T: SeriesElement> ExpLayer<T> {
    /// Layer with the standard smoothing factor `2 / (period + 1)` (`period >= 1`).
    ///
    /// # Errors
    ///
    /// Returns `Error::NumericConversion` if `period` cannot be represented in `T`.
    pub fn new(period: usize) -> Result<Self> {
        let divisor = T::from_usize(period)?;
        Ok(Self {
            period,
            k: T::two() / (divisor + T::one()),
            divisor,
            seen: 0,
            acc: T::zero(),
        })
    }

    /// Returns the window used for the seed average.
    #[must_use]
    pub const fn period(&self) -> usize {
        self.period
    }

    /// Feeds one input; returns the smoothed value once the seed is complete.
    #[inline]
    pub fn push(&mut self, x: T) -> Option<T> {
        if self.seen < self.period {
            self.acc = self.acc + x;
            self.seen += 1;
            if self.seen < self.period {
                return None;
            }
            self.acc = self.acc / self.divisor;
        } else {
            self.acc = self.acc + self.k * (x - self.acc);
        }
        Some(self.acc)
    }

    /// Returns the current accumulator.
    #[inline]
    #[must_use]
    pub const fn value(&self) -> T {
        self.acc
    }
}

impl<T: SeriesElement> WindowKernel<[T]> for ExpLayer<T> {
    type Output = T;

    #[inline]
    fn warmup(&self) -> usize {
        self.period.saturating_sub(1)
    }

    #[inline]
    fn seed(&mut self, input: &[T], idx: usize) {
        let _ = self.push(input[idx]);
    }

    #[inline]
    fn step(&mut self, input: &[T], idx: usize) -> T {
        self.push(input[idx]).unwrap_or(self.acc)
    }
}

/// `N` exponential layers in series; emits every layer's output per step.
///
/// `out[0]` is the EMA of the input, `out[1]` the EMA of `out[0]`, and so on.
#[derive(Debug, Clone, Copy)]
pub struct ExpCascade<T, const N: usize> {
    layers: [ExpLayer<T>; N],
}

impl<T: SeriesElement, const N: usize> ExpCascade<T, N> {
    /// `N` layers of the same period.
    ///
    /// # Errors
    ///
    /// Returns `Error::NumericConversion` if `period` cannot be represented in `T`.
    pub fn new(period: usize) -> Result<Self> {
        let layer = ExpLayer::new(period)?;
        Ok(Self { layers: [layer; N] })
    }

    /// Feeds one input through every layer.
    ///
    /// Returns `None` until the last layer has completed its seed.
    #[inline]
    pub fn push(&mut self, x: T) -> Option<[T; N]> {
        let mut out = [T::zero(); N];
        let mut value = x;
        for (layer, slot) in self.layers.iter_mut().zip(out.iter_mut()) {
            value = layer.push(value)?;
            *slot = value;
        }
        Some(out)
    }
}

impl<T: SeriesElement, const N: usize> WindowKernel<[T]> for ExpCascade<T, N> {
    type Output = [T; N];

    #[inline]
    fn warmup(&self) -> usize {
        self.layers
            .iter()
            .fold(0, |acc: usize, layer| acc.saturating_add(layer.period.saturating_sub(1)))
    }

    #[inline]
    fn seed(&mut self, input: &[T], idx: usize) {
        let _ = self.push(input[idx]);
    }

    #[inline]
    fn step(&mut self, input: &[T], idx: usize) -> [T; N] {
        self.push(input[idx])
            .unwrap_or_else(|| self.layers.map(|layer| layer.value()))
    }
}
