//! Rolling moment sums: variance, paired correlation and linear regression.
//!
//! # Algorithm
//!
//! Each kernel keeps raw power sums over the window and evaluates a closed
//! form per step:
//!
//! ```text
//! variance    = Σx²/n - (Σx/n)²
//! correlation = (Σxy - ΣxΣy/n) / sqrt((Σx² - (Σx)²/n) * (Σy² - (Σy)²/n))
//! slope       = (nΣxy - ΣxΣy) / (nΣx² - (Σx)²),   x = 0..n-1
//! ```
//!
//! A correlation whose denominator is not positive is reported as zero.
//! Each kernel also counts how many equal samples end the window: once a
//! whole window is constant, the variance, the correlation and the slope are
//! exactly zero whatever residue the running sums carry from earlier motion.
//! As with the rolling sums, the trailing sample leaves the sums after the
//! step's value has been computed.

use num_traits::Float;

use crate::error::Result;
use crate::kernels::{Paired, WindowKernel};
use crate::traits::SeriesElement;

/// Length of the run of equal samples ending at the newest one.
#[derive(Debug, Clone, Copy)]
struct FlatRun<T> {
    last: Option<T>,
    run: usize,
}

impl<T: SeriesElement> FlatRun<T> {
    const fn new() -> Self {
        Self { last: None, run: 0 }
    }

    #[inline]
    fn push(&mut self, x: T) {
        self.run = if self.last == Some(x) {
            self.run.saturating_add(1)
        } else {
            1
        };
        self.last = Some(x);
    }

    /// Whether the newest `period` samples are all equal.
    #[inline]
    const fn covers(&self, period: usize) -> bool {
        self.run >= period
    }
}

/// Rolling population variance.
#[derive(Debug, Clone)]
pub struct RunningMoments<T> {
    period: usize,
    n: T,
    sum: T,
    sum_sq: T,
    flat: FlatRun<T>,
}

impl<T: SeriesElement> RunningMoments<T> {
    /// Variance over windows of `period` samples (`period >= 1`).
    ///
    /// # Errors
    ///
    /// Returns `Error::NumericConversion` if `period` cannot be represented in `T`.
    pub fn new(period: usize) -> Result<Self> {
        Ok(Self {
            period,
            n: T::from_usize(period)?,
            sum: T::zero(),
            sum_sq: T::zero(),
            flat: FlatRun::new(),
        })
    }
}

impl<T: SeriesElement> WindowKernel<[T]> for RunningMoments<T> {
    type Output = T;

    #[inline]
    fn warmup(&self) -> usize {
        self.period.saturating_sub(1)
    }

    #[inline]
    fn seed(&mut self, input: &[T], idx: usize) {
        let x = input[idx];
        self.sum = self.sum + x;
        self.sum_sq = self.sum_sq + x * x;
        self.flat.push(x);
    }

    #[inline]
    fn step(&mut self, input: &[T], idx: usize) -> T {
        self.seed(input, idx);

        let variance = if self.flat.covers(self.period) {
            T::zero()
        } else {
            let mean = self.sum / self.n;
            Float::max(self.sum_sq / self.n - mean * mean, T::zero())
        };

        let trailing = input[idx + 1 - self.period];
        self.sum = self.sum - trailing;
        self.sum_sq = self.sum_sq - trailing * trailing;
        variance
    }
}

/// Rolling Pearson correlation of two aligned series.
#[derive(Debug, Clone)]
pub struct PairedMoments<T> {
    period: usize,
    n: T,
    sum_x: T,
    sum_y: T,
    sum_xx: T,
    sum_yy: T,
    sum_xy: T,
    flat_x: FlatRun<T>,
    flat_y: FlatRun<T>,
}

impl<T: SeriesElement> PairedMoments<T> {
    /// Correlation over windows of `period` samples (`period >= 1`).
    ///
    /// # Errors
    ///
    /// Returns `Error::NumericConversion` if `period` cannot be represented in `T`.
    pub fn new(period: usize) -> Result<Self> {
        Ok(Self {
            period,
            n: T::from_usize(period)?,
            sum_x: T::zero(),
            sum_y: T::zero(),
            sum_xx: T::zero(),
            sum_yy: T::zero(),
            sum_xy: T::zero(),
            flat_x: FlatRun::new(),
            flat_y: FlatRun::new(),
        })
    }

    #[inline]
    fn degenerate(&self) -> bool {
        self.flat_x.covers(self.period) || self.flat_y.covers(self.period)
    }

    #[inline]
    fn add(&mut self, x: T, y: T) {
        self.sum_x = self.sum_x + x;
        self.sum_y = self.sum_y + y;
        self.sum_xx = self.sum_xx + x * x;
        self.sum_yy = self.sum_yy + y * y;
        self.sum_xy = self.sum_xy + x * y;
        self.flat_x.push(x);
        self.flat_y.push(y);
    }

    #[inline]
    fn remove(&mut self, x: T, y: T) {
        self.sum_x = self.sum_x - x;
        self.sum_y = self.sum_y - y;
        self.sum_xx = self.sum_xx - x * x;
        self.sum_yy = self.sum_yy - y * y;
        self.sum_xy = self.sum_xy - x * y;
    }
}

impl<'a, T: SeriesElement> WindowKernel<Paired<'a, T>> for PairedMoments<T> {
    type Output = T;

    #[inline]
    fn warmup(&self) -> usize {
        self.period.saturating_sub(1)
    }

    #[inline]
    fn seed(&mut self, input: &Paired<'a, T>, idx: usize) {
        self.add(input.x[idx], input.y[idx]);
    }

    #[inline]
    fn step(&mut self, input: &Paired<'a, T>, idx: usize) -> T {
        self.add(input.x[idx], input.y[idx]);

        let spread_x = self.sum_xx - self.sum_x * self.sum_x / self.n;
        let spread_y = self.sum_yy - self.sum_y * self.sum_y / self.n;
        let denom = spread_x * spread_y;
        let correlation = if denom > T::zero() && !self.degenerate() {
            (self.sum_xy - self.sum_x * self.sum_y / self.n) / Float::sqrt(denom)
        } else {
            T::zero()
        };

        let trailing = idx + 1 - self.period;
        self.remove(input.x[trailing], input.y[trailing]);
        correlation
    }
}

/// Least-squares line through one window, `x = 0` at the oldest sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineFit<T> {
    /// Change per sample.
    pub slope: T,
    /// Fitted value at the oldest sample of the window.
    pub intercept: T,
    /// `x` of the newest sample, `period - 1`.
    pub last_x: T,
}

impl<T: SeriesElement> LineFit<T> {
    /// Fitted value at the newest sample.
    #[inline]
    #[must_use]
    pub fn at_end(&self) -> T {
        self.intercept + self.slope * self.last_x
    }

    /// Fitted value one sample past the window.
    #[inline]
    #[must_use]
    pub fn forecast(&self) -> T {
        self.intercept + self.slope * (self.last_x + T::one())
    }

    /// Slope expressed as an angle in degrees.
    #[inline]
    #[must_use]
    pub fn angle_degrees(&self) -> T {
        Float::to_degrees(Float::atan(self.slope))
    }
}

/// Rolling least-squares regression of the window against its position.
#[derive(Debug, Clone)]
pub struct RegressionSums<T> {
    period: usize,
    n: T,
    last_x: T,
    sum_x: T,
    divisor: T,
    next_x: T,
    sum_y: T,
    sum_xy: T,
    flat: FlatRun<T>,
}

impl<T: SeriesElement> RegressionSums<T> {
    /// Regression over windows of `period` samples (`period >= 2`).
    ///
    /// # Errors
    ///
    /// Returns `Error::NumericConversion` if the position sums cannot be
    /// represented in `T`.
    pub fn new(period: usize) -> Result<Self> {
        let n = T::from_usize(period)?;
        let last_x = n - T::one();
        // Σx and Σx² over x = 0..n-1
        let sum_x = n * last_x / T::two();
        let sum_xx = sum_x * (n + last_x) / T::from_usize(3)?;
        Ok(Self {
            period,
            n,
            last_x,
            sum_x,
            divisor: n * sum_xx - sum_x * sum_x,
            next_x: T::zero(),
            sum_y: T::zero(),
            sum_xy: T::zero(),
            flat: FlatRun::new(),
        })
    }
}

impl<T: SeriesElement> WindowKernel<[T]> for RegressionSums<T> {
    type Output = LineFit<T>;

    #[inline]
    fn warmup(&self) -> usize {
        self.period.saturating_sub(1)
    }

    #[inline]
    fn seed(&mut self, input: &[T], idx: usize) {
        let y = input[idx];
        self.sum_y = self.sum_y + y;
        self.sum_xy = self.sum_xy + self.next_x * y;
        self.next_x = self.next_x + T::one();
        self.flat.push(y);
    }

    #[inline]
    fn step(&mut self, input: &[T], idx: usize) -> LineFit<T> {
        let y = input[idx];
        self.sum_y = self.sum_y + y;
        self.sum_xy = self.sum_xy + self.last_x * y;
        self.flat.push(y);

        let (slope, intercept) = if self.flat.covers(self.period) {
            (T::zero(), y)
        } else {
            let slope = (self.n * self.sum_xy - self.sum_x * self.sum_y) / self.divisor;
            (slope, (self.sum_y - slope * self.sum_x) / self.n)
        };

        // Slide: the oldest sample sat at x = 0, every other one moves down by one
        self.sum_y = self.sum_y - input[idx + 1 - self.period];
        self.sum_xy = self.sum_xy - self.sum_y;

        LineFit {
            slope,
            intercept,
            last_x: self.last_x,
        }
    }
}
