//! Rolling sums over a fixed window: plain, linearly weighted and triangular.
//!
//! # Algorithm
//!
//! Each kernel keeps partial sums that exclude the sample about to enter the
//! window. A step adds the leading sample, emits, and only then subtracts the
//! trailing sample that leaves with the next step. Because the trailing
//! sample is read before the value for this step is stored, the kernels are
//! safe to drive in place.
//!
//! - [`RollingSum`]: `Σ x` over the window, optionally divided by the period
//! - [`WeightedSum`]: weights `1..=period`, newest heaviest
//! - [`TriangularSum`]: weights rising to the middle of the window and
//!   falling again, tracked with two offset partial sums
//!
//! # Complexity
//!
//! O(1) per step for all three; the triangular kernel computes its first
//! window directly, in O(period²) once.

use crate::error::Result;
use crate::kernels::WindowKernel;
use crate::traits::SeriesElement;

/// Rolling sum over `period` samples, divided by a constant.
///
/// With divisor one this is a moving sum; with the period as divisor it is
/// the simple moving average.
#[derive(Debug, Clone)]
pub struct RollingSum<T> {
    period: usize,
    divisor: T,
    sum: T,
}

impl<T: SeriesElement> RollingSum<T> {
    /// Moving sum over `period` samples (`period >= 1`).
    #[must_use]
    pub fn new(period: usize) -> Self {
        Self {
            period,
            divisor: T::one(),
            sum: T::zero(),
        }
    }

    /// Moving average over `period` samples (`period >= 1`).
    ///
    /// # Errors
    ///
    /// Returns `Error::NumericConversion` if `period` cannot be represented in `T`.
    pub fn mean(period: usize) -> Result<Self> {
        Ok(Self {
            period,
            divisor: T::from_usize(period)?,
            sum: T::zero(),
        })
    }
}

impl<T: SeriesElement> WindowKernel<[T]> for RollingSum<T> {
    type Output = T;

    #[inline]
    fn warmup(&self) -> usize {
        self.period.saturating_sub(1)
    }

    #[inline]
    fn seed(&mut self, input: &[T], idx: usize) {
        self.sum = self.sum + input[idx];
    }

    #[inline]
    fn step(&mut self, input: &[T], idx: usize) -> T {
        self.sum = self.sum + input[idx];
        let value = self.sum / self.divisor;
        self.sum = self.sum - input[idx + 1 - self.period];
        value
    }
}

/// Linearly weighted rolling sum: the newest sample weighs `period`, the
/// oldest weighs one, and the total is divided by `period * (period + 1) / 2`.
#[derive(Debug, Clone)]
pub struct WeightedSum<T> {
    period: usize,
    top_weight: T,
    divisor: T,
    next_weight: T,
    weighted: T,
    plain: T,
}

impl<T: SeriesElement> WeightedSum<T> {
    /// Weighted moving average over `period` samples (`period >= 1`).
    ///
    /// # Errors
    ///
    /// Returns `Error::NumericConversion` if the weights cannot be represented in `T`.
    pub fn new(period: usize) -> Result<Self> {
        let top_weight = T::from_usize(period)?;
        Ok(Self {
            period,
            top_weight,
            divisor: top_weight * (top_weight + T::one()) / T::two(),
            next_weight: T::one(),
            weighted: T::zero(),
            plain: T::zero(),
        })
    }
}

impl<T: SeriesElement> WindowKernel<[T]> for WeightedSum<T> {
    type Output = T;

    #[inline]
    fn warmup(&self) -> usize {
        self.period.saturating_sub(1)
    }

    #[inline]
    fn seed(&mut self, input: &[T], idx: usize) {
        let x = input[idx];
        self.weighted = self.weighted + x * self.next_weight;
        self.plain = self.plain + x;
        self.next_weight = self.next_weight + T::one();
    }

    #[inline]
    fn step(&mut self, input: &[T], idx: usize) -> T {
        let x = input[idx];
        self.plain = self.plain + x;
        self.weighted = self.weighted + x * self.top_weight;
        let value = self.weighted / self.divisor;

        // Every remaining weight drops by one; the oldest sample reaches zero
        self.weighted = self.weighted - self.plain;
        self.plain = self.plain - input[idx + 1 - self.period];
        value
    }
}

/// Triangular rolling sum, the SMA of an SMA.
///
/// For period `p` the inner window is `a` samples and the outer `b`, with
/// `a = b = (p + 1) / 2` for odd `p` and `a = p / 2 + 1`, `b = p / 2` for
/// even `p`. The emitted value is `Σ A(k) / (a * b)` over the last `b`
/// inner sums `A(k)`.
///
/// Between steps the kernel holds the sum of the `b - 1` most recent inner
/// sums (`weighted`), the inner sum missing its leading sample (`lead`), and
/// the `a - 1` samples that form the inner sum about to leave (`tail`).
#[derive(Debug, Clone)]
pub struct TriangularSum<T> {
    period: usize,
    inner: usize,
    outer: usize,
    divisor: T,
    lead: T,
    tail: T,
    weighted: T,
    primed: bool,
}

impl<T: SeriesElement> TriangularSum<T> {
    /// Triangular moving average over `period` samples (`period >= 2`).
    ///
    /// # Errors
    ///
    /// Returns `Error::NumericConversion` if the divisor cannot be represented in `T`.
    pub fn new(period: usize) -> Result<Self> {
        let (inner, outer) = if period % 2 == 1 {
            (period / 2 + 1, period / 2 + 1)
        } else {
            (period / 2 + 1, period / 2)
        };
        Ok(Self {
            period,
            inner,
            outer,
            divisor: T::from_usize(inner)? * T::from_usize(outer)?,
            lead: T::zero(),
            tail: T::zero(),
            weighted: T::zero(),
            primed: false,
        })
    }

    /// Builds the partial sums for the first full window ending at `idx`.
    fn prime(&mut self, input: &[T], idx: usize) {
        let sum = |from: usize, to: usize| input[from..=to].iter().fold(T::zero(), |acc, &x| acc + x);

        self.lead = if self.inner > 1 {
            sum(idx + 1 - self.inner, idx - 1)
        } else {
            T::zero()
        };
        self.weighted = (1..self.outer).fold(T::zero(), |acc, j| {
            acc + sum(idx - j + 1 - self.inner, idx - j)
        });
        self.tail = sum(idx + 1 - self.period, idx - self.outer);
        self.primed = true;
    }
}

impl<T: SeriesElement> WindowKernel<[T]> for TriangularSum<T> {
    type Output = T;

    #[inline]
    fn warmup(&self) -> usize {
        self.period.saturating_sub(1)
    }

    #[inline]
    fn seed(&mut self, _input: &[T], _idx: usize) {}

    fn step(&mut self, input: &[T], idx: usize) -> T {
        if !self.primed {
            self.prime(input, idx);
        }

        self.lead = self.lead + input[idx];
        self.weighted = self.weighted + self.lead;
        let value = self.weighted / self.divisor;

        self.lead = self.lead - input[idx + 1 - self.inner];
        self.tail = self.tail + input[idx + 1 - self.outer];
        self.weighted = self.weighted - self.tail;
        self.tail = self.tail - input[idx + 1 - self.period];
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernels::{drive, Split};
    use crate::range::validate_range;

    fn run<K: WindowKernel<[f64], Output = f64>>(mut kernel: K, data: &[f64]) -> Vec<f64> {
        let mut out = vec![0.0; data.len()];
        let range = validate_range(.., &[data.len()]).unwrap();
        let lookback = kernel.warmup();
        let written = drive(&mut kernel, &mut Split::new(data, &mut out[..]), range, lookback).unwrap();
        out.truncate(written.len());
        out
    }

    fn naive_weighted(data: &[f64], weights: &[f64]) -> Vec<f64> {
        let total: f64 = weights.iter().sum();
        data.windows(weights.len())
            .map(|w| w.iter().zip(weights).map(|(x, k)| x * k).sum::<f64>() / total)
            .collect()
    }

    fn sample_series(n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0 + (i as f64 * 0.13).cos())
            .collect()
    }

    #[test]
    fn test_rolling_sum() {
        let out = run(RollingSum::new(3), &[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(out, vec![6.0, 9.0, 12.0]);
    }

    #[test]
    fn test_rolling_mean() {
        let out = run(RollingSum::mean(3).unwrap(), &[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(out, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_rolling_sum_period_one() {
        let out = run(RollingSum::new(1), &[4.0, 5.0, 6.0]);
        assert_eq!(out, vec![4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_weighted_sum_matches_naive() {
        let data = sample_series(60);
        for period in 1..=9 {
            let weights: Vec<f64> = (1..=period).map(|w| w as f64).collect();
            let expected = naive_weighted(&data, &weights);
            let out = run(WeightedSum::new(period).unwrap(), &data);
            assert_eq!(out.len(), expected.len());
            for (a, b) in out.iter().zip(&expected) {
                assert!((a - b).abs() < 1e-9, "period {period}: {a} vs {b}");
            }
        }
    }

    #[test]
    fn test_weighted_sum_known_value() {
        // (1*1 + 2*2 + 3*3) / 6
        let out = run(WeightedSum::new(3).unwrap(), &[1.0, 2.0, 3.0]);
        assert!((out[0] - 14.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_triangular_weights_odd_period() {
        // p = 5: weights 1 2 3 2 1
        let data = sample_series(40);
        let expected = naive_weighted(&data, &[1.0, 2.0, 3.0, 2.0, 1.0]);
        let out = run(TriangularSum::new(5).unwrap(), &data);
        for (a, b) in out.iter().zip(&expected) {
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn test_triangular_weights_even_period() {
        // p = 4: weights 1 2 2 1
        let data = sample_series(40);
        let expected = naive_weighted(&data, &[1.0, 2.0, 2.0, 1.0]);
        let out = run(TriangularSum::new(4).unwrap(), &data);
        assert_eq!(out.len(), expected.len());
        for (a, b) in out.iter().zip(&expected) {
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn test_triangular_period_two_is_pair_average() {
        let out = run(TriangularSum::new(2).unwrap(), &[2.0, 4.0, 8.0, 16.0]);
        assert_eq!(out, vec![3.0, 6.0, 12.0]);
    }

    #[test]
    fn test_triangular_matches_naive_across_periods() {
        let data = sample_series(80);
        for period in 2..=12_usize {
            let (a, b) = if period % 2 == 1 {
                ((period + 1) / 2, (period + 1) / 2)
            } else {
                (period / 2 + 1, period / 2)
            };
            // Weights of SMA(SMA(x, a), b)
            let mut weights = vec![0.0; period];
            for j in 0..b {
                for i in 0..a {
                    weights[i + j] += 1.0;
                }
            }
            let expected = naive_weighted(&data, &weights);
            let out = run(TriangularSum::new(period).unwrap(), &data);
            assert_eq!(out.len(), expected.len(), "period {period}");
            for (x, y) in out.iter().zip(&expected) {
                assert!((x - y).abs() < 1e-9, "period {period}: {x} vs {y}");
            }
        }
    }
}
