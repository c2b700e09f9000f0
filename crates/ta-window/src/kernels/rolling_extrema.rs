//! Rolling highest/lowest value with index tracking.
//!
//! # Algorithm
//!
//! The kernel remembers the index and value of the current extremum. A new
//! sample replaces it when it is at least as extreme, so ties resolve to the
//! most recent index. Only when the remembered index falls out of the window
//! is the window rescanned, again preferring the most recent index on ties.
//!
//! Every read stays inside `[idx - period + 1, idx]`, which keeps the kernel
//! safe to drive in place.
//!
//! # Complexity
//!
//! - Time: O(1) amortized per step for trending data, O(period) on a rescan
//! - Space: O(1)
//!
//! # Example
//!
//! ```
//! use ta_window::kernels::rolling_extrema::{Extremum, RollingExtremum};
//!
//! let data = [5.0_f64, 3.0, 8.0, 1.0, 2.0];
//! let mut highest = RollingExtremum::new(3, Extremum::Highest);
//!
//! assert_eq!(highest.update(&data, 2), (2, 8.0));
//! assert_eq!(highest.update(&data, 3), (2, 8.0));
//! assert_eq!(highest.update(&data, 4), (2, 8.0));
//! ```

use crate::kernels::WindowKernel;
use crate::traits::SeriesElement;

/// Which end of the window to track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Extremum {
    /// Largest value in the window.
    Highest,
    /// Smallest value in the window.
    Lowest,
}

impl Extremum {
    /// Returns true if `candidate` should replace `current`.
    #[inline]
    fn prefers<T: PartialOrd>(self, candidate: T, current: T) -> bool {
        match self {
            Self::Highest => candidate >= current,
            Self::Lowest => candidate <= current,
        }
    }
}

/// Rolling extremum over `period` samples; emits `(index, value)`.
#[derive(Debug, Clone)]
pub struct RollingExtremum<T> {
    period: usize,
    kind: Extremum,
    best: Option<(usize, T)>,
}

impl<T: SeriesElement> RollingExtremum<T> {
    /// Tracks the `kind` extremum over windows of `period` samples (`period >= 1`).
    #[must_use]
    pub const fn new(period: usize, kind: Extremum) -> Self {
        Self {
            period,
            kind,
            best: None,
        }
    }

    /// Returns the window size.
    #[must_use]
    pub const fn period(&self) -> usize {
        self.period
    }

    /// Advances the window of `series` to end at `idx` and returns the
    /// extremum's index and value.
    ///
    /// Calls must be made for consecutive `idx`, with `idx >= period - 1`.
    #[inline]
    pub fn update(&mut self, series: &[T], idx: usize) -> (usize, T) {
        let trailing = idx + 1 - self.period;
        let value = series[idx];

        let best = match self.best {
            Some((at, current)) if at >= trailing => {
                if self.kind.prefers(value, current) {
                    (idx, value)
                } else {
                    (at, current)
                }
            }
            _ => self.rescan(series, trailing, idx),
        };

        self.best = Some(best);
        best
    }

    fn rescan(&self, series: &[T], from: usize, to: usize) -> (usize, T) {
        let mut best = (from, series[from]);
        for (at, &value) in series.iter().enumerate().take(to + 1).skip(from + 1) {
            if self.kind.prefers(value, best.1) {
                best = (at, value);
            }
        }
        best
    }
}

impl<T: SeriesElement> WindowKernel<[T]> for RollingExtremum<T> {
    type Output = (usize, T);

    #[inline]
    fn warmup(&self) -> usize {
        self.period.saturating_sub(1)
    }

    #[inline]
    fn seed(&mut self, _input: &[T], _idx: usize) {}

    #[inline]
    fn step(&mut self, input: &[T], idx: usize) -> (usize, T) {
        self.update(input, idx)
    }
}
