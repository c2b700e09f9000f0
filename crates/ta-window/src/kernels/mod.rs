//! Windowed recurrence engine and its reusable kernels.
//!
//! Every indicator in this crate is one instance of the same loop: skip to the
//! first sample the lookback allows, seed a small rolling state, then advance
//! it one sample at a time and emit one value per step. The loop lives in
//! [`drive`]; a formula only supplies a [`WindowKernel`] (seed, step and the
//! value each step emits).
//!
//! # Kernels
//!
//! - [`rolling_sum`]: plain, linearly weighted and triangular rolling sums
//! - [`rolling_extrema`]: rolling highest/lowest with index tracking
//! - [`exp_smoothing`]: exponential recurrence, single layer and cascades
//! - [`running_moments`]: rolling variance, paired moments, regression sums
//!
//! # Step order and aliasing
//!
//! For an output range starting at `begin` and a lookback `L`, the driver
//! seeds from input index `begin - L`. A kernel's `step` at index `i` may read
//! input indices in `[i - L, i]` only. The value for `i` is stored at output
//! offset `i - begin <= i - L`, strictly after `step` returned, so a later
//! step never reads a slot that was already overwritten. This is what lets
//! [`InPlace`] use one buffer as both input and output.
//!
//! # Example
//!
//! ```
//! use ta_window::kernels::{drive, rolling_sum::RollingSum, Split};
//! use ta_window::range::validate_range;
//!
//! let data = [1.0_f64, 2.0, 3.0, 4.0, 5.0];
//! let mut out = [0.0; 5];
//! let range = validate_range(.., &[data.len()]).unwrap();
//!
//! let mut kernel = RollingSum::new(3);
//! let written = drive(&mut kernel, &mut Split::new(&data[..], &mut out[..]), range, 2).unwrap();
//!
//! assert_eq!(written.begin(), 2);
//! assert_eq!(&out[..written.len()], &[6.0, 9.0, 12.0]);
//! ```

pub mod exp_smoothing;
pub mod rolling_extrema;
pub mod rolling_sum;
pub mod running_moments;

use crate::error::{Error, Result};
use crate::range::{OutputRange, ValidRange};

pub use exp_smoothing::{ExpCascade, ExpLayer};
pub use rolling_extrema::{Extremum, RollingExtremum};
pub use rolling_sum::{RollingSum, TriangularSum, WeightedSum};
pub use running_moments::{PairedMoments, RegressionSums, RunningMoments};

/// One formula's rolling state, advanced one input index at a time.
///
/// `I` is the input the kernel reads: `[T]` for a single series, or one of
/// the aligned multi-series views ([`Paired`], [`HighLow`], [`Bars`]).
pub trait WindowKernel<I: ?Sized> {
    /// Value emitted per step.
    type Output;

    /// Number of samples absorbed by [`seed`](Self::seed) before the first
    /// [`step`](Self::step); the structural lookback of the formula.
    fn warmup(&self) -> usize;

    /// Absorbs the sample at `idx` while the first window is filling.
    fn seed(&mut self, input: &I, idx: usize);

    /// Advances the state to include `idx` and returns the value for `idx`.
    ///
    /// Must only read input indices in `[idx - lookback, idx]`.
    fn step(&mut self, input: &I, idx: usize) -> Self::Output;
}

/// Destination for emitted values.
pub trait Sink<O> {
    /// Number of values the sink can hold.
    fn capacity(&self) -> usize;

    /// Stores `value` at `offset`.
    fn put(&mut self, offset: usize, value: O);
}

impl<T> Sink<T> for [T] {
    #[inline]
    fn capacity(&self) -> usize {
        self.len()
    }

    #[inline]
    fn put(&mut self, offset: usize, value: T) {
        self[offset] = value;
    }
}

impl<A, B> Sink<(A, B)> for (&mut [A], &mut [B]) {
    #[inline]
    fn capacity(&self) -> usize {
        self.0.len().min(self.1.len())
    }

    #[inline]
    fn put(&mut self, offset: usize, value: (A, B)) {
        self.0[offset] = value.0;
        self.1[offset] = value.1;
    }
}

/// Where a kernel reads from and writes to during one call.
pub trait Channel<I: ?Sized, O> {
    /// The input view.
    fn source(&self) -> &I;

    /// Number of values the output side can hold.
    fn capacity(&self) -> usize;

    /// Stores an emitted value.
    fn emit(&mut self, offset: usize, value: O);
}

/// Distinct input and output buffers.
pub struct Split<'a, I: ?Sized, S: ?Sized> {
    input: &'a I,
    sink: &'a mut S,
}

impl<'a, I: ?Sized, S: ?Sized> Split<'a, I, S> {
    /// Pairs an input view with an output sink.
    pub fn new(input: &'a I, sink: &'a mut S) -> Self {
        Self { input, sink }
    }
}

impl<I: ?Sized, S: ?Sized + Sink<O>, O> Channel<I, O> for Split<'_, I, S> {
    #[inline]
    fn source(&self) -> &I {
        self.input
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.sink.capacity()
    }

    #[inline]
    fn emit(&mut self, offset: usize, value: O) {
        self.sink.put(offset, value);
    }
}

/// One buffer used as both input and output.
pub struct InPlace<'a, T>(&'a mut [T]);

impl<'a, T> InPlace<'a, T> {
    /// Wraps a buffer whose contents are the input and receive the output.
    pub fn new(buffer: &'a mut [T]) -> Self {
        Self(buffer)
    }
}

impl<T> Channel<[T], T> for InPlace<'_, T> {
    #[inline]
    fn source(&self) -> &[T] {
        &self.0[..]
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.0.len()
    }

    #[inline]
    fn emit(&mut self, offset: usize, value: T) {
        self.0[offset] = value;
    }
}

/// Two aligned series, such as the operands of a correlation.
#[derive(Debug, Clone, Copy)]
pub struct Paired<'a, T> {
    /// First series.
    pub x: &'a [T],
    /// Second series.
    pub y: &'a [T],
}

/// Aligned high and low series.
#[derive(Debug, Clone, Copy)]
pub struct HighLow<'a, T> {
    /// High prices.
    pub high: &'a [T],
    /// Low prices.
    pub low: &'a [T],
}

/// Aligned high, low and close series.
#[derive(Debug, Clone, Copy)]
pub struct Bars<'a, T> {
    /// High prices.
    pub high: &'a [T],
    /// Low prices.
    pub low: &'a [T],
    /// Close prices.
    pub close: &'a [T],
}

/// Runs a kernel over a validated range.
///
/// `lookback` is the full lookback of the call: the kernel's
/// [`warmup`](WindowKernel::warmup) plus any settling samples (the unstable
/// period) whose emissions are discarded.
///
/// Returns the [`OutputRange`] written. Nothing is written when the range is
/// empty or when the output cannot hold every value.
///
/// # Errors
///
/// Returns `Error::BufferTooSmall` if the channel holds fewer slots than the
/// output range needs.
pub fn drive<I, K, C>(
    kernel: &mut K,
    channel: &mut C,
    range: ValidRange,
    lookback: usize,
) -> Result<OutputRange>
where
    I: ?Sized,
    K: WindowKernel<I>,
    C: Channel<I, K::Output>,
{
    debug_assert!(lookback >= kernel.warmup());

    let out = OutputRange::resolve(range, lookback);
    if out.is_empty() {
        tracing::trace!(
            start = range.start,
            end = range.end,
            lookback,
            "not enough data after lookback"
        );
        return Ok(out);
    }

    if channel.capacity() < out.len() {
        return Err(Error::BufferTooSmall {
            required: out.len(),
            actual: channel.capacity(),
        });
    }

    let begin = out.begin();
    let first = begin - lookback;
    let seeded = first + kernel.warmup();

    for idx in first..seeded {
        kernel.seed(channel.source(), idx);
    }

    for idx in seeded..=range.end {
        let value = kernel.step(channel.source(), idx);
        if idx >= begin {
            channel.emit(idx - begin, value);
        }
    }

    Ok(out)
}

/// Kernel that emits each input sample unchanged; the period-1 moving average.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl<T: Copy> WindowKernel<[T]> for Identity {
    type Output = T;

    fn warmup(&self) -> usize {
        0
    }

    fn seed(&mut self, _input: &[T], _idx: usize) {}

    #[inline]
    fn step(&mut self, input: &[T], idx: usize) -> T {
        input[idx]
    }
}

/// Kernel that applies a function to each sample; lookback zero.
#[derive(Debug, Clone, Copy)]
pub struct Map<F>(pub F);

impl<T: Copy, F: FnMut(T) -> T> WindowKernel<[T]> for Map<F> {
    type Output = T;

    fn warmup(&self) -> usize {
        0
    }

    fn seed(&mut self, _input: &[T], _idx: usize) {}

    #[inline]
    fn step(&mut self, input: &[T], idx: usize) -> T {
        (self.0)(input[idx])
    }
}

/// Kernel adapter that maps every emitted value through a function.
///
/// Used to turn a shared kernel's raw output (an `(index, value)` pair, a
/// regression fit) into the value one indicator reports.
#[derive(Debug, Clone)]
pub struct Project<K, F> {
    kernel: K,
    project: F,
}

impl<K, F> Project<K, F> {
    /// Wraps `kernel`, passing each emission through `project`.
    pub const fn new(kernel: K, project: F) -> Self {
        Self { kernel, project }
    }
}

impl<I, K, F, U> WindowKernel<I> for Project<K, F>
where
    I: ?Sized,
    K: WindowKernel<I>,
    F: FnMut(K::Output) -> U,
{
    type Output = U;

    #[inline]
    fn warmup(&self) -> usize {
        self.kernel.warmup()
    }

    #[inline]
    fn seed(&mut self, input: &I, idx: usize) {
        self.kernel.seed(input, idx);
    }

    #[inline]
    fn step(&mut self, input: &I, idx: usize) -> U {
        (self.project)(self.kernel.step(input, idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::validate_range;

    /// Records which indices were seeded and stepped.
    #[derive(Default)]
    struct Recorder {
        warmup: usize,
        seeded: Vec<usize>,
        stepped: Vec<usize>,
    }

    impl WindowKernel<[f64]> for Recorder {
        type Output = f64;

        fn warmup(&self) -> usize {
            self.warmup
        }

        fn seed(&mut self, _input: &[f64], idx: usize) {
            self.seeded.push(idx);
        }

        fn step(&mut self, input: &[f64], idx: usize) -> f64 {
            self.stepped.push(idx);
            input[idx]
        }
    }

    #[test]
    fn test_drive_seeds_before_first_output() {
        let data = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let mut out = [0.0; 7];
        let mut recorder = Recorder {
            warmup: 2,
            ..Recorder::default()
        };
        let range = validate_range(4..=6, &[data.len()]).unwrap();
        let written = drive(&mut recorder, &mut Split::new(&data[..], &mut out[..]), range, 3).unwrap();

        assert_eq!(written.begin(), 4);
        assert_eq!(written.len(), 3);
        // Warm-up starts `lookback` samples before the first output
        assert_eq!(recorder.seeded, vec![1, 2]);
        // Settling step at 3 is computed but not written
        assert_eq!(recorder.stepped, vec![3, 4, 5, 6]);
        assert_eq!(&out[..3], &[4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_drive_empty_range_writes_nothing() {
        let data = [1.0, 2.0, 3.0];
        let mut out = [-1.0; 3];
        let range = validate_range(.., &[data.len()]).unwrap();
        let mut recorder = Recorder::default();
        let written = drive(&mut recorder, &mut Split::new(&data[..], &mut out[..]), range, 3).unwrap();

        assert!(written.is_empty());
        assert!(recorder.stepped.is_empty());
        assert_eq!(out, [-1.0; 3]);
    }

    #[test]
    fn test_drive_rejects_short_buffer_before_writing() {
        let data = [1.0, 2.0, 3.0, 4.0];
        let mut out = [-1.0; 2];
        let range = validate_range(.., &[data.len()]).unwrap();
        let err = drive(&mut Identity, &mut Split::new(&data[..], &mut out[..]), range, 0).unwrap_err();

        assert_eq!(
            err,
            Error::BufferTooSmall {
                required: 4,
                actual: 2
            }
        );
        assert_eq!(out, [-1.0; 2]);
    }

    #[test]
    fn test_in_place_channel() {
        let mut buf = [1.0_f64, 4.0, 9.0];
        let range = validate_range(.., &[buf.len()]).unwrap();
        let written = drive(&mut Map(f64::sqrt), &mut InPlace::new(&mut buf), range, 0).unwrap();

        assert_eq!(written.len(), 3);
        assert_eq!(buf, [1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_project_maps_emissions() {
        let data = [1.0_f64, 2.0, 3.0];
        let mut out = [0.0; 3];
        let range = validate_range(.., &[data.len()]).unwrap();
        let mut kernel = Project::new(Identity, |x: f64| x * 10.0);
        drive(&mut kernel, &mut Split::new(&data[..], &mut out[..]), range, 0).unwrap();
        assert_eq!(out, [10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_pair_sink() {
        let mut a = [0_usize; 2];
        let mut b = [0.0_f64; 3];
        let mut sink = (&mut a[..], &mut b[..]);
        assert_eq!(sink.capacity(), 2);
        sink.put(1, (7, 0.5));
        assert_eq!(a, [0, 7]);
        assert_eq!(b, [0.0, 0.5, 0.0]);
    }
}
