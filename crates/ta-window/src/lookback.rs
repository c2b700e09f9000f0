//! Shared lookback arithmetic.
//!
//! Each indicator exposes its own `*_lookback` function; those are built from
//! the helpers here so the "invalid parameter" signal is the same everywhere:
//! a lookback of `None` from the query, and a `BadParam` error from the
//! indicator that owns it.
//!
//! Indicators with an unstable period expose two queries: `*_lookback_with`
//! takes an explicit [`UnstablePeriods`] table, and `*_lookback` evaluates it
//! against a snapshot of the process-wide table.

use crate::error::{Error, Result};
use crate::unstable::{FuncUnstId, UnstablePeriods};

/// Lookback of a fixed window of `period` samples that includes the current one.
///
/// Returns `None` when `period < min`.
///
/// ```
/// use ta_window::lookback::window_lookback;
///
/// assert_eq!(window_lookback(3, 2), Some(2));
/// assert_eq!(window_lookback(1, 2), None);
/// assert_eq!(window_lookback(1, 1), Some(0));
/// ```
#[inline]
#[must_use]
pub const fn window_lookback(period: usize, min: usize) -> Option<usize> {
    if period < min || period == 0 {
        None
    } else {
        Some(period - 1)
    }
}

/// Adds the unstable period of `id` in `periods` to a structural lookback.
///
/// ```
/// use ta_window::lookback::with_unstable;
/// use ta_window::{FuncUnstId, UnstablePeriods};
///
/// let mut periods = UnstablePeriods::new();
/// periods.set(FuncUnstId::Ema, 3);
/// assert_eq!(with_unstable(Some(4), &periods, FuncUnstId::Ema), Some(7));
/// assert_eq!(with_unstable(Some(4), &periods, FuncUnstId::Rsi), Some(4));
/// ```
#[inline]
#[must_use]
pub const fn with_unstable(
    structural: Option<usize>,
    periods: &UnstablePeriods,
    id: FuncUnstId,
) -> Option<usize> {
    match structural {
        Some(lookback) => Some(lookback.saturating_add(periods.get(id))),
        None => None,
    }
}

/// Resolves a lookback query into the value an indicator runs with.
///
/// `query` is the indicator's own lookback function result for `period`;
/// `None` becomes the matching `BadParam` error.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` if the query signalled an invalid period.
#[inline]
pub(crate) const fn require(
    query: Option<usize>,
    name: &'static str,
    period: usize,
    min: usize,
) -> Result<usize> {
    match query {
        Some(lookback) => Ok(lookback),
        None => Err(Error::InvalidPeriod { name, period, min }),
    }
}
