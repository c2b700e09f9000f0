//! Unstable-period configuration.
//!
//! Indicators with recursive state (exponential smoothing, Wilder averages,
//! adaptive filters) depend on every sample that came before. Their first
//! outputs are technically valid but still carry the influence of the seed.
//! The *unstable period* is an extra number of leading outputs to discard for
//! such an indicator, configured per [`FuncUnstId`] for the whole process.
//!
//! The process-wide table is a fixed array of atomics: readers and writers
//! never block and the last writer wins. [`UnstablePeriods`] is a plain value
//! snapshot of that table, so it can be built, inspected and serialized from a
//! host's configuration and then applied with [`UnstablePeriods::install`].
//!
//! ```
//! use ta_window::unstable::{FuncUnstId, UnstablePeriods};
//!
//! let mut periods = UnstablePeriods::new();
//! periods.set(FuncUnstId::Ema, 10);
//! assert_eq!(periods.get(FuncUnstId::Ema), 10);
//! assert_eq!(periods.get(FuncUnstId::Rsi), 0);
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde::{Deserialize, Serialize};

/// Identity of an indicator whose lookback honours an unstable period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuncUnstId {
    /// Exponential Moving Average, and the EMA layers of DEMA and TEMA.
    Ema,
    /// Kaufman Adaptive Moving Average.
    Kama,
    /// Relative Strength Index.
    Rsi,
    /// Tillson T3 Moving Average.
    T3,
}

impl FuncUnstId {
    /// Number of identities.
    pub const COUNT: usize = 4;

    /// Every identity, in declaration order.
    pub const ALL: [Self; Self::COUNT] = [Self::Ema, Self::Kama, Self::Rsi, Self::T3];

    #[inline]
    const fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for FuncUnstId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

static UNSTABLE: [AtomicUsize; FuncUnstId::COUNT] =
    [const { AtomicUsize::new(0) }; FuncUnstId::COUNT];

/// Sets the unstable period of one indicator for the whole process.
pub fn set_unstable_period(id: FuncUnstId, period: usize) {
    tracing::debug!(indicator = %id, period, "unstable period set");
    UNSTABLE[id.slot()].store(period, Ordering::Relaxed);
}

/// Sets the same unstable period for every indicator in [`FuncUnstId::ALL`].
pub fn set_all_unstable_periods(period: usize) {
    tracing::debug!(period, "unstable period set for all indicators");
    for slot in &UNSTABLE {
        slot.store(period, Ordering::Relaxed);
    }
}

/// Returns the current unstable period of one indicator.
#[inline]
#[must_use]
pub fn unstable_period(id: FuncUnstId) -> usize {
    UNSTABLE[id.slot()].load(Ordering::Relaxed)
}

/// A value snapshot of the unstable-period table.
///
/// Serializes as a map from snake_case indicator name to period; identities
/// missing from a deserialized map are zero.
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<FuncUnstId, usize>",
    into = "BTreeMap<FuncUnstId, usize>"
)]
pub struct UnstablePeriods {
    periods: [usize; FuncUnstId::COUNT],
}

impl UnstablePeriods {
    /// A table with every unstable period at zero (the process default).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            periods: [0; FuncUnstId::COUNT],
        }
    }

    /// Reads the process-wide table.
    #[must_use]
    pub fn current() -> Self {
        let mut table = Self::new();
        for id in FuncUnstId::ALL {
            table.periods[id.slot()] = unstable_period(id);
        }
        table
    }

    /// Writes this snapshot into the process-wide table.
    pub fn install(&self) {
        tracing::debug!(table = ?self, "installing unstable periods");
        for id in FuncUnstId::ALL {
            UNSTABLE[id.slot()].store(self.periods[id.slot()], Ordering::Relaxed);
        }
    }

    /// Unstable period of one indicator in this snapshot.
    #[inline]
    #[must_use]
    pub const fn get(&self, id: FuncUnstId) -> usize {
        self.periods[id.slot()]
    }

    /// Sets the unstable period of one indicator in this snapshot.
    pub fn set(&mut self, id: FuncUnstId, period: usize) -> &mut Self {
        self.periods[id.slot()] = period;
        self
    }
}

impl Default for UnstablePeriods {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for UnstablePeriods {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                FuncUnstId::ALL
                    .iter()
                    .filter(|id| self.get(**id) != 0)
                    .map(|id| (id, self.get(*id))),
            )
            .finish()
    }
}

impl From<BTreeMap<FuncUnstId, usize>> for UnstablePeriods {
    fn from(map: BTreeMap<FuncUnstId, usize>) -> Self {
        let mut table = Self::new();
        for (id, period) in map {
            table.set(id, period);
        }
        table
    }
}

impl From<UnstablePeriods> for BTreeMap<FuncUnstId, usize> {
    fn from(table: UnstablePeriods) -> Self {
        FuncUnstId::ALL
            .iter()
            .filter(|id| table.get(**id) != 0)
            .map(|id| (*id, table.get(*id)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_covers_every_slot_once() {
        for (i, id) in FuncUnstId::ALL.iter().enumerate() {
            assert_eq!(id.slot(), i);
        }
    }

    #[test]
    fn test_new_table_is_zero() {
        let table = UnstablePeriods::new();
        assert!(FuncUnstId::ALL.iter().all(|id| table.get(*id) == 0));
        assert_eq!(table, UnstablePeriods::default());
    }

    #[test]
    fn test_set_is_per_identity() {
        let mut table = UnstablePeriods::new();
        table.set(FuncUnstId::Kama, 7).set(FuncUnstId::T3, 3);
        assert_eq!(table.get(FuncUnstId::Kama), 7);
        assert_eq!(table.get(FuncUnstId::T3), 3);
        assert_eq!(table.get(FuncUnstId::Ema), 0);
    }

    #[test]
    fn test_map_conversion_skips_zero_entries() {
        let mut table = UnstablePeriods::new();
        table.set(FuncUnstId::Rsi, 12);
        let map: BTreeMap<FuncUnstId, usize> = table.into();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&FuncUnstId::Rsi), Some(&12));
        assert_eq!(UnstablePeriods::from(map), table);
    }

    #[test]
    fn test_debug_lists_non_zero_entries() {
        let mut table = UnstablePeriods::new();
        table.set(FuncUnstId::T3, 4);
        assert_eq!(format!("{table:?}"), "{T3: 4}");
    }
}
