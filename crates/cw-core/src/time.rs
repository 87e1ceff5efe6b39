//! Discrete road time.
//!
//! There is no wall clock.  Each vehicle carries a [`Ticks`] countdown that the
//! coordinator's clock operation decrements, and the coordinator keeps a
//! [`RoadClock`] counting how many clock operations have happened so far.

use std::fmt;

// ── Ticks ─────────────────────────────────────────────────────────────────────

/// A vehicle's remaining-tick countdown (or a requested tick budget).
///
/// Only two things change it: a fresh budget assigned on enter/advance, and
/// [`Ticks::decrement`], which floors at zero.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ticks(pub u32);

impl Ticks {
    pub const ZERO: Ticks = Ticks(0);

    #[inline]
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Count down by one tick.  Returns `true` if the value changed, i.e. it
    /// was positive beforehand.
    #[inline]
    pub fn decrement(&mut self) -> bool {
        if self.0 == 0 {
            return false;
        }
        self.0 -= 1;
        true
    }
}

impl From<u32> for Ticks {
    #[inline]
    fn from(n: u32) -> Ticks {
        Ticks(n)
    }
}

impl fmt::Display for Ticks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}t", self.0)
    }
}

// ── RoadClock ─────────────────────────────────────────────────────────────────

/// Number of clock operations applied to the road so far.
///
/// Stamped onto observer events and deferred requests so traces can be
/// ordered and waits measured.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoadClock(pub u64);

impl RoadClock {
    /// Advance by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.0 += 1;
    }

    /// Ticks elapsed from `earlier` to `self` (zero if `earlier` is later).
    #[inline]
    pub fn since(self, earlier: RoadClock) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl fmt::Display for RoadClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}
