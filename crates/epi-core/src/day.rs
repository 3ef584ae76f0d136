//! Simulated calendar days.
//!
//! The simulator is discrete-time with one step per day.  `Day(0)` is the
//! first step after seeding; a run over a contact sequence of length `T`
//! covers `Day(0)..Day(T)`.

use std::fmt;

/// Zero-based index of a simulated day (one step of the engine).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Day(pub u32);

impl Day {
    pub const ZERO: Day = Day(0);

    /// The following day.
    #[inline]
    pub fn next(self) -> Day {
        Day(self.0 + 1)
    }

    /// Cast to `usize` for indexing a contact sequence or a daily series.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "day {}", self.0)
    }
}
