//! Dense integer identifiers.
//!
//! Agents are numbered `0..population` after the contact log is remapped, and
//! households `0..households.len()` after partitioning.  Both ids index
//! straight into the per-agent and per-household `Vec`s, so they are thin
//! `u32` wrappers with an `index()` accessor rather than opaque handles.

use std::fmt;

macro_rules! dense_id {
    ($(#[$attr:meta])* $name:ident) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(pub u32);

        impl $name {
            /// Placeholder for a slot not yet assigned.
            pub const INVALID: $name = $name(u32::MAX);

            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            /// `None` if `i` does not fit below the `INVALID` sentinel.
            #[inline]
            pub fn from_index(i: usize) -> Option<Self> {
                u32::try_from(i).ok().filter(|&v| v != u32::MAX).map($name)
            }

            #[inline]
            pub fn is_valid(self) -> bool {
                self != Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

dense_id! {
    /// An agent, by its position in `[0, population)`.
    AgentId
}

dense_id! {
    /// A household, by its position in a `Households` partition.
    HouseholdId
}
