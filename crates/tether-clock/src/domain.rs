//! Clock traits and the two canonical deadline domains

use std::fmt;
use std::ops::BitOr;

/// Set of properties a clock advertises about how it advances.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct ClockTraits(u32);

impl ClockTraits {
    /// No traits
    pub const NONE: ClockTraits = ClockTraits(0);

    /// Keeps advancing while the system is suspended
    pub const CONTINUOUS: ClockTraits = ClockTraits(1 << 0);

    /// Never goes backwards
    pub const MONOTONIC: ClockTraits = ClockTraits(1 << 1);

    /// Tracks wall-clock time (may jump)
    pub const WALLCLOCK: ClockTraits = ClockTraits(1 << 2);

    /// Whether every flag in `other` is also set in `self`
    pub fn contains(self, other: ClockTraits) -> bool {
        self.0 & other.0 == other.0
    }

    /// Union of both sets
    pub fn union(self, other: ClockTraits) -> ClockTraits {
        ClockTraits(self.0 | other.0)
    }

    /// Whether no flag is set
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Raw bit representation
    pub fn bits(self) -> u32 {
        self.0
    }
}

impl BitOr for ClockTraits {
    type Output = ClockTraits;

    fn bitor(self, rhs: ClockTraits) -> ClockTraits {
        self.union(rhs)
    }
}

/// One of the two time bases the substrate can schedule against.
///
/// The discriminants are the clock ids passed across the substrate boundary.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ClockDomain {
    /// Advances while the system is suspended
    Continuous = 1,
    /// Monotonic, stops while the system is suspended
    Suspending = 2,
}

impl ClockDomain {
    /// Pick the canonical domain closest to a clock with the given traits.
    ///
    /// Only the `CONTINUOUS` flag matters: everything else maps onto the
    /// suspending base.
    pub fn for_traits(traits: ClockTraits) -> ClockDomain {
        if traits.contains(ClockTraits::CONTINUOUS) {
            ClockDomain::Continuous
        } else {
            ClockDomain::Suspending
        }
    }

    /// Substrate clock id
    pub fn raw(self) -> i32 {
        self as i32
    }

    /// Parse a substrate clock id
    pub fn from_raw(raw: i32) -> Option<ClockDomain> {
        match raw {
            1 => Some(ClockDomain::Continuous),
            2 => Some(ClockDomain::Suspending),
            _ => None,
        }
    }
}

impl fmt::Display for ClockDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClockDomain::Continuous => write!(f, "continuous"),
            ClockDomain::Suspending => write!(f, "suspending"),
        }
    }
}
