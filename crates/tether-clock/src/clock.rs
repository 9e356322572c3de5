//! The clock capability accepted by the bridge

use crate::components::TimeComponents;
use crate::domain::{ClockDomain, ClockTraits};
use std::fmt;

/// A clock whose instants can be scheduled against.
///
/// Implementors must state their traits; the bridge uses them to choose the
/// canonical domain and then asks the clock to express its instant in that
/// domain's frame.
pub trait DeadlineClock {
    /// A point in time in this clock's reference frame
    type Instant;

    /// A span of time in this clock's units
    type Duration;

    /// How this clock advances
    fn traits(&self) -> ClockTraits;

    /// Express `instant` as an offset from the `target` canonical clock's
    /// epoch.
    ///
    /// Returns `None` if this clock cannot be related to `target`.
    fn convert_instant(&self, instant: Self::Instant, target: ClockDomain) -> Option<TimeComponents>;

    /// Express `duration` as a canonical span.
    ///
    /// Returns `None` if the duration has no canonical representation.
    fn convert_duration(&self, duration: Self::Duration) -> Option<TimeComponents>;
}

impl<C: DeadlineClock + ?Sized> DeadlineClock for &C {
    type Instant = C::Instant;
    type Duration = C::Duration;

    fn traits(&self) -> ClockTraits {
        (**self).traits()
    }

    fn convert_instant(&self, instant: Self::Instant, target: ClockDomain) -> Option<TimeComponents> {
        (**self).convert_instant(instant, target)
    }

    fn convert_duration(&self, duration: Self::Duration) -> Option<TimeComponents> {
        (**self).convert_duration(duration)
    }
}

/// A clock described by value: a trait set plus conversion functions.
///
/// Useful when a runtime knows how to map its own timestamps onto a
/// canonical base but has no dedicated clock type to hang the impl on.
pub struct BoundClock<I, D> {
    traits: ClockTraits,
    instant: fn(I, ClockDomain) -> Option<TimeComponents>,
    duration: fn(D) -> Option<TimeComponents>,
}

impl<I, D> BoundClock<I, D> {
    /// Create a clock from its traits and conversion functions
    pub fn new(
        traits: ClockTraits,
        instant: fn(I, ClockDomain) -> Option<TimeComponents>,
        duration: fn(D) -> Option<TimeComponents>,
    ) -> Self {
        Self {
            traits,
            instant,
            duration,
        }
    }
}

impl<I, D> Clone for BoundClock<I, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I, D> Copy for BoundClock<I, D> {}

impl<I, D> fmt::Debug for BoundClock<I, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundClock")
            .field("traits", &self.traits)
            .finish_non_exhaustive()
    }
}

impl<I, D> DeadlineClock for BoundClock<I, D> {
    type Instant = I;
    type Duration = D;

    fn traits(&self) -> ClockTraits {
        self.traits
    }

    fn convert_instant(&self, instant: I, target: ClockDomain) -> Option<TimeComponents> {
        (self.instant)(instant, target)
    }

    fn convert_duration(&self, duration: D) -> Option<TimeComponents> {
        (self.duration)(duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn millis_instant(ms: i64, _target: ClockDomain) -> Option<TimeComponents> {
        Some(TimeComponents::from_millis(ms))
    }

    fn millis_duration(ms: i64) -> Option<TimeComponents> {
        Some(TimeComponents::from_millis(ms))
    }

    #[test]
    fn test_bound_clock_forwards() {
        let clock: BoundClock<i64, i64> =
            BoundClock::new(ClockTraits::MONOTONIC, millis_instant, millis_duration);

        assert_eq!(clock.traits(), ClockTraits::MONOTONIC);
        assert_eq!(
            clock.convert_instant(1_500, ClockDomain::Suspending),
            Some(TimeComponents::from_millis(1_500))
        );
        assert_eq!(clock.convert_duration(-20), Some(TimeComponents::from_millis(-20)));
    }

    #[test]
    fn test_reference_forwards() {
        let clock: BoundClock<i64, i64> =
            BoundClock::new(ClockTraits::CONTINUOUS, millis_instant, millis_duration);
        let by_ref = &clock;
        assert_eq!(by_ref.traits(), ClockTraits::CONTINUOUS);
        assert_eq!(
            by_ref.convert_instant(7, ClockDomain::Continuous),
            Some(TimeComponents::from_millis(7))
        );
    }
}
