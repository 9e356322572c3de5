//! The two canonical clocks backed by the operating system

use crate::clock::DeadlineClock;
use crate::components::TimeComponents;
use crate::domain::{ClockDomain, ClockTraits};

/// Clock that keeps advancing while the system is suspended
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct ContinuousClock;

/// Clock that stops advancing while the system is suspended
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct SuspendingClock;

/// An instant of [`ContinuousClock`]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContinuousInstant(TimeComponents);

/// An instant of [`SuspendingClock`]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SuspendingInstant(TimeComponents);

macro_rules! canonical_instant {
    ($instant:ident) => {
        impl $instant {
            /// Wrap an offset from the clock's epoch
            pub fn from_components(components: TimeComponents) -> Self {
                $instant(components)
            }

            /// Offset from the clock's epoch
            pub fn components(&self) -> TimeComponents {
                self.0
            }

            /// This instant moved by `span`, saturating at the representable range
            pub fn advanced_by(self, span: TimeComponents) -> Self {
                $instant(TimeComponents::from_attoseconds(
                    self.0.total_attoseconds() + span.total_attoseconds(),
                ))
            }
        }
    };
}

canonical_instant!(ContinuousInstant);
canonical_instant!(SuspendingInstant);

impl ContinuousClock {
    /// Current instant
    pub fn now(&self) -> ContinuousInstant {
        ContinuousInstant(platform::continuous_now())
    }
}

impl SuspendingClock {
    /// Current instant
    pub fn now(&self) -> SuspendingInstant {
        SuspendingInstant(platform::suspending_now())
    }
}

/// Move `components` from one canonical frame to the other by offsetting
/// through a pair of current readings.
fn rebase(
    components: TimeComponents,
    from_now: TimeComponents,
    to_now: TimeComponents,
) -> Option<TimeComponents> {
    components.checked_sub(from_now)?.checked_add(to_now)
}

impl DeadlineClock for ContinuousClock {
    type Instant = ContinuousInstant;
    type Duration = TimeComponents;

    fn traits(&self) -> ClockTraits {
        ClockTraits::CONTINUOUS | ClockTraits::MONOTONIC
    }

    fn convert_instant(&self, instant: ContinuousInstant, target: ClockDomain) -> Option<TimeComponents> {
        match target {
            ClockDomain::Continuous => Some(instant.0),
            ClockDomain::Suspending => rebase(
                instant.0,
                platform::continuous_now(),
                platform::suspending_now(),
            ),
        }
    }

    fn convert_duration(&self, duration: TimeComponents) -> Option<TimeComponents> {
        Some(duration)
    }
}

impl DeadlineClock for SuspendingClock {
    type Instant = SuspendingInstant;
    type Duration = TimeComponents;

    fn traits(&self) -> ClockTraits {
        ClockTraits::MONOTONIC
    }

    fn convert_instant(&self, instant: SuspendingInstant, target: ClockDomain) -> Option<TimeComponents> {
        match target {
            ClockDomain::Suspending => Some(instant.0),
            ClockDomain::Continuous => rebase(
                instant.0,
                platform::suspending_now(),
                platform::continuous_now(),
            ),
        }
    }

    fn convert_duration(&self, duration: TimeComponents) -> Option<TimeComponents> {
        Some(duration)
    }
}

#[cfg(unix)]
mod platform {
    use crate::components::{TimeComponents, ATTOSECONDS_PER_NANOSECOND};

    #[cfg(any(target_os = "linux", target_os = "android"))]
    const CONTINUOUS_ID: libc::clockid_t = libc::CLOCK_BOOTTIME;
    #[cfg(any(target_os = "linux", target_os = "android"))]
    const SUSPENDING_ID: libc::clockid_t = libc::CLOCK_MONOTONIC;

    #[cfg(target_vendor = "apple")]
    const CONTINUOUS_ID: libc::clockid_t = libc::CLOCK_MONOTONIC;
    #[cfg(target_vendor = "apple")]
    const SUSPENDING_ID: libc::clockid_t = libc::CLOCK_UPTIME_RAW;

    #[cfg(not(any(target_os = "linux", target_os = "android", target_vendor = "apple")))]
    const CONTINUOUS_ID: libc::clockid_t = libc::CLOCK_MONOTONIC;
    #[cfg(not(any(target_os = "linux", target_os = "android", target_vendor = "apple")))]
    const SUSPENDING_ID: libc::clockid_t = libc::CLOCK_MONOTONIC;

    fn read(id: libc::clockid_t) -> TimeComponents {
        // SAFETY: timespec is plain data, and `ts` stays valid and writable
        // for the duration of the call.
        let mut ts: libc::timespec = unsafe { std::mem::zeroed() };
        let rc = unsafe { libc::clock_gettime(id, &mut ts) };
        debug_assert_eq!(rc, 0, "clock_gettime failed for clock {}", id);
        TimeComponents::new(ts.tv_sec as i64, ts.tv_nsec as i64 * ATTOSECONDS_PER_NANOSECOND)
    }

    pub(super) fn continuous_now() -> TimeComponents {
        read(CONTINUOUS_ID)
    }

    pub(super) fn suspending_now() -> TimeComponents {
        read(SUSPENDING_ID)
    }
}

#[cfg(not(unix))]
mod platform {
    use crate::components::TimeComponents;
    use once_cell::sync::Lazy;
    use std::time::Instant;

    static BASE: Lazy<Instant> = Lazy::new(Instant::now);

    fn read() -> TimeComponents {
        TimeComponents::from(BASE.elapsed())
    }

    pub(super) fn continuous_now() -> TimeComponents {
        read()
    }

    pub(super) fn suspending_now() -> TimeComponents {
        read()
    }
}
