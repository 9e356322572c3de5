//! Tether Clock - deadline conversion for the executor bridge
//!
//! Jobs can be scheduled against any clock the caller likes, but the
//! substrate only understands two deadline bases: a continuous one (keeps
//! advancing while the system is asleep) and a suspending one (stops while
//! the system is asleep). This crate funnels instants and durations from a
//! [`DeadlineClock`] into one of those two bases and produces the clamped
//! `(seconds, nanoseconds)` pairs the substrate expects.
//!
//! # Example
//!
//! ```ignore
//! use tether_clock::{deadline, SuspendingClock, TimeComponents};
//!
//! let clock = SuspendingClock;
//! let at = clock.now().advanced_by(TimeComponents::from_millis(250));
//! let deadline = deadline(at, None, &clock)?;
//! assert_eq!(deadline.timestamp.domain, ClockDomain::Suspending);
//! ```

#![warn(missing_docs)]

mod bridge;
mod clock;
mod components;
mod domain;
mod error;
mod system;

pub use bridge::{deadline, delay, timestamp, CanonicalDeadline, Delay, Leeway, Timestamp};
pub use clock::{BoundClock, DeadlineClock};
pub use components::{clamp, TimeComponents, ATTOSECONDS_PER_NANOSECOND, ATTOSECONDS_PER_SECOND};
pub use domain::{ClockDomain, ClockTraits};
pub use error::ClockError;
pub use system::{ContinuousClock, ContinuousInstant, SuspendingClock, SuspendingInstant};
