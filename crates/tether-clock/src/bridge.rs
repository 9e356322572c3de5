//! Conversion of caller instants and tolerances into substrate deadlines

use crate::clock::DeadlineClock;
use crate::components::{clamp, TimeComponents, ATTOSECONDS_PER_NANOSECOND};
use crate::domain::ClockDomain;
use crate::error::ClockError;
use std::fmt;

/// Raw `(seconds, nanoseconds)` tolerance meaning "substrate default".
const DEFAULT_LEEWAY_PARTS: (i64, i64) = (0, -1);

/// An absolute deadline in one of the canonical domains.
///
/// `seconds >= 0` and `0 <= nanoseconds < 1_000_000_000` always hold.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Timestamp {
    /// Base the deadline is measured against
    pub domain: ClockDomain,
    /// Whole seconds since the domain's epoch
    pub seconds: i64,
    /// Sub-second part in nanoseconds
    pub nanoseconds: i64,
}

/// A non-negative relative span.
///
/// `seconds >= 0` and `0 <= nanoseconds < 1_000_000_000` always hold.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct Delay {
    /// Whole seconds
    pub seconds: i64,
    /// Sub-second part in nanoseconds
    pub nanoseconds: i64,
}

/// Scheduling slack the substrate may use to coalesce nearby deadlines.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum Leeway {
    /// No tolerance supplied; the substrate picks its own
    #[default]
    Default,
    /// Caller-supplied tolerance, already floored at zero
    Explicit(Delay),
}

impl Leeway {
    /// Tolerance as the `(seconds, nanoseconds)` pair handed to the
    /// substrate. [`Leeway::Default`] is encoded as `(0, -1)`; an explicit
    /// tolerance never has negative parts.
    pub fn raw_parts(&self) -> (i64, i64) {
        match self {
            Leeway::Default => DEFAULT_LEEWAY_PARTS,
            Leeway::Explicit(delay) => (delay.seconds, delay.nanoseconds),
        }
    }

    /// Decode a substrate tolerance pair. Any negative nanosecond value is
    /// read as the default sentinel.
    pub fn from_raw_parts(seconds: i64, nanoseconds: i64) -> Leeway {
        if nanoseconds < 0 {
            Leeway::Default
        } else {
            Leeway::Explicit(Delay {
                seconds,
                nanoseconds,
            })
        }
    }
}

/// A deadline together with its tolerance, ready for the substrate.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalDeadline {
    /// When the job becomes eligible to run
    pub timestamp: Timestamp,
    /// Allowed slack after `timestamp`
    pub leeway: Leeway,
}

impl fmt::Display for CanonicalDeadline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}+{}.{:09}s",
            self.timestamp.domain, self.timestamp.seconds, self.timestamp.nanoseconds
        )?;
        match self.leeway {
            Leeway::Default => write!(f, " (default leeway)"),
            Leeway::Explicit(delay) => write!(f, " (leeway {}.{:09}s)", delay.seconds, delay.nanoseconds),
        }
    }
}

/// Clamp and split into whole seconds and nanoseconds.
fn floor_to_nanoseconds(components: TimeComponents) -> (i64, i64) {
    let clamped = clamp(components);
    (clamped.seconds(), clamped.attoseconds() / ATTOSECONDS_PER_NANOSECOND)
}

/// Convert an instant of `clock` into a canonical [`Timestamp`].
///
/// Clocks advertising the continuous trait map onto
/// [`ClockDomain::Continuous`], everything else onto
/// [`ClockDomain::Suspending`]. Instants before the domain's epoch are
/// floored to zero so the deadline fires immediately.
pub fn timestamp<C>(instant: C::Instant, clock: &C) -> Result<Timestamp, ClockError>
where
    C: DeadlineClock + ?Sized,
{
    let domain = ClockDomain::for_traits(clock.traits());
    let components = clock
        .convert_instant(instant, domain)
        .ok_or(ClockError::UnrelatedInstant { domain })?;
    let (seconds, nanoseconds) = floor_to_nanoseconds(components);

    Ok(Timestamp {
        domain,
        seconds,
        nanoseconds,
    })
}

/// Convert a duration of `clock` into a non-negative [`Delay`].
pub fn delay<C>(duration: C::Duration, clock: &C) -> Result<Delay, ClockError>
where
    C: DeadlineClock + ?Sized,
{
    let components = clock
        .convert_duration(duration)
        .ok_or(ClockError::UnrelatedDuration)?;
    let (seconds, nanoseconds) = floor_to_nanoseconds(components);

    Ok(Delay {
        seconds,
        nanoseconds,
    })
}

/// Convert an instant and optional tolerance into a [`CanonicalDeadline`].
///
/// An absent tolerance becomes [`Leeway::Default`]; a supplied one is
/// converted with [`delay`], so a negative tolerance floors to zero slack
/// rather than to the default sentinel.
pub fn deadline<C>(
    instant: C::Instant,
    tolerance: Option<C::Duration>,
    clock: &C,
) -> Result<CanonicalDeadline, ClockError>
where
    C: DeadlineClock + ?Sized,
{
    let leeway = match tolerance {
        Some(tolerance) => Leeway::Explicit(delay(tolerance, clock)?),
        None => Leeway::Default,
    };
    let timestamp = timestamp(instant, clock)?;

    Ok(CanonicalDeadline { timestamp, leeway })
}
