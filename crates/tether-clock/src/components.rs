//! High-resolution signed time spans
//!
//! Every instant and duration that crosses the bridge is first expressed as
//! whole seconds plus attoseconds. Attosecond resolution divides evenly into
//! nanoseconds, so the final conversion only ever truncates.

use std::fmt;

/// Attoseconds in one second
pub const ATTOSECONDS_PER_SECOND: i64 = 1_000_000_000_000_000_000;

/// Attoseconds in one nanosecond
pub const ATTOSECONDS_PER_NANOSECOND: i64 = 1_000_000_000;

/// A signed span of time split into seconds and attoseconds.
///
/// Values are normalized by truncating division of the total attosecond
/// count, so both fields share the sign of the total and
/// `|attoseconds| < 10^18`. Half a second before the epoch is therefore
/// `(0, -500_000_000_000_000_000)` rather than `(-1, 500_000_000_000_000_000)`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeComponents {
    seconds: i64,
    attoseconds: i64,
}

impl TimeComponents {
    /// The zero span
    pub const ZERO: TimeComponents = TimeComponents {
        seconds: 0,
        attoseconds: 0,
    };

    /// Create a span from seconds and attoseconds, normalizing any overflow
    /// of the sub-second part into the seconds field.
    pub fn new(seconds: i64, attoseconds: i64) -> Self {
        Self::from_attoseconds(seconds as i128 * ATTOSECONDS_PER_SECOND as i128 + attoseconds as i128)
    }

    /// Create a span from a total attosecond count.
    ///
    /// Saturates at the `i64` seconds range.
    pub fn from_attoseconds(total: i128) -> Self {
        let per_second = ATTOSECONDS_PER_SECOND as i128;
        let seconds = total / per_second;
        let attoseconds = (total % per_second) as i64;

        match i64::try_from(seconds) {
            Ok(seconds) => TimeComponents {
                seconds,
                attoseconds,
            },
            Err(_) if total < 0 => TimeComponents {
                seconds: i64::MIN,
                attoseconds: 0,
            },
            Err(_) => TimeComponents {
                seconds: i64::MAX,
                attoseconds: 0,
            },
        }
    }

    /// Create a span from nanoseconds
    pub fn from_nanoseconds(nanoseconds: i128) -> Self {
        Self::from_attoseconds(nanoseconds.saturating_mul(ATTOSECONDS_PER_NANOSECOND as i128))
    }

    /// Create a span from milliseconds
    pub fn from_millis(millis: i64) -> Self {
        Self::from_nanoseconds(millis as i128 * 1_000_000)
    }

    /// Whole seconds (truncated toward zero)
    pub fn seconds(&self) -> i64 {
        self.seconds
    }

    /// Sub-second part in attoseconds, same sign as the span
    pub fn attoseconds(&self) -> i64 {
        self.attoseconds
    }

    /// Total span in attoseconds
    pub fn total_attoseconds(&self) -> i128 {
        self.seconds as i128 * ATTOSECONDS_PER_SECOND as i128 + self.attoseconds as i128
    }

    /// Whether the span lies before zero
    pub fn is_negative(&self) -> bool {
        self.total_attoseconds() < 0
    }

    /// Add two spans, `None` if the result leaves the representable range
    pub fn checked_add(self, other: TimeComponents) -> Option<TimeComponents> {
        self.total_attoseconds()
            .checked_add(other.total_attoseconds())
            .and_then(Self::from_total_checked)
    }

    /// Subtract `other` from `self`, `None` if the result leaves the
    /// representable range
    pub fn checked_sub(self, other: TimeComponents) -> Option<TimeComponents> {
        self.total_attoseconds()
            .checked_sub(other.total_attoseconds())
            .and_then(Self::from_total_checked)
    }

    fn from_total_checked(total: i128) -> Option<TimeComponents> {
        let seconds = total / ATTOSECONDS_PER_SECOND as i128;
        i64::try_from(seconds).ok()?;
        Some(Self::from_attoseconds(total))
    }
}

impl From<std::time::Duration> for TimeComponents {
    fn from(duration: std::time::Duration) -> Self {
        Self::from_nanoseconds(duration.as_nanos() as i128)
    }
}

impl fmt::Display for TimeComponents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        write!(
            f,
            "{}{}.{:018}s",
            sign,
            self.seconds.unsigned_abs(),
            self.attoseconds.unsigned_abs()
        )
    }
}

/// Floor a span at zero.
///
/// Anything before zero (negative seconds, or zero seconds with a negative
/// sub-second part) becomes [`TimeComponents::ZERO`]; everything else is
/// returned unchanged.
pub fn clamp(components: TimeComponents) -> TimeComponents {
    if components.seconds < 0 || (components.seconds == 0 && components.attoseconds < 0) {
        return TimeComponents::ZERO;
    }
    components
}
