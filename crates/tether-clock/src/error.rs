//! Clock conversion errors

use crate::domain::ClockDomain;

/// A clock could not be related to the canonical time bases.
///
/// Callers are expected to rule this out at the type level; reaching it is a
/// precondition violation, not a runtime condition to recover from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ClockError {
    /// The clock has no conversion for its instants into the target domain
    #[error("clock instant cannot be related to the {domain} clock")]
    UnrelatedInstant {
        /// Domain the instant was being converted into
        domain: ClockDomain,
    },

    /// The clock has no conversion for its durations
    #[error("clock duration cannot be converted to a canonical span")]
    UnrelatedDuration,
}
