//! The external job substrate the executors delegate to
//!
//! The substrate owns the real threads: a designated main thread with a
//! blocking dispatch loop, and a pool of worker threads. The executors only
//! ever talk to it through the [`Substrate`] trait.

mod recording;

pub use recording::{RecordingSubstrate, Submission};

use crate::job::Job;
use tether_clock::{CanonicalDeadline, ClockDomain, Leeway};

/// Which threads a deadline submission may run on
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Affinity {
    /// Only the substrate's main thread
    Main,
    /// Any pool thread
    Pool,
}

/// A deadline submission in the substrate's native representation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct DeadlineTarget {
    /// Threads the job may run on
    pub affinity: Affinity,
    /// Deadline seconds in the domain named by `clock_id`
    pub seconds: i64,
    /// Deadline nanoseconds
    pub nanoseconds: i64,
    /// Tolerance seconds
    pub tolerance_seconds: i64,
    /// Tolerance nanoseconds; `-1` asks for the substrate default
    pub tolerance_nanoseconds: i64,
    /// Raw [`ClockDomain`] id
    pub clock_id: i32,
}

impl DeadlineTarget {
    /// Lower a canonical deadline for the given affinity
    pub fn new(affinity: Affinity, deadline: &CanonicalDeadline) -> Self {
        let (tolerance_seconds, tolerance_nanoseconds) = deadline.leeway.raw_parts();
        Self {
            affinity,
            seconds: deadline.timestamp.seconds,
            nanoseconds: deadline.timestamp.nanoseconds,
            tolerance_seconds,
            tolerance_nanoseconds,
            clock_id: deadline.timestamp.domain.raw(),
        }
    }

    /// Whether any pool thread may run the job
    pub fn is_pool(&self) -> bool {
        self.affinity == Affinity::Pool
    }

    /// Clock domain, if `clock_id` names one
    pub fn domain(&self) -> Option<ClockDomain> {
        ClockDomain::from_raw(self.clock_id)
    }

    /// Tolerance as the bridge sees it
    pub fn leeway(&self) -> Leeway {
        Leeway::from_raw_parts(self.tolerance_seconds, self.tolerance_nanoseconds)
    }
}

/// Primitive operations of the concurrent job substrate.
///
/// Enqueue operations are infallible and never block; the substrate runs
/// the job later on a thread of its choosing. Immediate submissions to the
/// same queue run in FIFO order.
pub trait Substrate: Send + Sync {
    /// Run `job` on the main thread, after previously queued main jobs
    fn enqueue_main(&self, job: Job);

    /// Run `job` on any pool thread
    fn enqueue_global(&self, job: Job);

    /// Run `job` no earlier than the deadline in `target`
    fn enqueue_with_deadline(&self, target: DeadlineTarget, job: Job);

    /// Block the calling thread dispatching main-thread jobs.
    ///
    /// Production substrates never return from this.
    fn run_main_loop(&self);

    /// Whether the calling thread is the substrate's main thread
    fn is_main_thread(&self) -> bool;
}
