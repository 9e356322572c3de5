//! Executor backed by the substrate's concurrent pool

use crate::executor::{Executor, SchedulableExecutor};
use crate::job::Job;
use crate::substrate::{Affinity, DeadlineTarget, Substrate};
use std::sync::Arc;
use tether_clock::CanonicalDeadline;

/// Executor that submits jobs to any pool thread.
///
/// Holds no mutable state, so it can be shared freely and called from any
/// number of threads at once.
pub struct PoolExecutor {
    substrate: Arc<dyn Substrate>,
    log_submissions: bool,
}

impl PoolExecutor {
    /// Create a pool executor over `substrate`
    pub fn new(substrate: Arc<dyn Substrate>) -> Self {
        Self {
            substrate,
            log_submissions: false,
        }
    }

    /// Emit a debug event for every submission
    pub fn with_submission_logging(mut self, enabled: bool) -> Self {
        self.log_submissions = enabled;
        self
    }
}

impl Executor for PoolExecutor {
    fn enqueue(&self, job: Job) {
        if self.log_submissions {
            tracing::debug!(job = %job.id(), priority = job.priority().raw(), "enqueue on pool");
        }
        self.substrate.enqueue_global(job);
    }
}

impl SchedulableExecutor for PoolExecutor {
    fn enqueue_deadline(&self, job: Job, deadline: CanonicalDeadline) {
        if self.log_submissions {
            tracing::debug!(job = %job.id(), %deadline, "enqueue on pool at deadline");
        }
        self.substrate
            .enqueue_with_deadline(DeadlineTarget::new(Affinity::Pool, &deadline), job);
    }
}
