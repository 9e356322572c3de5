//! Executor roles exposed to the concurrency runtime

use crate::error::{ExecutorError, Rejected};
use crate::job::Job;
use tether_clock::{deadline, CanonicalDeadline, DeadlineClock};

/// Something that accepts jobs for immediate execution
pub trait Executor: Send + Sync {
    /// Submit `job` to run as soon as possible
    fn enqueue(&self, job: Job);

    /// Whether this is the executor bound to the main thread
    fn is_main_executor(&self) -> bool {
        false
    }
}

/// An executor that can also hold a job until a deadline
pub trait SchedulableExecutor: Executor {
    /// Submit `job` to run no earlier than an already-converted deadline
    fn enqueue_deadline(&self, job: Job, deadline: CanonicalDeadline);

    /// Submit `job` to run no earlier than `instant` on `clock`.
    ///
    /// `tolerance` is slack the substrate may use to batch nearby deadlines;
    /// `None` leaves it to the substrate. If the clock cannot be related to
    /// a canonical clock the job is handed back in the error.
    fn enqueue_at<C>(
        &self,
        job: Job,
        instant: C::Instant,
        tolerance: Option<C::Duration>,
        clock: &C,
    ) -> Result<(), Rejected>
    where
        Self: Sized,
        C: DeadlineClock + ?Sized,
    {
        match deadline(instant, tolerance, clock) {
            Ok(deadline) => {
                self.enqueue_deadline(job, deadline);
                Ok(())
            }
            Err(e) => Err(Rejected::new(job, ExecutorError::from(e))),
        }
    }
}

/// An executor whose jobs all run on one thread
pub trait SerialExecutor: Executor {
    /// Fail unless the calling thread is the one this executor runs jobs on
    fn check_isolated(&self) -> Result<(), ExecutorError>;
}

/// An executor that drives its own blocking loop
pub trait RunLoopExecutor {
    /// Block the calling thread running jobs
    fn run(&self) -> Result<(), ExecutorError>;

    /// Ask the loop to exit
    fn stop(&self) -> Result<(), ExecutorError>;
}
