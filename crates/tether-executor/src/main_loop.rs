//! Executor bound to the substrate's main thread

use crate::error::ExecutorError;
use crate::executor::{Executor, RunLoopExecutor, SchedulableExecutor, SerialExecutor};
use crate::job::Job;
use crate::substrate::{Affinity, DeadlineTarget, Substrate};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::thread;
use tether_clock::CanonicalDeadline;

const IDLE: u8 = 0;
const RUNNING: u8 = 1;

/// Lifecycle of a [`MainExecutor`]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RunState {
    /// `run` has not been called
    Idle,
    /// `run` has been entered; never left
    Running,
}

/// Executor that owns the main thread for the rest of the process.
///
/// `run` may be entered exactly once. Stopping is not supported: the thread
/// that calls `run` keeps draining main-thread jobs until the process ends.
pub struct MainExecutor {
    substrate: Arc<dyn Substrate>,
    state: AtomicU8,
    log_submissions: bool,
}

impl MainExecutor {
    /// Create an idle main executor over `substrate`
    pub fn new(substrate: Arc<dyn Substrate>) -> Self {
        Self {
            substrate,
            state: AtomicU8::new(IDLE),
            log_submissions: false,
        }
    }

    /// Emit a debug event for every submission
    pub fn with_submission_logging(mut self, enabled: bool) -> Self {
        self.log_submissions = enabled;
        self
    }

    /// Current lifecycle state
    pub fn state(&self) -> RunState {
        match self.state.load(Ordering::Acquire) {
            IDLE => RunState::Idle,
            _ => RunState::Running,
        }
    }

    /// Whether `run` has been entered
    pub fn is_running(&self) -> bool {
        self.state() == RunState::Running
    }
}

impl Executor for MainExecutor {
    fn enqueue(&self, job: Job) {
        if self.log_submissions {
            tracing::debug!(job = %job.id(), priority = job.priority().raw(), "enqueue on main thread");
        }
        self.substrate.enqueue_main(job);
    }

    fn is_main_executor(&self) -> bool {
        true
    }
}

impl SchedulableExecutor for MainExecutor {
    fn enqueue_deadline(&self, job: Job, deadline: CanonicalDeadline) {
        if self.log_submissions {
            tracing::debug!(job = %job.id(), %deadline, "enqueue on main thread at deadline");
        }
        self.substrate
            .enqueue_with_deadline(DeadlineTarget::new(Affinity::Main, &deadline), job);
    }
}

impl SerialExecutor for MainExecutor {
    fn check_isolated(&self) -> Result<(), ExecutorError> {
        if self.substrate.is_main_thread() {
            return Ok(());
        }
        let current = thread::current();
        let thread = match current.name() {
            Some(name) => name.to_string(),
            None => format!("{:?}", current.id()),
        };
        Err(ExecutorError::IsolationViolation { thread })
    }
}

impl RunLoopExecutor for MainExecutor {
    fn run(&self) -> Result<(), ExecutorError> {
        self.state
            .compare_exchange(IDLE, RUNNING, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| ExecutorError::RecursiveRunNotSupported)?;

        tracing::info!(thread = ?thread::current().id(), "entering main loop");
        self.substrate.run_main_loop();
        // Only reachable with substrates whose loop can exit; the executor
        // stays running so a second entry is still refused.
        tracing::warn!("main loop returned");
        Ok(())
    }

    fn stop(&self) -> Result<(), ExecutorError> {
        Err(ExecutorError::StopNotSupported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::substrate::{RecordingSubstrate, Submission};
    use tether_clock::{ClockDomain, Leeway, Timestamp};

    fn executor() -> (Arc<RecordingSubstrate>, MainExecutor) {
        let substrate = Arc::new(RecordingSubstrate::new());
        let executor = MainExecutor::new(substrate.clone());
        (substrate, executor)
    }

    #[test]
    fn test_starts_idle() {
        let (_, executor) = executor();
        assert_eq!(executor.state(), RunState::Idle);
        assert!(executor.is_main_executor());
    }

    #[test]
    fn test_run_then_run_again_fails() {
        let (substrate, executor) = executor();
        assert_eq!(executor.run(), Ok(()));
        assert!(executor.is_running());
        assert_eq!(substrate.loop_entries(), 1);

        assert_eq!(executor.run(), Err(ExecutorError::RecursiveRunNotSupported));
        assert_eq!(substrate.loop_entries(), 1);
    }

    #[test]
    fn test_stop_always_fails() {
        let (_, executor) = executor();
        assert_eq!(executor.stop(), Err(ExecutorError::StopNotSupported));
        executor.run().unwrap();
        assert_eq!(executor.stop(), Err(ExecutorError::StopNotSupported));
    }

    #[test]
    fn test_enqueue_goes_to_main_queue() {
        let (substrate, executor) = executor();
        executor.enqueue(Job::new(|| {}));
        let submissions = substrate.take_all();
        assert!(matches!(submissions.as_slice(), [Submission::Main(_)]));
        for s in submissions {
            s.into_job().run();
        }
    }

    #[test]
    fn test_deadline_pins_to_main_thread() {
        let (substrate, executor) = executor();
        let deadline = CanonicalDeadline {
            timestamp: Timestamp {
                domain: ClockDomain::Suspending,
                seconds: 3,
                nanoseconds: 7,
            },
            leeway: Leeway::Default,
        };
        executor.enqueue_deadline(Job::new(|| {}), deadline);

        let submissions = substrate.take_all();
        let target = submissions[0].target().copied().unwrap();
        assert!(!target.is_pool());
        assert_eq!((target.seconds, target.nanoseconds), (3, 7));
        assert_eq!(target.clock_id, ClockDomain::Suspending.raw());
        for s in submissions {
            s.into_job().run();
        }
    }

    #[test]
    fn test_check_isolated_on_main_thread() {
        let (_, executor) = executor();
        assert_eq!(executor.check_isolated(), Ok(()));
    }
}
