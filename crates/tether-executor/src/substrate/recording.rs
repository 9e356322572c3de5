//! In-memory substrate that records submissions instead of running them
//!
//! Deterministic stand-in for a real substrate: nothing runs until asked,
//! and every submission can be inspected in the order it arrived.

use super::{Affinity, DeadlineTarget, Substrate};
use crate::job::Job;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread::{self, ThreadId};

/// A submission captured by [`RecordingSubstrate`]
#[derive(Debug)]
pub enum Submission {
    /// Via `enqueue_main`
    Main(Job),
    /// Via `enqueue_global`
    Global(Job),
    /// Via `enqueue_with_deadline`
    Deadline(DeadlineTarget, Job),
}

impl Submission {
    /// The submitted job
    pub fn job(&self) -> &Job {
        match self {
            Submission::Main(job) | Submission::Global(job) | Submission::Deadline(_, job) => job,
        }
    }

    /// Deadline details, for deadline submissions
    pub fn target(&self) -> Option<&DeadlineTarget> {
        match self {
            Submission::Deadline(target, _) => Some(target),
            _ => None,
        }
    }

    /// Whether the job must run on the main thread
    pub fn is_main(&self) -> bool {
        match self {
            Submission::Main(_) => true,
            Submission::Global(_) => false,
            Submission::Deadline(target, _) => target.affinity == Affinity::Main,
        }
    }

    /// Take ownership of the submitted job
    pub fn into_job(self) -> Job {
        match self {
            Submission::Main(job) | Submission::Global(job) | Submission::Deadline(_, job) => job,
        }
    }
}

/// Substrate that queues every submission in arrival order.
pub struct RecordingSubstrate {
    submissions: Mutex<VecDeque<Submission>>,
    main_thread: Mutex<ThreadId>,
    loop_entries: AtomicUsize,
}

impl RecordingSubstrate {
    /// Create a substrate whose main thread is the calling thread
    pub fn new() -> Self {
        Self::with_main_thread(thread::current().id())
    }

    /// Create a substrate with an explicit main thread
    pub fn with_main_thread(main_thread: ThreadId) -> Self {
        Self {
            submissions: Mutex::new(VecDeque::new()),
            main_thread: Mutex::new(main_thread),
            loop_entries: AtomicUsize::new(0),
        }
    }

    /// Move the main-thread designation
    pub fn designate_main_thread(&self, main_thread: ThreadId) {
        *self.main_thread.lock() = main_thread;
    }

    /// The designated main thread
    pub fn main_thread(&self) -> ThreadId {
        *self.main_thread.lock()
    }

    /// Number of queued submissions
    pub fn len(&self) -> usize {
        self.submissions.lock().len()
    }

    /// Whether nothing is queued
    pub fn is_empty(&self) -> bool {
        self.submissions.lock().is_empty()
    }

    /// How many times `run_main_loop` has been entered
    pub fn loop_entries(&self) -> usize {
        self.loop_entries.load(Ordering::Acquire)
    }

    /// Remove and return every queued submission, oldest first
    pub fn take_all(&self) -> Vec<Submission> {
        self.submissions.lock().drain(..).collect()
    }

    /// Run queued jobs in arrival order until the queue is empty, ignoring
    /// deadlines and affinity. Jobs may enqueue more work while running.
    ///
    /// Returns the number of jobs run.
    pub fn run_pending(&self) -> usize {
        let mut ran = 0;
        // Release the lock before running so jobs can submit follow-ups.
        while let Some(submission) = self.pop_front(|_| true) {
            submission.into_job().run();
            ran += 1;
        }
        ran
    }

    /// Run queued immediate main-thread jobs in arrival order, leaving every
    /// other submission queued.
    pub fn run_main_pending(&self) -> usize {
        let mut ran = 0;
        while let Some(submission) = self.pop_front(|s| matches!(s, Submission::Main(_))) {
            submission.into_job().run();
            ran += 1;
        }
        ran
    }

    fn pop_front(&self, wanted: impl Fn(&Submission) -> bool) -> Option<Submission> {
        let mut submissions = self.submissions.lock();
        let index = submissions.iter().position(wanted)?;
        submissions.remove(index)
    }

    fn record(&self, submission: Submission) {
        self.submissions.lock().push_back(submission);
    }
}

impl Default for RecordingSubstrate {
    fn default() -> Self {
        Self::new()
    }
}

impl Substrate for RecordingSubstrate {
    fn enqueue_main(&self, job: Job) {
        self.record(Submission::Main(job));
    }

    fn enqueue_global(&self, job: Job) {
        self.record(Submission::Global(job));
    }

    fn enqueue_with_deadline(&self, target: DeadlineTarget, job: Job) {
        self.record(Submission::Deadline(target, job));
    }

    /// Drains queued immediate main-thread jobs, then returns.
    fn run_main_loop(&self) {
        self.loop_entries.fetch_add(1, Ordering::AcqRel);
        self.run_main_pending();
    }

    fn is_main_thread(&self) -> bool {
        thread::current().id() == self.main_thread()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn logging_job(log: &Arc<Mutex<Vec<u32>>>, value: u32) -> Job {
        let log = log.clone();
        Job::new(move || log.lock().push(value))
    }

    #[test]
    fn test_records_in_order() {
        let substrate = RecordingSubstrate::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        substrate.enqueue_global(logging_job(&log, 1));
        substrate.enqueue_main(logging_job(&log, 2));
        substrate.enqueue_global(logging_job(&log, 3));
        assert_eq!(substrate.len(), 3);

        assert_eq!(substrate.run_pending(), 3);
        assert!(substrate.is_empty());
        assert_eq!(*log.lock(), vec![1, 2, 3]);
    }

    #[test]
    fn test_main_loop_runs_only_main_jobs() {
        let substrate = RecordingSubstrate::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        substrate.enqueue_global(logging_job(&log, 1));
        substrate.enqueue_main(logging_job(&log, 2));
        substrate.enqueue_main(logging_job(&log, 3));

        substrate.run_main_loop();
        assert_eq!(substrate.loop_entries(), 1);
        assert_eq!(*log.lock(), vec![2, 3]);

        let remaining = substrate.take_all();
        assert_eq!(remaining.len(), 1);
        assert!(matches!(remaining[0], Submission::Global(_)));
        for submission in remaining {
            submission.into_job().run();
        }
    }

    #[test]
    fn test_jobs_can_enqueue_follow_ups() {
        let substrate = Arc::new(RecordingSubstrate::new());
        let log = Arc::new(Mutex::new(Vec::new()));

        let inner = logging_job(&log, 2);
        let s = substrate.clone();
        let l = log.clone();
        substrate.enqueue_global(Job::new(move || {
            l.lock().push(1);
            s.enqueue_global(inner);
        }));

        assert_eq!(substrate.run_pending(), 2);
        assert_eq!(*log.lock(), vec![1, 2]);
    }

    #[test]
    fn test_main_thread_designation() {
        let substrate = Arc::new(RecordingSubstrate::new());
        assert!(substrate.is_main_thread());

        let s = substrate.clone();
        let on_other = thread::spawn(move || s.is_main_thread()).join().unwrap();
        assert!(!on_other);

        let other = thread::spawn(|| thread::current().id()).join().unwrap();
        substrate.designate_main_thread(other);
        assert!(!substrate.is_main_thread());
        assert_eq!(substrate.main_thread(), other);
    }
}
