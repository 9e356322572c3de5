//! Single-use units of work

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Unique identifier for a Job
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JobId(u64);

static NEXT_JOB_ID: AtomicU64 = AtomicU64::new(1);

impl JobId {
    /// Generate a new unique JobId
    pub fn new() -> Self {
        JobId(NEXT_JOB_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the numeric ID value
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "job-{}", self.0)
    }
}

/// Scheduling priority carried alongside a Job
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JobPriority(u8);

impl JobPriority {
    /// User-visible work
    pub const HIGH: JobPriority = JobPriority(25);
    /// No particular urgency
    pub const DEFAULT: JobPriority = JobPriority(21);
    /// Work the user is not waiting on
    pub const LOW: JobPriority = JobPriority(17);
    /// Maintenance work
    pub const BACKGROUND: JobPriority = JobPriority(9);

    /// Create a priority from its raw value
    pub fn from_raw(raw: u8) -> Self {
        JobPriority(raw)
    }

    /// Raw priority value
    pub fn raw(self) -> u8 {
        self.0
    }
}

impl Default for JobPriority {
    fn default() -> Self {
        JobPriority::DEFAULT
    }
}

type Work = Box<dyn FnOnce() + Send + 'static>;

/// An opaque unit of work that runs at most once.
///
/// A Job has exactly one owner. Handing it to an executor moves it; running
/// it consumes it. Dropping a Job that never ran is a bug in whoever held it
/// last and is reported through `tracing`.
pub struct Job {
    id: JobId,
    priority: JobPriority,
    work: Option<Work>,
}

impl Job {
    /// Create a job with the default priority
    pub fn new<F>(work: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self::with_priority(JobPriority::DEFAULT, work)
    }

    /// Create a job with an explicit priority
    pub fn with_priority<F>(priority: JobPriority, work: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Job {
            id: JobId::new(),
            priority,
            work: Some(Box::new(work)),
        }
    }

    /// This job's identifier
    pub fn id(&self) -> JobId {
        self.id
    }

    /// This job's priority
    pub fn priority(&self) -> JobPriority {
        self.priority
    }

    /// Execute the job, consuming it
    pub fn run(mut self) {
        if let Some(work) = self.work.take() {
            work();
        }
    }
}

impl fmt::Debug for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Job")
            .field("id", &self.id)
            .field("priority", &self.priority)
            .finish()
    }
}

impl Drop for Job {
    fn drop(&mut self) {
        if self.work.is_some() {
            tracing::error!(job = %self.id, "job dropped without running");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;

    #[test]
    fn test_job_ids_are_unique() {
        let a = Job::new(|| {});
        let b = Job::new(|| {});
        assert_ne!(a.id(), b.id());
        assert!(b.id() > a.id());
        a.run();
        b.run();
    }

    #[test]
    fn test_job_runs_once() {
        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();
        let job = Job::new(move || {
            c.fetch_add(1, Ordering::SeqCst);
        });
        job.run();
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_priority() {
        let job = Job::with_priority(JobPriority::BACKGROUND, || {});
        assert_eq!(job.priority(), JobPriority::BACKGROUND);
        assert_eq!(Job::new(|| {}).priority(), JobPriority::default());
        assert!(JobPriority::HIGH > JobPriority::LOW);
        assert_eq!(JobPriority::from_raw(25), JobPriority::HIGH);
        job.run();
    }

    #[test]
    fn test_display() {
        let job = Job::new(|| {});
        assert_eq!(job.id().to_string(), format!("job-{}", job.id().as_u64()));
        job.run();
    }
}
