//! Executor error types

use crate::job::Job;
use tether_clock::ClockError;

/// Executor contract violations.
///
/// None of these are recoverable runtime conditions; they are returned as
/// values so a single top-level handler can decide how to terminate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExecutorError {
    /// `run` was called on a main executor that is already running
    #[error("main executor does not support recursion")]
    RecursiveRunNotSupported,

    /// `stop` was called on the main executor
    #[error("main executor cannot be stopped")]
    StopNotSupported,

    /// Isolation was checked from a thread other than the main thread
    #[error("expected to be running on the main thread, found {thread}")]
    IsolationViolation {
        /// Name (or id) of the offending thread
        thread: String,
    },

    /// A deadline clock could not be related to either canonical clock
    #[error("unsupported deadline clock: {0}")]
    UnrelatedClock(#[from] ClockError),
}

/// A job the executor refused, handed back to the caller.
#[derive(Debug, thiserror::Error)]
#[error("job {id} rejected: {error}", id = .job.id())]
pub struct Rejected {
    /// The job that was not submitted
    pub job: Job,
    /// Why it was not submitted
    #[source]
    pub error: ExecutorError,
}

impl Rejected {
    /// Pair a job with the reason it was refused
    pub fn new(job: Job, error: ExecutorError) -> Self {
        Self { job, error }
    }

    /// Split into the job and the error
    pub fn into_parts(self) -> (Job, ExecutorError) {
        (self.job, self.error)
    }
}

/// Errors that can occur while loading executor configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value (usually from the environment) was not understood
    #[error("Invalid value for {key}: {value}")]
    InvalidValue {
        /// Setting that was being read
        key: String,
        /// Offending value
        value: String,
    },
}
