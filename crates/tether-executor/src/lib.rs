//! Tether Executor - bridge between a concurrency runtime and a job substrate
//!
//! Two executors accept [`Job`]s from the runtime and hand them to a
//! [`Substrate`], either immediately or at a deadline measured by any
//! [`DeadlineClock`](tether_clock::DeadlineClock):
//!
//! - [`MainExecutor`] owns the substrate's main thread and drives its
//!   blocking main loop.
//! - [`PoolExecutor`] submits to the substrate's concurrent pool.
//!
//! Contract violations (running the main loop twice, stopping it, claiming
//! isolation from the wrong thread) come back as [`ExecutorError`] values;
//! [`ExecutorRuntime`] routes them to a single [`FatalHandler`] that
//! terminates the process.

#![warn(missing_docs)]

mod config;
mod error;
mod executor;
mod fatal;
mod job;
mod main_loop;
mod pool;
mod runtime;
pub mod substrate;

pub use config::{ExecutorConfig, FATAL_POLICY_ENV, LOG_SUBMISSIONS_ENV};
pub use error::{ConfigError, ExecutorError, Rejected};
pub use executor::{Executor, RunLoopExecutor, SchedulableExecutor, SerialExecutor};
pub use fatal::{FatalHandler, FatalPolicy};
pub use job::{Job, JobId, JobPriority};
pub use main_loop::{MainExecutor, RunState};
pub use pool::PoolExecutor;
pub use runtime::ExecutorRuntime;
pub use substrate::{Affinity, DeadlineTarget, RecordingSubstrate, Submission, Substrate};

pub use tether_clock::{CanonicalDeadline, ClockDomain, Leeway};
