//! The one place executor contract violations terminate the process

use crate::error::{ExecutorError, Rejected};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a [`FatalHandler`] terminates
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FatalPolicy {
    /// Abort the process immediately
    #[default]
    Abort,
    /// Panic, so embedders and tests can observe the failure by unwinding
    Panic,
}

impl FromStr for FatalPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "abort" => Ok(FatalPolicy::Abort),
            "panic" => Ok(FatalPolicy::Panic),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for FatalPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FatalPolicy::Abort => write!(f, "abort"),
            FatalPolicy::Panic => write!(f, "panic"),
        }
    }
}

/// Terminates the process on executor contract violations
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct FatalHandler {
    policy: FatalPolicy,
}

impl FatalHandler {
    /// Create a handler with the given policy
    pub fn new(policy: FatalPolicy) -> Self {
        Self { policy }
    }

    /// Configured policy
    pub fn policy(&self) -> FatalPolicy {
        self.policy
    }

    /// Report `error` and terminate
    pub fn fail(&self, error: &ExecutorError) -> ! {
        tracing::error!(%error, policy = %self.policy, "fatal executor error");
        match self.policy {
            FatalPolicy::Abort => {
                eprintln!("fatal error: {}", error);
                std::process::abort()
            }
            FatalPolicy::Panic => panic!("fatal error: {}", error),
        }
    }

    /// Unwrap `result`, terminating on error
    pub fn check<T>(&self, result: Result<T, ExecutorError>) -> T {
        match result {
            Ok(value) => value,
            Err(error) => self.fail(&error),
        }
    }

    /// Accept a submission result, terminating if the job was rejected.
    ///
    /// The rejected job is dropped only after the error has been reported.
    pub fn accept(&self, result: Result<(), Rejected>) {
        if let Err(rejected) = result {
            let (job, error) = rejected.into_parts();
            tracing::error!(job = %job.id(), "job rejected by executor");
            self.fail(&error)
        }
    }
}
