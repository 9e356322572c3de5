//! Process-level bootstrap for the executor pair

use crate::config::ExecutorConfig;
use crate::executor::{Executor, RunLoopExecutor, SchedulableExecutor, SerialExecutor};
use crate::fatal::FatalHandler;
use crate::job::Job;
use crate::main_loop::MainExecutor;
use crate::pool::PoolExecutor;
use crate::substrate::Substrate;
use std::sync::Arc;
use tether_clock::DeadlineClock;

/// Owns one main executor, one pool executor, and the fatal handler.
///
/// Every contract violation raised through the runtime goes to the fatal
/// handler; use the executors directly to observe errors as values.
pub struct ExecutorRuntime {
    main: Arc<MainExecutor>,
    pool: Arc<PoolExecutor>,
    fatal: FatalHandler,
}

impl ExecutorRuntime {
    /// Build fresh executors over `substrate`
    pub fn new(substrate: Arc<dyn Substrate>, config: &ExecutorConfig) -> Self {
        let main = MainExecutor::new(substrate.clone()).with_submission_logging(config.log_submissions);
        let pool = PoolExecutor::new(substrate).with_submission_logging(config.log_submissions);

        Self {
            main: Arc::new(main),
            pool: Arc::new(pool),
            fatal: FatalHandler::new(config.fatal_policy),
        }
    }

    /// The main-thread executor
    pub fn main_executor(&self) -> &Arc<MainExecutor> {
        &self.main
    }

    /// The pool executor
    pub fn pool_executor(&self) -> &Arc<PoolExecutor> {
        &self.pool
    }

    /// The fatal handler
    pub fn fatal_handler(&self) -> &FatalHandler {
        &self.fatal
    }

    /// Drive the main loop on the calling thread
    pub fn run_main(&self) {
        self.fatal.check(self.main.run())
    }

    /// Stop the main loop (always fatal)
    pub fn stop_main(&self) {
        self.fatal.check(self.main.stop())
    }

    /// Assert the calling thread is the main thread
    pub fn check_isolated(&self) {
        self.fatal.check(self.main.check_isolated())
    }

    /// Submit `job` to the main thread
    pub fn enqueue_main(&self, job: Job) {
        self.main.enqueue(job)
    }

    /// Submit `job` to the pool
    pub fn enqueue_pool(&self, job: Job) {
        self.pool.enqueue(job)
    }

    /// Submit `job` to the main thread at `instant`
    pub fn enqueue_main_at<C>(
        &self,
        job: Job,
        instant: C::Instant,
        tolerance: Option<C::Duration>,
        clock: &C,
    ) where
        C: DeadlineClock + ?Sized,
    {
        self.fatal
            .accept(self.main.enqueue_at(job, instant, tolerance, clock))
    }

    /// Submit `job` to the pool at `instant`
    pub fn enqueue_pool_at<C>(
        &self,
        job: Job,
        instant: C::Instant,
        tolerance: Option<C::Duration>,
        clock: &C,
    ) where
        C: DeadlineClock + ?Sized,
    {
        self.fatal
            .accept(self.pool.enqueue_at(job, instant, tolerance, clock))
    }
}
