//! Integration tests for runtime bootstrap and configuration

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tether_clock::{ClockDomain, ClockTraits, BoundClock, TimeComponents};
use tether_executor::{
    ExecutorConfig, ExecutorRuntime, FatalPolicy, Job, RecordingSubstrate, Submission,
};

fn seconds(instant: i64, _target: ClockDomain) -> Option<TimeComponents> {
    Some(TimeComponents::new(instant, 0))
}

fn seconds_duration(duration: i64) -> Option<TimeComponents> {
    Some(TimeComponents::new(duration, 0))
}

fn unrelated(_instant: i64, _target: ClockDomain) -> Option<TimeComponents> {
    None
}

fn panicking_runtime() -> (Arc<RecordingSubstrate>, ExecutorRuntime) {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let substrate = Arc::new(RecordingSubstrate::new());
    let config = ExecutorConfig {
        fatal_policy: FatalPolicy::Panic,
        log_submissions: false,
    };
    let runtime = ExecutorRuntime::new(substrate.clone(), &config);
    (substrate, runtime)
}

#[test]
fn test_config_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "fatal_policy = \"panic\"").unwrap();
    writeln!(file, "log_submissions = true").unwrap();

    let config = ExecutorConfig::from_file(file.path()).unwrap();
    assert_eq!(config.fatal_policy, FatalPolicy::Panic);
    assert!(config.log_submissions);
}

#[test]
fn test_runtime_routes_to_both_executors() {
    let (substrate, runtime) = panicking_runtime();
    let count = Arc::new(AtomicUsize::new(0));
    let clock: BoundClock<i64, i64> =
        BoundClock::new(ClockTraits::MONOTONIC, seconds, seconds_duration);

    for _ in 0..2 {
        let c = count.clone();
        runtime.enqueue_pool(Job::new(move || {
            c.fetch_add(1, Ordering::SeqCst);
        }));
    }
    let c = count.clone();
    runtime.enqueue_main(Job::new(move || {
        c.fetch_add(1, Ordering::SeqCst);
    }));
    let c = count.clone();
    runtime.enqueue_pool_at(
        Job::new(move || {
            c.fetch_add(1, Ordering::SeqCst);
        }),
        12,
        Some(1),
        &clock,
    );
    let c = count.clone();
    runtime.enqueue_main_at(
        Job::new(move || {
            c.fetch_add(1, Ordering::SeqCst);
        }),
        -4,
        None,
        &clock,
    );

    let kinds = {
        let submissions = substrate.take_all();
        let kinds: Vec<&str> = submissions
            .iter()
            .map(|s| match s {
                Submission::Main(_) => "main",
                Submission::Global(_) => "global",
                Submission::Deadline(target, _) if target.is_pool() => "pool-deadline",
                Submission::Deadline(..) => "main-deadline",
            })
            .collect();
        for s in submissions {
            s.into_job().run();
        }
        kinds
    };

    assert_eq!(
        kinds,
        vec!["global", "global", "main", "pool-deadline", "main-deadline"]
    );
    assert_eq!(count.load(Ordering::SeqCst), 5);
}

#[test]
fn test_run_main_then_check_isolated() {
    let (substrate, runtime) = panicking_runtime();
    runtime.run_main();
    runtime.check_isolated();
    assert_eq!(substrate.loop_entries(), 1);
}

#[test]
#[should_panic(expected = "main executor cannot be stopped")]
fn test_stop_main_is_fatal() {
    let (_substrate, runtime) = panicking_runtime();
    runtime.stop_main();
}

#[test]
#[should_panic(expected = "expected to be running on the main thread")]
fn test_isolation_violation_is_fatal() {
    let (substrate, runtime) = panicking_runtime();
    let elsewhere = std::thread::spawn(|| std::thread::current().id())
        .join()
        .unwrap();
    substrate.designate_main_thread(elsewhere);
    runtime.check_isolated();
}

#[test]
#[should_panic(expected = "unsupported deadline clock")]
fn test_unrelated_clock_is_fatal() {
    let (_substrate, runtime) = panicking_runtime();
    let clock: BoundClock<i64, i64> =
        BoundClock::new(ClockTraits::CONTINUOUS, unrelated, seconds_duration);
    runtime.enqueue_pool_at(Job::new(|| {}), 1, None, &clock);
}
