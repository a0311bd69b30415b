#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(coverage_nightly, coverage(off))] // This is all test code, no need to test it.

//! Private helpers for testing and examples in `handle_pool` packages.

use std::panic;
use std::sync::mpsc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// How long a test waits before concluding that another thread is blocked rather than slow.
pub const BLOCKED_GRACE_PERIOD: Duration = Duration::from_millis(100);

/// Runs a test with a timeout, so a deadlocked test fails instead of hanging the test run.
///
/// The test runs on a separate thread. If it does not finish within 10 seconds (60 seconds
/// under Miri, where thread synchronization is much slower), the calling thread panics.
/// A panic inside the test is propagated to the caller unchanged.
///
/// When the `MUTATION_TESTING` environment variable is set to "1", the test runs directly on
/// the calling thread, so that mutation testing can detect mutations that cause hangs.
///
/// # Panics
///
/// Panics if the test exceeds the timeout or if the test itself panics.
///
/// # Example
///
/// ```rust
/// use testing::with_watchdog;
///
/// let answer = with_watchdog(|| 6 * 7);
/// assert_eq!(answer, 42);
/// ```
pub fn with_watchdog<F, R>(test_fn: F) -> R
where
    F: FnOnce() -> R + Send + 'static,
    R: Send + 'static,
{
    if std::env::var("MUTATION_TESTING").as_deref() == Ok("1") {
        return test_fn();
    }

    let (tx, rx) = mpsc::channel();

    let test_thread = thread::spawn(move || {
        // If this fails, the watchdog has already given up on us.
        drop(tx.send(test_fn()));
    });

    let timeout = if cfg!(miri) {
        Duration::from_secs(60)
    } else {
        Duration::from_secs(10)
    };

    match rx.recv_timeout(timeout) {
        Ok(result) => {
            test_thread
                .join()
                .expect("test thread already delivered its result");
            result
        }
        Err(mpsc::RecvTimeoutError::Timeout) => {
            panic!("test exceeded {timeout:?} timeout, most likely deadlocked");
        }
        Err(mpsc::RecvTimeoutError::Disconnected) => match test_thread.join() {
            Ok(()) => panic!("test thread exited without delivering a result"),
            Err(payload) => panic::resume_unwind(payload),
        },
    }
}

/// Asserts that `thread` has not finished after waiting [`BLOCKED_GRACE_PERIOD`].
///
/// Used to check that an operation on another thread is blocked on a lock held by the caller.
/// A slow but unblocked thread can make this pass spuriously, never fail spuriously.
///
/// # Panics
///
/// Panics if the thread has finished.
pub fn assert_still_blocked<T>(thread: &JoinHandle<T>) {
    thread::sleep(BLOCKED_GRACE_PERIOD);

    assert!(
        !thread.is_finished(),
        "thread finished while it was expected to be blocked"
    );
}
