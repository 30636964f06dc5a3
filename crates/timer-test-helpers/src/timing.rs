//! Elapsed-time helpers for tests that run against real clocks.
//!
//! Timer tests cannot expect exact durations. These helpers compare a measured
//! duration against an expectation within [`ELAPSED_TOLERANCE`], which is wide
//! enough for loaded CI machines but far tighter than the gaps between the
//! scenarios being told apart (e.g. 500ms vs 1s).

use std::time::{Duration, Instant};

/// Default allowed deviation for elapsed-time assertions.
pub const ELAPSED_TOLERANCE: Duration = Duration::from_millis(150);

/// Run `f`, returning its output and how long it took.
pub fn measure<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let start = Instant::now();
    let out = f();
    (out, start.elapsed())
}

/// Absolute difference between two durations.
#[must_use]
pub fn abs_diff(a: Duration, b: Duration) -> Duration {
    if a > b { a - b } else { b - a }
}

/// Assert that a measured duration is within a tolerance of the expected one.
///
/// Uses [`ELAPSED_TOLERANCE`] when no tolerance is given.
///
/// ```rust
/// use std::time::Duration;
/// use timer_test_helpers::assert_elapsed_near;
///
/// assert_elapsed_near!(Duration::from_millis(1010), Duration::from_secs(1));
/// assert_elapsed_near!(
///     Duration::from_millis(95),
///     Duration::from_millis(100),
///     Duration::from_millis(10),
/// );
/// ```
#[macro_export]
macro_rules! assert_elapsed_near {
    ($elapsed:expr, $expected:expr $(,)?) => {
        $crate::assert_elapsed_near!($elapsed, $expected, $crate::timing::ELAPSED_TOLERANCE)
    };
    ($elapsed:expr, $expected:expr, $tolerance:expr $(,)?) => {{
        let elapsed: ::std::time::Duration = $elapsed;
        let expected: ::std::time::Duration = $expected;
        let tolerance: ::std::time::Duration = $tolerance;
        let diff = $crate::timing::abs_diff(elapsed, expected);
        if diff > tolerance {
            panic!(
                "assertion failed: elapsed not near expected\n  elapsed: `{:?}`,\n expected: `{:?}`,\n     diff: `{:?}`,\ntolerance: `{:?}`",
                elapsed, expected, diff, tolerance
            );
        }
    }};
}

/// Assert that a measured duration is at least the expected one.
///
/// Sleeps and timers may overshoot but never undershoot, so lower bounds can be
/// checked without tolerance.
#[macro_export]
macro_rules! assert_elapsed_at_least {
    ($elapsed:expr, $minimum:expr $(,)?) => {{
        let elapsed: ::std::time::Duration = $elapsed;
        let minimum: ::std::time::Duration = $minimum;
        if elapsed < minimum {
            panic!(
                "assertion failed: elapsed shorter than minimum\n elapsed: `{:?}`,\n minimum: `{:?}`",
                elapsed, minimum
            );
        }
    }};
}
