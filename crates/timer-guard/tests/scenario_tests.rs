//! Timing scenarios against the thread-backed timer.
//!
//! Elapsed times are checked within a tolerance band; exact outcomes at a
//! fire/bound tie are never asserted.

use std::time::{Duration, Instant};
use timer_guard::prelude::*;
use timer_test_helpers::prelude::*;

const SECOND: Duration = Duration::from_secs(1);

#[test]
fn test_blocking_wait_returns_after_timer_duration() -> TestResult {
    init_test_tracing();
    let mut guard = TimerGuard::start(SECOND)?;

    let (fired, elapsed) = measure(|| guard.wait_blocking());

    must_some(fired, "timer should fire");
    assert_elapsed_near!(elapsed, SECOND);
    Ok(())
}

#[test]
fn test_blocking_wait_on_two_second_timer() -> TestResult {
    let mut guard = TimerGuard::start(2 * SECOND)?;

    let (fired, elapsed) = measure(|| guard.wait_blocking());

    must_some(fired, "timer should fire");
    assert_elapsed_near!(elapsed, 2 * SECOND);
    Ok(())
}

#[test]
fn test_bound_already_expired_returns_immediately() -> TestResult {
    let mut guard = TimerGuard::start(SECOND)?;
    let past = Instant::now()
        .checked_sub(SECOND)
        .ok_or("clock too close to its epoch")?;

    let (fired, elapsed) = measure(|| guard.wait_bounded(past));

    must_none(fired, "expired bound should not wait for the timer");
    assert_elapsed_near!(elapsed, Duration::ZERO);
    assert_eq!(guard.state(), CycleState::Armed);
    Ok(())
}

#[test]
fn test_short_bound_expires_and_signal_is_preserved() -> TestResult {
    init_test_tracing();
    let start = Instant::now();
    let mut guard = TimerGuard::start(SECOND)?;

    let (fired, elapsed) = measure(|| guard.wait_bounded(Duration::from_millis(500)));
    must_none(fired, "bound should expire first");
    assert_elapsed_near!(elapsed, Duration::from_millis(500));

    must_some(guard.wait_blocking(), "signal should survive the expired bound");
    assert_elapsed_near!(start.elapsed(), SECOND);
    Ok(())
}

#[test]
fn test_long_bound_returns_signal_when_timer_fires() -> TestResult {
    let mut guard = TimerGuard::start(SECOND)?;

    let (fired, elapsed) = measure(|| guard.wait_bounded(Duration::from_millis(1100)));

    must_some(fired, "timer fires before the bound");
    assert_elapsed_near!(elapsed, SECOND);
    Ok(())
}

#[test]
fn test_token_bound_behaves_like_timeout() -> TestResult {
    let mut guard = TimerGuard::start(SECOND)?;
    let token = CancelToken::with_timeout(Duration::from_millis(500));

    let (fired, elapsed) = measure(|| guard.wait_bounded(&token));

    must_none(fired, "token deadline should pass first");
    assert_elapsed_near!(elapsed, Duration::from_millis(500));
    assert!(token.is_expired());
    Ok(())
}

#[test]
fn test_stop_before_fire_then_bounded_wait_is_empty() -> TestResult {
    let mut guard = TimerGuard::start(SECOND)?;

    assert!(guard.stop());
    let (fired, elapsed) = measure(|| guard.wait_bounded(SECOND));

    must_none(fired, "stopped timer must not deliver");
    assert!(elapsed < SECOND, "settled cycle should not block");
    assert_eq!(guard.state(), CycleState::Stopped);
    Ok(())
}

#[test]
fn test_stop_after_consumed_read_then_wait_is_empty() -> TestResult {
    let mut guard = TimerGuard::start(Duration::from_millis(100))?;
    must_some(guard.wait_blocking(), "timer should fire");

    assert!(!guard.stop());

    must_none(guard.wait_bounded(SECOND), "signal already consumed");
    Ok(())
}

#[test]
fn test_stop_after_unread_fire_drains_signal() -> TestResult {
    init_test_tracing();
    let mut guard = TimerGuard::start(Duration::from_millis(100))?;
    std::thread::sleep(Duration::from_millis(300));

    assert!(!guard.stop(), "timer already fired");

    must_none(guard.wait_bounded(SECOND), "drained signal must not resurface");
    assert!(guard.timer().receiver().is_empty());
    Ok(())
}

#[test]
fn test_reset_after_consumed_read_times_from_reset() -> TestResult {
    let mut guard = TimerGuard::start(SECOND)?;
    must_some(guard.wait_blocking(), "first cycle fires");

    guard.reset(Duration::from_millis(1500));
    let (fired, elapsed) = measure(|| guard.wait_blocking());

    must_some(fired, "second cycle fires");
    assert_elapsed_near!(elapsed, Duration::from_millis(1500));
    assert_eq!(guard.cycle(), 1);
    Ok(())
}

#[test]
fn test_reset_before_fire_times_from_reset() -> TestResult {
    let mut guard = TimerGuard::start(SECOND)?;

    guard.reset(Duration::from_millis(1500));
    let (fired, elapsed) = measure(|| guard.wait_blocking());

    must_some(fired, "rearmed timer fires");
    assert_elapsed_near!(elapsed, Duration::from_millis(1500));
    Ok(())
}

#[test]
fn test_reset_after_unread_fire_does_not_observe_stale_signal() -> TestResult {
    init_test_tracing();
    let mut guard = TimerGuard::start(Duration::from_millis(100))?;
    std::thread::sleep(Duration::from_millis(300));

    guard.reset(Duration::from_millis(500));
    let (fired, elapsed) = measure(|| guard.wait_blocking());

    must_some(fired, "rearmed timer fires");
    assert_elapsed_near!(elapsed, Duration::from_millis(500));
    Ok(())
}

#[test]
fn test_fire_time_belongs_to_current_cycle() -> TestResult {
    let mut guard = TimerGuard::start(Duration::from_millis(50))?;
    std::thread::sleep(Duration::from_millis(200));

    let reset_at = Instant::now();
    guard.reset(Duration::from_millis(100));
    let fired_at = must_some(guard.wait_blocking(), "rearmed timer fires");

    assert!(fired_at >= reset_at + Duration::from_millis(100));
    Ok(())
}
