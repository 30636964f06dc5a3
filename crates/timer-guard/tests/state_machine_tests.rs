//! Deterministic state machine tests over a manually fired timer.

use std::time::Duration;
use timer_guard::prelude::*;
use timer_test_helpers::prelude::*;

fn manual() -> (TimerGuard<ManualTimer>, ManualTrigger) {
    TimerGuard::manual(Duration::from_secs(1))
}

#[test]
fn test_full_cycle_lifecycle() -> TestResult {
    init_test_tracing();
    let (mut guard, trigger) = manual();

    // 1. Armed, nothing delivered
    assert_eq!(guard.state(), CycleState::Armed);
    must_none(guard.try_wait(), "nothing fired yet");

    // 2. Fire and consume
    assert!(trigger.fire());
    must_some(guard.wait_blocking(), "fired signal");
    assert_eq!(guard.state(), CycleState::Consumed);

    // 3. Every further wait in this cycle is empty
    must_none(guard.wait_blocking(), "consumed");
    must_none(guard.wait_bounded(Duration::from_secs(5)), "consumed");
    must_none(guard.try_wait(), "consumed");

    // 4. Reset opens a new cycle
    guard.reset(Duration::from_secs(2));
    assert_eq!(guard.state(), CycleState::Armed);
    assert_eq!(guard.cycle(), 1);
    assert_eq!(trigger.last_duration(), Duration::from_secs(2));

    // 5. Stop before it fires
    assert!(guard.stop());
    assert_eq!(guard.state(), CycleState::Stopped);
    assert!(!trigger.fire());
    Ok(())
}

#[test]
fn test_stop_preempting_leaves_nothing_to_drain() {
    let (mut guard, trigger) = manual();

    assert!(guard.stop());

    assert!(guard.timer().receiver().is_empty());
    assert_eq!(trigger.fire_count(), 0);
}

#[test]
fn test_stop_after_fire_without_read_drains() {
    let (mut guard, trigger) = manual();
    trigger.fire();

    assert!(!guard.stop());

    assert_eq!(guard.state(), CycleState::Consumed);
    assert!(guard.timer().receiver().is_empty());
    must_none(guard.wait_bounded(Duration::from_millis(10)), "drained");
}

#[test]
fn test_stop_after_read_does_not_block() {
    let (mut guard, trigger) = manual();
    trigger.fire();
    must_some(guard.wait_blocking(), "fired");

    let ((), elapsed) = measure(|| {
        assert!(!guard.stop());
    });

    assert!(elapsed < Duration::from_secs(1));
}

#[test]
fn test_repeated_stops_are_safe() {
    let (mut guard, trigger) = manual();
    trigger.fire();

    assert!(!guard.stop());
    assert!(!guard.stop());
    assert!(!guard.stop());
    assert_eq!(guard.state(), CycleState::Consumed);
}

#[test]
fn test_reset_after_unread_fire_opens_clean_cycle() {
    let (mut guard, trigger) = manual();
    trigger.fire();

    guard.reset(Duration::from_secs(1));

    must_none(guard.try_wait(), "stale signal leaked across reset");
    must_none(
        guard.wait_bounded(Duration::from_millis(20)),
        "stale signal leaked across reset",
    );
    assert_eq!(guard.state(), CycleState::Armed);
}

#[test]
fn test_reset_after_stop_rearms() {
    let (mut guard, trigger) = manual();
    assert!(guard.stop());

    guard.reset(Duration::from_secs(1));

    assert!(trigger.is_armed());
    assert!(trigger.fire());
    must_some(guard.wait_blocking(), "new cycle fires");
}

#[test]
fn test_many_cycles_each_yield_one_signal() {
    let (mut guard, trigger) = manual();

    for cycle in 0..50u64 {
        assert_eq!(guard.cycle(), cycle);
        if cycle % 3 != 0 {
            trigger.fire();
        }
        let got = guard.try_wait().is_some();
        assert_eq!(got, cycle % 3 != 0);
        must_none(guard.try_wait(), "second read in one cycle");
        guard.reset(Duration::from_millis(cycle));
    }
    assert_eq!(trigger.arm_count(), 51);
}

#[test]
fn test_expired_bounded_wait_then_stop_drains_late_signal() {
    let (mut guard, trigger) = manual();

    must_none(guard.wait_bounded(Duration::from_millis(5)), "not fired");
    trigger.fire();

    assert!(!guard.stop());
    assert!(guard.timer().receiver().is_empty());
}

#[test]
fn test_fire_from_delivery_thread_wakes_blocking_wait() -> TestResult {
    let (mut guard, trigger) = manual();

    let delivery = std::thread::spawn(move || {
        std::thread::sleep(Duration::from_millis(50));
        trigger.fire()
    });

    must_some(guard.wait_blocking(), "delivered from another thread");
    assert!(delivery.join().map_err(|_| "delivery thread panicked")?);
    Ok(())
}

#[test]
fn test_boxed_timer_is_guardable() {
    let (timer, trigger) = ManualTimer::armed(Duration::from_secs(1));
    let boxed: Box<dyn OneShotTimer + Send> = Box::new(timer);
    let mut guard = TimerGuard::new(boxed);

    trigger.fire();

    must_some(guard.wait_blocking(), "boxed timer delivers");
    assert!(!guard.stop());
}
