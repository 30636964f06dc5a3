//! Fuzzes arbitrary wait/stop/reset sequences against a manually fired timer.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_guard_ops
#![no_main]
use libfuzzer_sys::fuzz_target;
use std::time::Duration;
use timer_guard::prelude::*;

fuzz_target!(|data: &[u8]| {
    let (mut guard, trigger) = TimerGuard::manual(Duration::from_secs(1));
    let mut yielded_this_cycle = 0u32;

    for &byte in data.iter().take(512) {
        let got = match byte % 7 {
            0 => {
                trigger.fire();
                None
            }
            1 => guard.try_wait(),
            2 => {
                // Only block when it cannot park forever.
                if guard.state() == CycleState::Armed && guard.timer().receiver().is_empty() {
                    None
                } else {
                    guard.wait_blocking()
                }
            }
            3 => guard.wait_bounded(Duration::ZERO),
            4 => {
                let token = CancelToken::new();
                token.cancel();
                guard.wait_bounded(&token)
            }
            5 => {
                guard.stop();
                assert!(guard.is_consumed());
                assert!(guard.timer().receiver().is_empty());
                None
            }
            _ => {
                guard.reset(Duration::from_millis(u64::from(byte)));
                yielded_this_cycle = 0;
                assert_eq!(guard.state(), CycleState::Armed);
                assert!(guard.timer().receiver().is_empty());
                None
            }
        };

        if got.is_some() {
            yielded_this_cycle += 1;
        }
        assert!(yielded_this_cycle <= 1, "more than one signal in a cycle");
    }
});
