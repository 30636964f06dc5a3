//! Fuzzes timer configuration parsing and validation.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_config_json
#![no_main]
use libfuzzer_sys::fuzz_target;
use timer_guard::TimerConfig;

fuzz_target!(|data: &[u8]| {
    // Errors are expected on arbitrary bytes, panics are not.
    if let Ok(config) = serde_json::from_slice::<TimerConfig>(data) {
        let _ = config.validate();
    }
});
