//! Wait, without a bound, for the timer to fire.
//!
//! Run with:
//!   cargo run -p timer-guard --example blocking_read

use std::time::{Duration, Instant};
use timer_guard::TimerGuard;
use tracing::{Level, info};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_max_level(Level::DEBUG).init();

    let start = Instant::now();
    let mut guard = TimerGuard::start(Duration::from_secs(2))?;

    if guard.wait_blocking().is_some() {
        info!(elapsed = ?start.elapsed(), "The timer fires");
    }
    Ok(())
}
