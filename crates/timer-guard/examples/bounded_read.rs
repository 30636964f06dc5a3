//! Wait for the timer with a bound, then pick up the signal later.
//!
//! Run with:
//!   cargo run -p timer-guard --example bounded_read

use std::time::{Duration, Instant};
use timer_guard::{CancelToken, TimerGuard};
use tracing::{Level, info};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_max_level(Level::DEBUG).init();

    let start = Instant::now();
    let mut guard = TimerGuard::start(Duration::from_secs(2))?;

    if guard.wait_bounded(Duration::from_secs(1)).is_none() {
        info!(elapsed = ?start.elapsed(), "Timed out before the timer firing");
    }

    let token = CancelToken::with_timeout(Duration::from_secs(5));
    if guard.wait_bounded(&token).is_some() {
        info!(elapsed = ?start.elapsed(), "The timer fires; the signal was kept");
    }
    Ok(())
}
