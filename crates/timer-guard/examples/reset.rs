//! Reuse one timer across several rounds.
//!
//! Run with:
//!   cargo run -p timer-guard --example reset

use std::thread;
use std::time::{Duration, Instant};
use timer_guard::TimerGuard;
use tracing::{Level, info};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_max_level(Level::DEBUG).init();

    let mut guard = TimerGuard::start(Duration::from_millis(200))?;

    // Let the first round fire without reading it; reset drains the leftover.
    thread::sleep(Duration::from_millis(500));

    for round in 1..=3 {
        let start = Instant::now();
        guard.reset(Duration::from_millis(300));
        if guard.wait_blocking().is_some() {
            info!(round, cycle = guard.cycle(), elapsed = ?start.elapsed(), "Round fired");
        }
    }
    Ok(())
}
