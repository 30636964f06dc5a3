//! Stop the timer before it fires.
//!
//! Run with:
//!   cargo run -p timer-guard --example stop

use std::time::Duration;
use timer_guard::TimerGuard;
use tracing::{Level, info};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_max_level(Level::DEBUG).init();

    let mut guard = TimerGuard::start(Duration::from_secs(2))?;

    if guard.stop() {
        info!(state = %guard.state(), "The timer is stopped before firing");
    }
    Ok(())
}
