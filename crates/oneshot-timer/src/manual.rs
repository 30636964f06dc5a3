//! Manually fired one-shot timer.
//!
//! [`ManualTimer`] never fires on its own. Its paired [`ManualTrigger`] stands in
//! for the timer's delivery thread: tests call [`ManualTrigger::fire`] at exactly
//! the point in a sequence where they want the signal to land.

use crossbeam::channel::{self, Receiver, Sender, TrySendError};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::timer::OneShotTimer;

#[derive(Debug)]
struct ManualState {
    armed: bool,
    last_duration: Duration,
    arm_count: u64,
    fire_count: u64,
}

/// A one-shot timer fired only through its [`ManualTrigger`].
#[derive(Debug)]
pub struct ManualTimer {
    state: Arc<Mutex<ManualState>>,
    fired: Receiver<Instant>,
}

/// Fires the paired [`ManualTimer`]. Cheap to clone and sendable across threads.
#[derive(Debug, Clone)]
pub struct ManualTrigger {
    state: Arc<Mutex<ManualState>>,
    tx: Sender<Instant>,
}

impl ManualTimer {
    /// Create an armed timer and the trigger that fires it.
    ///
    /// `after` is only recorded; nothing fires until [`ManualTrigger::fire`].
    #[must_use]
    pub fn armed(after: Duration) -> (Self, ManualTrigger) {
        let state = Arc::new(Mutex::new(ManualState {
            armed: true,
            last_duration: after,
            arm_count: 1,
            fire_count: 0,
        }));
        let (tx, fired) = channel::bounded(1);
        let timer = Self {
            state: Arc::clone(&state),
            fired,
        };
        (timer, ManualTrigger { state, tx })
    }
}

impl OneShotTimer for ManualTimer {
    fn receiver(&self) -> &Receiver<Instant> {
        &self.fired
    }

    fn stop(&mut self) -> bool {
        let mut state = self.state.lock();
        std::mem::replace(&mut state.armed, false)
    }

    fn rearm(&mut self, after: Duration) {
        let mut state = self.state.lock();
        state.armed = true;
        state.last_duration = after;
        state.arm_count = state.arm_count.saturating_add(1);
    }
}

impl ManualTrigger {
    /// Deliver the fire signal if the timer is armed.
    ///
    /// Returns `true` if a delivery was committed. Firing a stopped or already
    /// fired timer does nothing and returns `false`.
    pub fn fire(&self) -> bool {
        let mut state = self.state.lock();
        if !state.armed {
            return false;
        }
        state.armed = false;
        state.fire_count = state.fire_count.saturating_add(1);
        match self.tx.try_send(Instant::now()) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                tracing::warn!("Previous fire signal still unread; dropping new signal");
                true
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }

    /// Whether a delivery is currently scheduled.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.state.lock().armed
    }

    /// Number of times the timer has been armed, including the initial arming.
    #[must_use]
    pub fn arm_count(&self) -> u64 {
        self.state.lock().arm_count
    }

    /// Number of deliveries committed by [`fire`](Self::fire).
    #[must_use]
    pub fn fire_count(&self) -> u64 {
        self.state.lock().fire_count
    }

    /// Duration passed to the most recent arming.
    #[must_use]
    pub fn last_duration(&self) -> Duration {
        self.state.lock().last_duration
    }
}
