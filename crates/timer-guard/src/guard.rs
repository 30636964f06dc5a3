//! The timer guard and its per-cycle state machine.
//!
//! A cycle starts when the guard is created or reset and ends once its fire
//! signal has been consumed or the timer was stopped before firing:
//!
//! ```text
//!            wait* returns Some            reset
//!   Armed ───────────────────────► Consumed ─────► Armed
//!     │   stop() after firing (drains)  ▲
//!     ├─────────────────────────────────┘
//!     │   stop() before firing                reset
//!     └──────────────────────────► Stopped ──────► Armed
//! ```
//!
//! `Consumed` and `Stopped` are terminal until the next reset: every wait
//! returns `None` without blocking.

use crossbeam::channel::{self, RecvError, TryRecvError};
use std::fmt;
use std::time::{Duration, Instant};

use oneshot_timer::{ManualTimer, ManualTrigger, OneShotTimer, ThreadTimer, TimerResult};

use crate::bound::WaitBound;

/// Where the current cycle stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CycleState {
    /// The fire signal has not been read; a wait may still return it.
    Armed,
    /// The fire signal was read by a wait or drained by `stop`.
    Consumed,
    /// The timer was stopped before it fired; no signal exists.
    Stopped,
}

impl CycleState {
    /// Whether no wait can return a signal until the next reset.
    #[inline]
    #[must_use]
    pub fn is_settled(self) -> bool {
        !matches!(self, Self::Armed)
    }
}

impl fmt::Display for CycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Armed => write!(f, "armed"),
            Self::Consumed => write!(f, "consumed"),
            Self::Stopped => write!(f, "stopped"),
        }
    }
}

/// Outcome of a non-blocking receive.
enum Delivery {
    Pending,
    Settled(Option<Instant>),
}

/// Sequences waits, stops and resets on one [`OneShotTimer`] so that no fire
/// signal is ever returned twice or carried over into a later cycle.
///
/// # Usage contract
///
/// All methods take `&mut self`; drive a guard from one thread of control at a
/// time. The wrapped timer may deliver from its own thread.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use timer_guard::TimerGuard;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut guard = TimerGuard::start(Duration::from_millis(20))?;
///
/// // Too short a bound: nothing yet, and the signal is kept for later.
/// assert!(guard.wait_bounded(Duration::from_millis(1)).is_none());
///
/// // The signal is returned exactly once.
/// assert!(guard.wait_blocking().is_some());
/// assert!(guard.wait_blocking().is_none());
///
/// // Rearm for another round.
/// guard.reset(Duration::from_millis(20));
/// assert!(guard.wait_blocking().is_some());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct TimerGuard<T: OneShotTimer> {
    timer: T,
    state: CycleState,
    cycle: u64,
}

impl<T: OneShotTimer> TimerGuard<T> {
    /// Wrap an already started timer. The guard begins in cycle 0, armed.
    pub fn new(timer: T) -> Self {
        Self {
            timer,
            state: CycleState::Armed,
            cycle: 0,
        }
    }

    /// Block until the timer fires and return its fire time.
    ///
    /// Returns `None` at once if this cycle's signal was already consumed or
    /// the timer was stopped. Blocks forever if the timer is never fired.
    pub fn wait_blocking(&mut self) -> Option<Instant> {
        if self.state.is_settled() {
            return None;
        }
        let fired = self.timer.receiver().recv();
        self.settle(fired)
    }

    /// Wait for the timer to fire, giving up when `bound` ends.
    ///
    /// `bound` is a [`Duration`], an [`Instant`], or a
    /// [`CancelToken`](crate::CancelToken) (by value or reference).
    ///
    /// Returns `None` at once if this cycle is settled. If the bound ends
    /// first, returns `None` and leaves the cycle armed: a signal arriving later
    /// is still returned by the next wait or drained by `stop`. A signal already
    /// delivered is returned even when the bound has ended. When both become
    /// ready while parked, either may win.
    pub fn wait_bounded(&mut self, bound: impl Into<WaitBound>) -> Option<Instant> {
        if self.state.is_settled() {
            return None;
        }
        if let Delivery::Settled(fired) = self.poll() {
            return fired;
        }

        let bound = bound.into();
        let expiry = bound
            .deadline_from(Instant::now())
            .map_or_else(channel::never, channel::at);
        let cancelled = bound
            .cancel_source()
            .cloned()
            .unwrap_or_else(channel::never);

        let fired = channel::select! {
            recv(self.timer.receiver()) -> fired => Some(fired),
            recv(expiry) -> _ => None,
            recv(cancelled) -> _ => None,
        };
        match fired {
            Some(fired) => self.settle(fired),
            None => {
                tracing::trace!(cycle = self.cycle, "Bounded wait ended before timer fired");
                None
            }
        }
    }

    /// Return the fire time if the signal is already available, without blocking.
    pub fn try_wait(&mut self) -> Option<Instant> {
        if self.state.is_settled() {
            return None;
        }
        match self.poll() {
            Delivery::Settled(fired) => fired,
            Delivery::Pending => None,
        }
    }

    /// Stop the timer, draining any delivered but unread signal.
    ///
    /// Returns `true` if the timer was stopped before it fired, `false` if it
    /// had already fired or been stopped. When the timer fired and this cycle's
    /// signal was never read, the signal is drained here, blocking until it is
    /// available. Afterwards no wait returns anything until the next reset.
    pub fn stop(&mut self) -> bool {
        let preempted = self.timer.stop();
        if self.state == CycleState::Armed {
            if preempted {
                self.state = CycleState::Stopped;
            } else {
                self.drain();
                self.state = CycleState::Consumed;
            }
        }
        tracing::trace!(cycle = self.cycle, preempted, state = %self.state, "Timer stopped");
        preempted
    }

    /// Rearm the timer to fire once, `after` from now, opening a new cycle.
    ///
    /// Stops and drains the previous cycle first, so a wait after `reset` can
    /// only observe the signal of this arming.
    pub fn reset(&mut self, after: Duration) {
        self.stop();
        self.timer.rearm(after);
        self.state = CycleState::Armed;
        self.cycle = self.cycle.wrapping_add(1);
        tracing::debug!(cycle = self.cycle, after = ?after, "Timer reset");
    }

    /// The current cycle's state.
    #[inline]
    #[must_use]
    pub fn state(&self) -> CycleState {
        self.state
    }

    /// Whether this cycle's signal has been taken or can never arrive.
    #[inline]
    #[must_use]
    pub fn is_consumed(&self) -> bool {
        self.state.is_settled()
    }

    /// Number of resets since the guard was created.
    #[inline]
    #[must_use]
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// The wrapped timer.
    #[inline]
    pub fn timer(&self) -> &T {
        &self.timer
    }

    /// Release the wrapped timer.
    pub fn into_inner(self) -> T {
        self.timer
    }

    fn poll(&mut self) -> Delivery {
        match self.timer.receiver().try_recv() {
            Ok(at) => Delivery::Settled(self.settle(Ok(at))),
            Err(TryRecvError::Empty) => Delivery::Pending,
            Err(TryRecvError::Disconnected) => Delivery::Settled(self.settle(Err(RecvError))),
        }
    }

    fn settle(&mut self, fired: Result<Instant, RecvError>) -> Option<Instant> {
        self.state = CycleState::Consumed;
        match fired {
            Ok(at) => {
                tracing::trace!(cycle = self.cycle, "Fire signal consumed");
                Some(at)
            }
            Err(RecvError) => {
                tracing::warn!(
                    cycle = self.cycle,
                    "Timer channel disconnected; no signal can arrive this cycle"
                );
                None
            }
        }
    }

    fn drain(&mut self) {
        let fired = self.timer.receiver();
        let drained = match fired.try_recv() {
            Ok(_) => true,
            // The stop lost the race with firing, so the delivery is committed.
            Err(TryRecvError::Empty) => fired.recv().is_ok(),
            Err(TryRecvError::Disconnected) => false,
        };
        tracing::debug!(cycle = self.cycle, drained, "Drained unread fire signal");
    }
}

impl TimerGuard<ThreadTimer> {
    /// Start a thread-backed timer firing `after` from now and guard it.
    ///
    /// # Errors
    ///
    /// Returns an error if the timer's worker thread cannot be spawned.
    pub fn start(after: Duration) -> TimerResult<Self> {
        Ok(Self::new(ThreadTimer::start(after)?))
    }
}

impl TimerGuard<ManualTimer> {
    /// Guard a manually fired timer, returning the trigger that fires it.
    #[must_use]
    pub fn manual(after: Duration) -> (Self, ManualTrigger) {
        let (timer, trigger) = ManualTimer::armed(after);
        (Self::new(timer), trigger)
    }
}
