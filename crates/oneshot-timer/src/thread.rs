//! Thread-backed one-shot timer.
//!
//! Each [`ThreadTimer`] owns one worker thread that sleeps on a condition
//! variable until the armed deadline passes or the schedule changes. The worker
//! sends the fire time while holding the schedule lock, so a `stop` that finds
//! the timer disarmed knows the signal is already in the channel.

use crossbeam::channel::{self, Receiver, Sender, TrySendError};
use parking_lot::{Condvar, Mutex};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::config::TimerConfig;
use crate::error::{TimerError, TimerResult};
use crate::timer::{OneShotTimer, deadline_after};

#[derive(Debug)]
struct Schedule {
    deadline: Option<Instant>,
    shutdown: bool,
}

#[derive(Debug)]
struct Shared {
    schedule: Mutex<Schedule>,
    changed: Condvar,
}

/// One-shot timer driven by a dedicated worker thread.
///
/// # Example
///
/// ```rust
/// use oneshot_timer::{OneShotTimer, ThreadTimer};
/// use std::time::Duration;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut timer = ThreadTimer::start(Duration::from_secs(60))?;
/// assert!(timer.stop(), "stopped before firing");
/// assert!(!timer.stop(), "second stop has nothing to preempt");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ThreadTimer {
    shared: Arc<Shared>,
    fired: Receiver<Instant>,
    worker: Option<JoinHandle<()>>,
}

impl ThreadTimer {
    /// Start a timer that fires once, `after` from now, using the default config.
    ///
    /// # Errors
    ///
    /// Returns [`TimerError::Spawn`] if the worker thread cannot be created.
    pub fn start(after: Duration) -> TimerResult<Self> {
        Self::start_with_config(after, &TimerConfig::default())
    }

    /// Start a timer that fires once, `after` from now.
    ///
    /// # Errors
    ///
    /// Returns [`TimerError::InvalidConfiguration`] if `config` does not validate,
    /// or [`TimerError::Spawn`] if the worker thread cannot be created.
    pub fn start_with_config(after: Duration, config: &TimerConfig) -> TimerResult<Self> {
        config.validate()?;

        let shared = Arc::new(Shared {
            schedule: Mutex::new(Schedule {
                deadline: Some(deadline_after(Instant::now(), after)),
                shutdown: false,
            }),
            changed: Condvar::new(),
        });
        let (tx, fired) = channel::bounded(1);

        let mut builder = thread::Builder::new().name(config.thread_name.clone());
        if let Some(stack_size) = config.stack_size {
            builder = builder.stack_size(stack_size);
        }
        let worker_shared = Arc::clone(&shared);
        let worker = builder
            .spawn(move || run_worker(&worker_shared, &tx))
            .map_err(TimerError::spawn)?;

        tracing::trace!(after = ?after, thread = %config.thread_name, "Timer started");

        Ok(Self {
            shared,
            fired,
            worker: Some(worker),
        })
    }

    /// Whether a delivery is currently scheduled.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.shared.schedule.lock().deadline.is_some()
    }

    /// The instant the pending delivery is scheduled for, if armed.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.shared.schedule.lock().deadline
    }
}

impl OneShotTimer for ThreadTimer {
    fn receiver(&self) -> &Receiver<Instant> {
        &self.fired
    }

    fn stop(&mut self) -> bool {
        let mut schedule = self.shared.schedule.lock();
        let preempted = schedule.deadline.take().is_some();
        if preempted {
            self.shared.changed.notify_one();
        }
        preempted
    }

    fn rearm(&mut self, after: Duration) {
        let mut schedule = self.shared.schedule.lock();
        schedule.deadline = Some(deadline_after(Instant::now(), after));
        self.shared.changed.notify_one();
    }
}

impl Drop for ThreadTimer {
    fn drop(&mut self) {
        {
            let mut schedule = self.shared.schedule.lock();
            schedule.shutdown = true;
            self.shared.changed.notify_one();
        }
        if let Some(worker) = self.worker.take()
            && worker.join().is_err()
        {
            tracing::error!("Timer worker thread panicked");
        }
    }
}

fn run_worker(shared: &Shared, tx: &Sender<Instant>) {
    let mut schedule = shared.schedule.lock();
    loop {
        if schedule.shutdown {
            return;
        }
        let Some(at) = schedule.deadline else {
            shared.changed.wait(&mut schedule);
            continue;
        };

        let now = Instant::now();
        if now < at {
            // Spurious and schedule-change wakeups both fall through to a recheck.
            let _timed_out = shared.changed.wait_until(&mut schedule, at);
            continue;
        }

        schedule.deadline = None;
        match tx.try_send(now) {
            Ok(()) => tracing::trace!("Timer fired"),
            Err(TrySendError::Full(_)) => {
                tracing::warn!("Previous fire signal still unread; dropping new signal");
            }
            Err(TrySendError::Disconnected(_)) => return,
        }
    }
}
