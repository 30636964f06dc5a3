//! The one-shot timer contract.

use crossbeam::channel::Receiver;
use std::time::{Duration, Instant};

/// Offset used in place of deadlines that would overflow [`Instant`] (~30 years).
pub const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// A timer that delivers its fire time on a channel, at most once per arming.
///
/// # Contract
///
/// - Arming schedules exactly one future delivery on [`receiver`](Self::receiver).
/// - [`stop`](Self::stop) may be called any number of times. It reports `true`
///   only when it preempted a pending delivery. Once it reports `false` for a
///   timer that has fired, the delivery is committed: it is in the channel or
///   will be shortly.
/// - [`rearm`](Self::rearm) must only follow a `stop`. Rearming a timer whose
///   previous signal is still unread leaves that stale signal in the channel.
pub trait OneShotTimer {
    /// The channel the fire time is delivered on.
    fn receiver(&self) -> &Receiver<Instant>;

    /// Disarm the timer.
    ///
    /// Returns `true` if the call prevented the timer from firing, `false` if
    /// it had already fired or been stopped.
    fn stop(&mut self) -> bool;

    /// Arm the timer to fire once, `after` from now.
    fn rearm(&mut self, after: Duration);
}

impl<T: OneShotTimer + ?Sized> OneShotTimer for Box<T> {
    fn receiver(&self) -> &Receiver<Instant> {
        (**self).receiver()
    }

    fn stop(&mut self) -> bool {
        (**self).stop()
    }

    fn rearm(&mut self, after: Duration) {
        (**self).rearm(after);
    }
}

/// Compute the instant `after` from `now`, clamping overflow to [`FAR_FUTURE`].
#[must_use]
pub fn deadline_after(now: Instant, after: Duration) -> Instant {
    now.checked_add(after)
        .or_else(|| now.checked_add(FAR_FUTURE))
        .unwrap_or(now)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deadline_after_adds_duration() {
        let now = Instant::now();
        let at = deadline_after(now, Duration::from_millis(250));
        assert_eq!(at.duration_since(now), Duration::from_millis(250));
    }

    #[test]
    fn test_deadline_after_clamps_overflow() {
        let now = Instant::now();
        let at = deadline_after(now, Duration::MAX);
        assert!(at > now);
        assert!(at.duration_since(now) <= FAR_FUTURE);
    }

    #[test]
    fn test_deadline_after_zero_is_now() {
        let now = Instant::now();
        assert_eq!(deadline_after(now, Duration::ZERO), now);
    }
}
