//! Bounds for [`TimerGuard::wait_bounded`](crate::TimerGuard::wait_bounded).
//!
//! A plain timeout or deadline is a cancellation token without a cancel source,
//! so all three variants feed the same wait path: an optional deadline plus an
//! optional cancellation channel.

use crossbeam::channel::Receiver;
use std::convert::Infallible;
use std::time::{Duration, Instant};

use oneshot_timer::deadline_after;

use crate::cancel::CancelToken;

/// How long a bounded wait may block.
#[derive(Debug, Clone)]
pub enum WaitBound {
    /// Give up once this much time has passed since the wait started.
    Timeout(Duration),
    /// Give up at this instant. An instant in the past gives up immediately.
    Deadline(Instant),
    /// Give up when the token is cancelled or its deadline passes.
    Token(CancelToken),
}

impl WaitBound {
    /// The instant the wait gives up at, measured from `now` for timeouts.
    #[must_use]
    pub fn deadline_from(&self, now: Instant) -> Option<Instant> {
        match self {
            Self::Timeout(timeout) => Some(deadline_after(now, *timeout)),
            Self::Deadline(deadline) => Some(*deadline),
            Self::Token(token) => token.deadline(),
        }
    }

    pub(crate) fn cancel_source(&self) -> Option<&Receiver<Infallible>> {
        match self {
            Self::Token(token) => Some(token.cancelled_receiver()),
            Self::Timeout(_) | Self::Deadline(_) => None,
        }
    }
}

impl From<Duration> for WaitBound {
    fn from(timeout: Duration) -> Self {
        Self::Timeout(timeout)
    }
}

impl From<Instant> for WaitBound {
    fn from(deadline: Instant) -> Self {
        Self::Deadline(deadline)
    }
}

impl From<CancelToken> for WaitBound {
    fn from(token: CancelToken) -> Self {
        Self::Token(token)
    }
}

impl From<&CancelToken> for WaitBound {
    fn from(token: &CancelToken) -> Self {
        Self::Token(token.clone())
    }
}
