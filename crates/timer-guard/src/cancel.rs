//! Deadline-bearing cancellation tokens.
//!
//! A [`CancelToken`] ends a bounded wait either when its deadline passes or when
//! someone calls [`CancelToken::cancel`]. Cancellation is broadcast by dropping
//! the sending half of a channel: every receiver, including ones parked inside a
//! `select!`, observes the disconnect at once.

use crossbeam::channel::{self, Receiver, Sender};
use parking_lot::Mutex;
use std::convert::Infallible;
use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};

use oneshot_timer::deadline_after;

#[derive(Debug)]
struct Live {
    trigger: Sender<Infallible>,
    children: Vec<Weak<Inner>>,
}

#[derive(Debug)]
struct Inner {
    deadline: Option<Instant>,
    cancelled: Receiver<Infallible>,
    /// `None` once cancelled.
    live: Mutex<Option<Live>>,
}

/// A cloneable cancellation token with an optional deadline.
///
/// Clones share state: cancelling one cancels all of them. Tokens made with
/// [`child`](Self::child) are cancelled along with their parent but can also be
/// cancelled on their own.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use timer_guard::CancelToken;
///
/// let token = CancelToken::with_timeout(Duration::from_secs(30));
/// let child = token.child();
/// assert!(!child.is_cancelled());
///
/// token.cancel();
/// assert!(child.is_cancelled());
/// ```
#[derive(Debug, Clone)]
pub struct CancelToken {
    inner: Arc<Inner>,
}

impl CancelToken {
    /// Create a token with no deadline; it ends only when cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::build(None)
    }

    /// Create a token that expires `timeout` from now.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::build(Some(deadline_after(Instant::now(), timeout)))
    }

    /// Create a token that expires at `deadline`.
    ///
    /// A deadline in the past yields a token that is already expired.
    #[must_use]
    pub fn with_deadline(deadline: Instant) -> Self {
        Self::build(Some(deadline))
    }

    fn build(deadline: Option<Instant>) -> Self {
        let (trigger, cancelled) = channel::bounded(0);
        Self {
            inner: Arc::new(Inner {
                deadline,
                cancelled,
                live: Mutex::new(Some(Live {
                    trigger,
                    children: Vec::new(),
                })),
            }),
        }
    }

    /// Create a child token inheriting this token's deadline.
    #[must_use]
    pub fn child(&self) -> Self {
        self.attach(Self::build(self.inner.deadline))
    }

    /// Create a child token that expires `timeout` from now, or at this token's
    /// deadline if that comes first.
    #[must_use]
    pub fn child_with_timeout(&self, timeout: Duration) -> Self {
        let own = deadline_after(Instant::now(), timeout);
        let deadline = self.inner.deadline.map_or(own, |parent| parent.min(own));
        self.attach(Self::build(Some(deadline)))
    }

    fn attach(&self, child: Self) -> Self {
        if let Some(live) = self.inner.live.lock().as_mut() {
            live.children.retain(|weak| weak.strong_count() > 0);
            live.children.push(Arc::downgrade(&child.inner));
            return child;
        }
        child.cancel();
        child
    }

    /// Cancel this token, its clones and every child derived from it.
    ///
    /// Cancelling twice is a no-op.
    pub fn cancel(&self) {
        let Some(live) = self.inner.live.lock().take() else {
            return;
        };
        drop(live.trigger);
        for child in live.children.iter().filter_map(Weak::upgrade) {
            Self { inner: child }.cancel();
        }
        tracing::trace!("Cancellation token cancelled");
    }

    /// Whether [`cancel`](Self::cancel) has been called on this token or an ancestor.
    #[must_use]
    pub fn is_explicitly_cancelled(&self) -> bool {
        self.inner.live.lock().is_none()
    }

    /// Whether the token has ended, by cancellation or by its deadline passing.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.is_explicitly_cancelled() || self.is_expired()
    }

    /// Whether the deadline, if any, has passed.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.inner
            .deadline
            .is_some_and(|deadline| Instant::now() >= deadline)
    }

    /// The instant this token expires, if it has a deadline.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.inner.deadline
    }

    /// Time left before the deadline; zero once it has passed.
    #[must_use]
    pub fn remaining(&self) -> Option<Duration> {
        self.inner
            .deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    /// Channel that becomes disconnected when the token is cancelled.
    pub(crate) fn cancelled_receiver(&self) -> &Receiver<Infallible> {
        &self.inner.cancelled
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}
