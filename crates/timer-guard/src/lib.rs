//! # timer-guard
//!
//! Race-free sequencing of waits, stops and resets on a single-shot timer.
//!
//! A one-shot timer that delivers on a channel is easy to misuse. If it is
//! stopped after firing but before its signal is read, and then rearmed, the
//! stale signal stays in the channel and the next receive mistakes it for the
//! new arming. [`TimerGuard`] tracks whether the current cycle's signal has been
//! taken and drains it on stop or reset when it has not.
//!
//! ## Guarantees
//!
//! - **At most one `Some` per cycle** across all wait calls
//! - **Settled cycles never block**: once consumed or stopped, every wait
//!   returns `None` immediately until the next reset
//! - **Bounded waits lose nothing**: a wait that gives up leaves the signal for
//!   the next wait, or for `stop` to drain
//! - **Resets are clean**: after [`TimerGuard::reset`] only the new arming's
//!   signal can be observed
//!
//! ## Architecture
//!
//! - [`guard`] - [`TimerGuard`] and its [`CycleState`] state machine
//! - [`bound`] - [`WaitBound`]: timeout, deadline or cancellation token
//! - [`cancel`] - [`CancelToken`], a cloneable deadline-bearing token
//!
//! Timers come from the `oneshot-timer` crate, re-exported here.
//!
//! ## Example
//!
//! ```rust
//! use std::time::Duration;
//! use timer_guard::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut guard = TimerGuard::start(Duration::from_millis(50))?;
//!
//! let token = CancelToken::with_timeout(Duration::from_millis(5));
//! if guard.wait_bounded(&token).is_none() {
//!     // Gave up early; the signal is still there for the next wait.
//!     assert!(guard.wait_blocking().is_some());
//! }
//!
//! guard.reset(Duration::from_secs(60));
//! assert!(guard.stop(), "stopped before the new arming fired");
//! assert!(guard.wait_blocking().is_none());
//! # Ok(())
//! # }
//! ```

#![deny(
    unsafe_op_in_unsafe_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    missing_debug_implementations
)]
#![warn(clippy::pedantic)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod bound;
pub mod cancel;
pub mod guard;

pub mod prelude;

pub use bound::WaitBound;
pub use cancel::CancelToken;
pub use guard::{CycleState, TimerGuard};

pub use oneshot_timer::{
    ManualTimer, ManualTrigger, OneShotTimer, ThreadTimer, TimerConfig, TimerError, TimerResult,
};
