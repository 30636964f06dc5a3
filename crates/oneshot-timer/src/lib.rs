//! # oneshot-timer
//!
//! Single-shot timers that deliver their fire time on a channel.
//!
//! A one-shot timer is armed with a duration and delivers exactly one [`Instant`]
//! on its channel when that duration elapses. It can be stopped before it fires
//! and rearmed afterwards. This crate defines that contract and ships two
//! substrates implementing it:
//!
//! - [`ThreadTimer`] - backed by a dedicated worker thread, for real use
//! - [`ManualTimer`] - fired explicitly through a [`ManualTrigger`], for
//!   deterministic tests and simulations
//!
//! The raw contract is easy to misuse: stopping a timer whose signal is already
//! sitting unread in the channel, then rearming it, leaves a stale signal that a
//! later receive mistakes for the new arming. The `timer-guard` crate sequences
//! these calls safely; this crate only provides the primitive.
//!
//! ## Example
//!
//! ```rust
//! use oneshot_timer::{OneShotTimer, ThreadTimer};
//! use std::time::Duration;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut timer = ThreadTimer::start(Duration::from_millis(10))?;
//! let fired_at = timer.receiver().recv()?;
//! assert!(!timer.stop(), "already fired");
//! # let _ = fired_at;
//! # Ok(())
//! # }
//! ```
//!
//! [`Instant`]: std::time::Instant

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

pub mod config;
pub mod error;
pub mod manual;
pub mod thread;
pub mod timer;

pub mod prelude;

pub use config::{MIN_STACK_SIZE, TimerConfig, TimerConfigBuilder};
pub use error::{TimerError, TimerResult};
pub use manual::{ManualTimer, ManualTrigger};
pub use thread::ThreadTimer;
pub use timer::{FAR_FUTURE, OneShotTimer, deadline_after};
