//! Prelude for oneshot-timer.
//!
//! Re-exports the timer contract, both substrates and their configuration.
//!
//! ```rust
//! use oneshot_timer::prelude::*;
//! use std::time::Duration;
//!
//! let (mut timer, trigger) = ManualTimer::armed(Duration::from_secs(1));
//! assert!(trigger.fire());
//! assert!(!timer.stop());
//! ```

pub use crate::config::{TimerConfig, TimerConfigBuilder};
pub use crate::error::{TimerError, TimerResult};
pub use crate::manual::{ManualTimer, ManualTrigger};
pub use crate::thread::ThreadTimer;
pub use crate::timer::OneShotTimer;
