//! Prelude for timer-guard.
//!
//! ```rust
//! use std::time::Duration;
//! use timer_guard::prelude::*;
//!
//! let (mut guard, trigger) = TimerGuard::manual(Duration::from_secs(1));
//! trigger.fire();
//! assert!(guard.wait_bounded(Duration::from_secs(1)).is_some());
//! assert_eq!(guard.state(), CycleState::Consumed);
//! ```

pub use crate::bound::WaitBound;
pub use crate::cancel::CancelToken;
pub use crate::guard::{CycleState, TimerGuard};

pub use oneshot_timer::prelude::*;
