//! Shared test utilities for the timer crates.
//!
//! # Modules
//!
//! - [`mod@must`] - Unwrap helpers with good error messages and `#[track_caller]`
//! - [`timing`] - Elapsed-time assertions with a tolerance band
//! - [`prelude`] - Convenience re-exports
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! timer-test-helpers = { workspace = true }
//! ```
//!
//! ```rust,ignore
//! use timer_test_helpers::prelude::*;
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![allow(clippy::unwrap_used, clippy::panic)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod must;
pub mod prelude;
pub mod timing;

pub use must::*;

/// Install a test-writer `tracing` subscriber once per test binary.
///
/// Honors `RUST_LOG`; defaults to `debug` for the timer crates.
#[cfg(feature = "tracing")]
pub fn init_test_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("oneshot_timer=debug,timer_guard=debug"));
    // Another test in the same binary may already have installed it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
