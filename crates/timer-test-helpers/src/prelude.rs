//! Convenience re-exports for common test utilities.
//!
//! ```rust,ignore
//! use timer_test_helpers::prelude::*;
//! ```

pub use crate::must::{must, must_none, must_some, must_with};
pub use crate::timing::{ELAPSED_TOLERANCE, measure};
pub use crate::{assert_elapsed_at_least, assert_elapsed_near};

#[cfg(feature = "tracing")]
pub use crate::init_test_tracing;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;
