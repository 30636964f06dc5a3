//! Unwrap helpers with good error messages.
//!
//! These replace `unwrap()` and `expect()` in test code, with `#[track_caller]`
//! so a failure points at the test line rather than at this module.

use std::fmt::Debug;

/// Unwrap a `Result`, panicking with context on error.
///
/// # Example
///
/// ```rust
/// use timer_test_helpers::must;
///
/// let result: Result<i32, &str> = Ok(42);
/// assert_eq!(must(result), 42);
/// ```
///
/// # Panics
///
/// Panics if the result is `Err`, with a message including the error value.
#[track_caller]
pub fn must<T, E: Debug>(result: Result<T, E>) -> T {
    match result {
        Ok(v) => v,
        Err(e) => panic!("must: unexpected Err: {e:?}"),
    }
}

/// Unwrap a `Result` with a custom context message.
///
/// # Panics
///
/// Panics if the result is `Err`, with the context and error value.
#[track_caller]
pub fn must_with<T, E: Debug>(result: Result<T, E>, context: &str) -> T {
    match result {
        Ok(v) => v,
        Err(e) => panic!("must_with: {context}: {e:?}"),
    }
}

/// Unwrap an `Option`, panicking with a custom message if `None`.
///
/// # Example
///
/// ```rust
/// use timer_test_helpers::must_some;
///
/// let fired = Some(7);
/// assert_eq!(must_some(fired, "timer should have fired"), 7);
/// ```
///
/// # Panics
///
/// Panics if the option is `None`, with the provided message.
#[track_caller]
pub fn must_some<T>(option: Option<T>, msg: &str) -> T {
    match option {
        Some(v) => v,
        None => panic!("must_some: {msg}"),
    }
}

/// Assert an `Option` is `None`, panicking with the unexpected value otherwise.
///
/// # Panics
///
/// Panics if the option is `Some`.
#[track_caller]
pub fn must_none<T: Debug>(option: Option<T>, msg: &str) {
    if let Some(v) = option {
        panic!("must_none: {msg}: got Some({v:?})");
    }
}
