//! Error types for timer construction.
//!
//! Arming, stopping and receiving never fail; only building a timer can.

use thiserror::Error;

/// Errors that can occur while creating a timer.
#[derive(Debug, Error)]
pub enum TimerError {
    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The worker thread backing a timer could not be spawned.
    #[error("Failed to spawn timer thread: {0}")]
    Spawn(#[from] std::io::Error),
}

impl TimerError {
    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_configuration(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration(reason.into())
    }

    /// Create a spawn error.
    #[must_use]
    pub fn spawn(source: std::io::Error) -> Self {
        Self::Spawn(source)
    }
}

/// A specialized `Result` type for timer construction.
pub type TimerResult<T> = std::result::Result<T, TimerError>;
