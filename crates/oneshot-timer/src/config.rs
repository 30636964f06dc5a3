//! Configuration for thread-backed timers.

use serde::{Deserialize, Serialize};

use crate::error::{TimerError, TimerResult};

/// Smallest worker stack size accepted by [`TimerConfig::validate`] (16 KiB).
pub const MIN_STACK_SIZE: usize = 16 * 1024;

/// Worker thread configuration for [`ThreadTimer`](crate::ThreadTimer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerConfig {
    /// Name given to the worker thread.
    pub thread_name: String,
    /// Worker stack size in bytes; `None` uses the platform default.
    pub stack_size: Option<usize>,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            thread_name: "oneshot-timer".to_string(),
            stack_size: None,
        }
    }
}

impl TimerConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the thread name is empty or contains a NUL byte, or if
    /// the stack size is below [`MIN_STACK_SIZE`].
    pub fn validate(&self) -> TimerResult<()> {
        if self.thread_name.is_empty() {
            return Err(TimerError::invalid_configuration(
                "thread_name must not be empty",
            ));
        }
        if self.thread_name.contains('\0') {
            return Err(TimerError::invalid_configuration(
                "thread_name must not contain NUL bytes",
            ));
        }
        if let Some(stack_size) = self.stack_size
            && stack_size < MIN_STACK_SIZE
        {
            return Err(TimerError::invalid_configuration(format!(
                "stack_size must be at least {MIN_STACK_SIZE} bytes, got {stack_size}"
            )));
        }
        Ok(())
    }

    /// Create a configuration builder.
    #[must_use]
    pub fn builder() -> TimerConfigBuilder {
        TimerConfigBuilder::default()
    }
}

/// Builder for `TimerConfig`.
#[derive(Debug, Default)]
pub struct TimerConfigBuilder {
    config: TimerConfig,
}

impl TimerConfigBuilder {
    /// Set the worker thread name.
    #[must_use]
    pub fn thread_name(mut self, name: impl Into<String>) -> Self {
        self.config.thread_name = name.into();
        self
    }

    /// Set the worker stack size in bytes.
    #[must_use]
    pub fn stack_size(mut self, bytes: usize) -> Self {
        self.config.stack_size = Some(bytes);
        self
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> TimerResult<TimerConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(TimerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_builder_sets_fields() -> TimerResult<()> {
        let config = TimerConfig::builder()
            .thread_name("poll-deadline")
            .stack_size(64 * 1024)
            .build()?;
        assert_eq!(config.thread_name, "poll-deadline");
        assert_eq!(config.stack_size, Some(64 * 1024));
        Ok(())
    }

    #[test]
    fn test_rejects_empty_name() {
        let result = TimerConfig::builder().thread_name("").build();
        assert!(matches!(result, Err(TimerError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_rejects_nul_in_name() {
        let result = TimerConfig::builder().thread_name("bad\0name").build();
        assert!(matches!(result, Err(TimerError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_rejects_tiny_stack() {
        let result = TimerConfig::builder().stack_size(1024).build();
        assert!(matches!(result, Err(TimerError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_stack_size_at_minimum_accepted() {
        let result = TimerConfig::builder().stack_size(MIN_STACK_SIZE).build();
        assert!(result.is_ok());
    }
}
