use std::time::Duration;

use crate::config::RetrySettings;

/// Retry policy for completion calls
///
/// Exponential backoff doubling per attempt, clamped between a floor and a
/// ceiling, with a fixed pause appended after every retried attempt.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff_floor: Duration,
    backoff_ceiling: Duration,
    retry_pause: Duration,
}

impl RetryPolicy {
    pub fn new(
        max_attempts: u32,
        backoff_floor: Duration,
        backoff_ceiling: Duration,
        retry_pause: Duration,
    ) -> Self {
        Self {
            max_attempts,
            backoff_floor,
            backoff_ceiling,
            retry_pause,
        }
    }

    pub fn from_settings(settings: &RetrySettings) -> Self {
        Self::new(
            settings.max_attempts,
            Duration::from_secs(settings.backoff_floor_secs),
            Duration::from_secs(settings.backoff_ceiling_secs),
            Duration::from_secs(settings.retry_pause_secs),
        )
    }

    /// Total attempts allowed, including the first call
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Delay inserted before retry number `attempt` (1-based: the wait after
    /// the `attempt`-th failed call)
    pub fn delay_before_retry(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(31);
        let exponential = Duration::from_secs(1u64 << exponent);
        let backoff = std::cmp::min(
            std::cmp::max(exponential, self.backoff_floor),
            self.backoff_ceiling,
        );
        backoff + self.retry_pause
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_settings(&RetrySettings::default())
    }
}
