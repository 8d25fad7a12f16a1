//! Types and configurations for error recovery patterns

use std::time::Duration;

/// How the delay between two attempts is chosen
#[derive(Debug, Clone, PartialEq)]
pub enum Backoff {
    /// Delay grows by `multiplier` after every failed attempt, up to `max_delay`
    Exponential {
        base_delay: Duration,
        max_delay: Duration,
        multiplier: f64,
    },
    /// Fixed list of delays; the number of retries equals its length
    Schedule(Vec<Duration>),
}

/// Retry configuration
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of attempts, the first one included
    pub max_attempts: u32,
    /// Delay strategy between attempts
    pub backoff: Backoff,
    /// Whether to add jitter to delays
    pub jitter: bool,
}

impl RetryConfig {
    /// Retry on a fixed schedule: one initial attempt plus one per listed delay
    pub fn schedule(delays: Vec<Duration>) -> Self {
        Self {
            max_attempts: delays.len() as u32 + 1,
            backoff: Backoff::Schedule(delays),
            jitter: false,
        }
    }

    /// Delay to sleep after the given failed attempt (1-based)
    pub fn delay_after(&self, attempt: u32) -> Duration {
        match &self.backoff {
            Backoff::Exponential {
                base_delay,
                max_delay,
                multiplier,
            } => {
                let factor = multiplier.powi(attempt.saturating_sub(1) as i32);
                let millis = base_delay.as_millis() as f64 * factor;
                std::cmp::min(Duration::from_millis(millis as u64), *max_delay)
            }
            Backoff::Schedule(delays) => {
                let index = attempt.saturating_sub(1) as usize;
                delays
                    .get(index)
                    .or_else(|| delays.last())
                    .copied()
                    .unwrap_or_default()
            }
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Backoff::Exponential {
                base_delay: Duration::from_secs(1),
                max_delay: Duration::from_secs(5),
                multiplier: 3.0,
            },
            jitter: false,
        }
    }
}
