//! Fixed backoff between failover probe attempts.

use std::time::Duration;

use tokio::sync::Notify;
use tokio::time;

use crate::config::BackoffConfig;

/// Per-candidate retry policy used during a failover scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackoffPolicy {
    /// Probe attempts per candidate (at least 1).
    pub max_attempts_per_candidate: u32,
    /// Pause after a failed attempt.
    pub delay: Duration,
}

impl BackoffPolicy {
    pub fn new(max_attempts_per_candidate: u32, delay: Duration) -> Self {
        Self {
            max_attempts_per_candidate: max_attempts_per_candidate.max(1),
            delay,
        }
    }
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self::new(2, Duration::from_secs(1))
    }
}

impl From<&BackoffConfig> for BackoffPolicy {
    fn from(config: &BackoffConfig) -> Self {
        Self::new(config.max_attempts_per_candidate, config.delay())
    }
}

/// How a backoff pause ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pause {
    Elapsed,
    Interrupted,
}

/// Sleep for `delay`, waking early if `interrupt` is notified.
pub async fn pause(delay: Duration, interrupt: &Notify) -> Pause {
    if delay.is_zero() {
        return Pause::Elapsed;
    }

    tokio::select! {
        _ = time::sleep(delay) => Pause::Elapsed,
        _ = interrupt.notified() => Pause::Interrupted,
    }
}
