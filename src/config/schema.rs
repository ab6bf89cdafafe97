//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the selector.
//! All types derive Serde traits for deserialization from config files.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::fetch::CompressionType;

/// Root configuration for an endpoint selector.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SelectorConfig {
    /// Ordered candidate endpoints (e.g. "http://rm1:8088").
    /// The first entry is the preferred one.
    pub candidates: Vec<String>,

    /// Compression hint handed to the stream fetcher.
    pub compression: CompressionType,

    /// Liveness probe settings.
    pub probe: ProbeConfig,

    /// Per-candidate retry settings used during failover.
    pub backoff: BackoffConfig,

    /// Upper bound on a whole failover scan, in seconds. Unset means no bound.
    pub reselect_deadline_secs: Option<u64>,

    /// Periodic verification settings.
    pub monitor: MonitorConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl SelectorConfig {
    /// Build a default configuration for the given candidates.
    pub fn with_candidates<I, S>(candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            candidates: candidates.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn reselect_deadline(&self) -> Option<Duration> {
        self.reselect_deadline_secs.map(Duration::from_secs)
    }
}

/// Liveness probe configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Path appended to a candidate to build its probe URL.
    pub path: String,

    /// Append `anonymous=true` to the probe URL.
    pub anonymous: bool,

    /// Probe timeout in seconds.
    pub timeout_secs: u64,
}

impl ProbeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            path: "ws/v1/cluster/info".to_string(),
            anonymous: true,
            timeout_secs: 10,
        }
    }
}

/// Failover retry configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BackoffConfig {
    /// Probe attempts per candidate before moving to the next one.
    pub max_attempts_per_candidate: u32,

    /// Fixed pause after a failed attempt, in milliseconds.
    pub delay_ms: u64,
}

impl BackoffConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            max_attempts_per_candidate: 2,
            delay_ms: 1000,
        }
    }
}

/// Periodic verification configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Run the periodic verifier.
    pub enabled: bool,

    /// Verification interval in seconds.
    pub interval_secs: u64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: 30,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
